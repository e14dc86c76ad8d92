// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::{
    commands::{self, generate::GenerateOptions, run::RunOptions},
    core::config::Overrides,
    resolve_locale, t,
};

const DEFAULT_CONFIG: &str = "Verify.toml";

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for `--lang <VALUE>` or `--lang=<VALUE>`.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(DEFAULT_CONFIG)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn sizes_arg(locale: &str) -> Arg {
    Arg::new("sizes")
        .long("sizes")
        .help(t!("arg_sizes", locale = locale).to_string())
        .value_name("SIZES")
        .value_delimiter(',')
        .num_args(1..)
        .value_parser(clap::value_parser!(usize))
        .action(ArgAction::Set)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("matrix-verify")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(
                    Arg::new("data-dir")
                        .long("data-dir")
                        .help(t!("arg_data_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("result-dir")
                        .long("result-dir")
                        .help(t!("arg_result_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("atol")
                        .long("atol")
                        .help(t!("arg_atol", locale = locale).to_string())
                        .value_name("ATOL")
                        .value_parser(clap::value_parser!(f64))
                        .action(ArgAction::Set),
                )
                .arg(sizes_arg(locale))
                .arg(
                    Arg::new("exact")
                        .long("exact")
                        .help(t!("arg_exact", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about(t!("cmd_generate_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(sizes_arg(locale))
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help(t!("arg_seed", locale = locale).to_string())
                        .value_name("SEED")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("max-value")
                        .long("max-value")
                        .help(t!("arg_max_value", locale = locale).to_string())
                        .value_name("MAX")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("float")
                        .long("float")
                        .help(t!("arg_float", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("with-result")
                        .long("with-result")
                        .help(t!("arg_with_result", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn sizes_of(matches: &ArgMatches) -> Option<Vec<usize>> {
    matches
        .get_many::<usize>("sizes")
        .map(|values| values.copied().collect())
}

fn path_of(matches: &ArgMatches, id: &str) -> PathBuf {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

pub fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let detected = explicit_language
        .clone()
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let language = resolve_locale(&detected);
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let options = RunOptions {
                config: path_of(run_matches, "config"),
                overrides: Overrides {
                    data_dir: run_matches.get_one::<PathBuf>("data-dir").cloned(),
                    result_dir: run_matches.get_one::<PathBuf>("result-dir").cloned(),
                    atol: run_matches.get_one::<f64>("atol").copied(),
                    sizes: sizes_of(run_matches),
                    exact: run_matches.get_flag("exact"),
                },
                json: run_matches.get_one::<PathBuf>("json").cloned(),
                html: run_matches.get_one::<PathBuf>("html").cloned(),
                language: explicit_language,
            };
            commands::run::execute(options)?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            let force = init_matches.get_flag("force");
            let output = path_of(init_matches, "output");

            // Show language detection message if it was auto-detected
            if explicit_language.is_none() && !non_interactive {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&output, &language, non_interactive, force)?;
        }
        Some(("generate", gen_matches)) => {
            let options = GenerateOptions {
                config: path_of(gen_matches, "config"),
                sizes: sizes_of(gen_matches),
                seed: gen_matches.get_one::<u64>("seed").copied(),
                float: gen_matches.get_flag("float"),
                with_result: gen_matches.get_flag("with-result"),
                max_value: gen_matches.get_one::<u32>("max-value").copied().unwrap_or(100),
                language: explicit_language,
            };
            commands::generate::execute(options)?;
        }
        _ => {
            // Clap has already printed help when no subcommand is given.
        }
    }
    Ok(())
}
