use matrix_verify::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    matrix_verify::infra::logging::init();

    match cli::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
