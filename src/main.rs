use std::process::ExitCode;

fn main() -> ExitCode {
    match sankey_sheet::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
