use std::process::ExitCode;

use cmtgen::ui::output;

fn main() -> ExitCode {
    match cmtgen::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format_args!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
