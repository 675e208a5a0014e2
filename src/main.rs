//! folio - query a directory of frontmatter documents

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = folio::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
