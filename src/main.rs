//! rolodex CLI entry point
//!
//! Delegates everything to `cli::run`, which prints the JSON response.
//! Errors are repeated on stderr and exit non-zero.

use rolodex::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
