//! CLI module for rolodex
//!
//! One-shot commands over the contacts file:
//! - add / edit / remove: mutate, then save
//! - show / list / search / filter: read only

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
