//! CLI argument definitions using clap
//!
//! Commands:
//! - rolodex add --name <name> --email <email> --phone <phone>
//! - rolodex edit --id <id> [--name ..] [--email ..] [--phone ..]
//! - rolodex remove --id <id>
//! - rolodex show (--id <id> | --email <email>)
//! - rolodex list
//! - rolodex search <prefix>
//! - rolodex filter (--before | --after | --on) <YYYY-MM-DD>

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::contact::ContactId;
use crate::service::{DateComparison, DateFilter};

use super::errors::{CliError, CliResult};

/// rolodex - contacts with id, email and name-prefix lookup
#[derive(Parser, Debug)]
#[command(name = "rolodex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a contact with a freshly generated id
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },

    /// Change fields of an existing contact
    Edit {
        #[arg(long)]
        id: ContactId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Remove a contact
    Remove {
        #[arg(long)]
        id: ContactId,
    },

    /// Show one contact by id or email
    #[command(group(ArgGroup::new("key").required(true).args(["id", "email"])))]
    Show {
        #[arg(long)]
        id: Option<ContactId>,
        #[arg(long)]
        email: Option<String>,
    },

    /// List every contact
    List,

    /// Find contacts whose name starts with a prefix (case-insensitive)
    Search {
        prefix: String,
    },

    /// Filter contacts by creation date
    #[command(group(ArgGroup::new("when").required(true).args(["before", "after", "on"])))]
    Filter {
        /// Created strictly before this date
        #[arg(long)]
        before: Option<NaiveDate>,
        /// Created strictly after this date
        #[arg(long)]
        after: Option<NaiveDate>,
        /// Created on this date
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Key selected by `show`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(ContactId),
    Email(String),
}

impl LookupKey {
    /// Exactly one of `id` and `email` must be given
    pub fn from_args(id: Option<ContactId>, email: Option<String>) -> CliResult<Self> {
        match (id, email) {
            (Some(id), None) => Ok(LookupKey::Id(id)),
            (None, Some(email)) => Ok(LookupKey::Email(email)),
            _ => Err(CliError::invalid_arguments(
                "show takes exactly one of --id or --email",
            )),
        }
    }
}

/// Builds the date filter for `filter`; exactly one date must be given
pub fn date_filter_from_args(
    before: Option<NaiveDate>,
    after: Option<NaiveDate>,
    on: Option<NaiveDate>,
) -> CliResult<DateFilter> {
    let given = [
        (before, DateComparison::Before),
        (after, DateComparison::After),
        (on, DateComparison::OnDate),
    ];
    let mut chosen = given
        .into_iter()
        .filter_map(|(date, comparison)| date.map(|date| DateFilter::new(date, comparison)));

    match (chosen.next(), chosen.next()) {
        (Some(filter), None) => Ok(filter),
        _ => Err(CliError::invalid_arguments(
            "filter takes exactly one of --before, --after or --on",
        )),
    }
}
