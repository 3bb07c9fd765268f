//! CLI command implementations
//!
//! Boot sequence for every invocation:
//! 1. Load configuration
//! 2. Open the contacts file and rebuild indexes
//! 3. Execute one command
//! 4. Save if the command mutated contacts
//! 5. Print one JSON response

use serde_json::{json, Value};

use crate::contact::Contact;
use crate::index::IndexManager;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::repository::{ContactRepository, JsonContactRepository};
use crate::service::ContactService;

use super::args::{date_filter_from_args, Cli, Command, LookupKey};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments, execute one command and print the response
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match execute(cli) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn execute(cli: Cli) -> CliResult<Value> {
    log_event(Event::StartupBegin);

    let config = Config::load_or_default(cli.config.as_deref())?;
    Logger::set_min_severity(config.log_severity()?);

    let repository = JsonContactRepository::new(config.data_path());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_file", &repository.path().display().to_string())],
    );

    let mut service = ContactService::new(repository, IndexManager::new(config.id_generator()));
    service.initialize()?;

    run_command(&mut service, cli.command)
}

/// Execute a command against an initialized service.
///
/// Mutating commands save before returning.
pub fn run_command<R: ContactRepository>(
    service: &mut ContactService<R>,
    command: Command,
) -> CliResult<Value> {
    match command {
        Command::Add { name, email, phone } => {
            let id = service.generate_next_id()?;
            let contact = Contact::new(id, name, email, phone);
            service.add_contact(contact.clone())?;
            service.save_changes()?;
            Ok(serde_json::to_value(contact)?)
        }

        Command::Edit {
            id,
            name,
            email,
            phone,
        } => {
            let mut updated = service
                .view_by_id(id)
                .cloned()
                .ok_or_else(|| CliError::id_not_found(id))?;

            if let Some(name) = name {
                updated.name = name;
            }
            if let Some(email) = email {
                updated.email = email;
            }
            if let Some(phone) = phone {
                updated.phone = phone;
            }

            if !service.edit_contact(&updated)? {
                return Err(CliError::id_not_found(id));
            }
            service.save_changes()?;

            let stored = service
                .view_by_id(id)
                .ok_or_else(|| CliError::id_not_found(id))?;
            Ok(serde_json::to_value(stored)?)
        }

        Command::Remove { id } => {
            if !service.remove_contact(id) {
                return Err(CliError::id_not_found(id));
            }
            service.save_changes()?;
            Ok(json!({ "removed": id }))
        }

        Command::Show { id, email } => {
            let found = match LookupKey::from_args(id, email)? {
                LookupKey::Id(id) => service
                    .view_by_id(id)
                    .ok_or_else(|| CliError::id_not_found(id))?,
                LookupKey::Email(email) => service
                    .view_by_email(&email)
                    .ok_or_else(|| CliError::email_not_found(&email))?,
            };
            Ok(serde_json::to_value(found)?)
        }

        Command::List => Ok(serde_json::to_value(service.all_contacts())?),

        Command::Search { prefix } => Ok(serde_json::to_value(service.search_contacts(&prefix))?),

        Command::Filter { before, after, on } => {
            let filter = date_filter_from_args(before, after, on)?;
            Ok(serde_json::to_value(
                service.filter_contacts(|c| filter.matches(c)),
            )?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactId;
    use crate::index::IdGenerator;
    use crate::repository::MemoryContactRepository;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn service_with(contacts: Vec<Contact>) -> ContactService<MemoryContactRepository> {
        let mut service = ContactService::new(
            MemoryContactRepository::with_contacts(contacts),
            IndexManager::new(IdGenerator::seeded(1, 1_000_000, 10_000, 23)),
        );
        service.initialize().unwrap();
        service
    }

    fn contact_on(id: ContactId, name: &str, day: u32) -> Contact {
        let created = Utc.with_ymd_and_hms(2024, 4, day, 8, 0, 0).unwrap();
        Contact::with_created_at(id, name, format!("{}@x.com", name.to_lowercase()), "555", created)
    }

    fn ids(value: &Value) -> Vec<u64> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["Id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn test_add_saves_and_returns_contact() {
        let mut service = service_with(Vec::new());

        let data = run_command(
            &mut service,
            Command::Add {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                phone: "555".into(),
            },
        )
        .unwrap();

        let id = data["Id"].as_u64().unwrap() as ContactId;
        assert!((1..=1_000_000).contains(&id));
        assert_eq!(service.repository().save_count(), 1);
        assert_eq!(service.repository().contacts()[0].id, id);
    }

    #[test]
    fn test_add_invalid_contact_not_saved() {
        let mut service = service_with(Vec::new());

        let err = run_command(
            &mut service,
            Command::Add {
                name: "Ann".into(),
                email: "not-an-email".into(),
                phone: "555".into(),
            },
        )
        .unwrap_err();

        assert_eq!(err.code_str(), "ROLODEX_VALIDATION_FAILED");
        assert_eq!(service.repository().save_count(), 0);
    }

    #[test]
    fn test_edit_keeps_omitted_fields() {
        let mut service = service_with(vec![contact_on(1, "Ann", 1)]);

        let data = run_command(
            &mut service,
            Command::Edit {
                id: 1,
                name: Some("Zed".into()),
                email: None,
                phone: None,
            },
        )
        .unwrap();

        assert_eq!(data["Name"], "Zed");
        assert_eq!(data["Email"], "ann@x.com");
        assert_eq!(data["Phone"], "555");
    }

    #[test]
    fn test_edit_and_remove_unknown_id() {
        let mut service = service_with(Vec::new());

        let err = run_command(
            &mut service,
            Command::Edit { id: 4, name: None, email: None, phone: None },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_NOT_FOUND");

        let err = run_command(&mut service, Command::Remove { id: 4 }).unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_NOT_FOUND");
    }

    #[test]
    fn test_show_by_id_and_email() {
        let mut service = service_with(vec![contact_on(1, "Ann", 1)]);

        let by_id = run_command(&mut service, Command::Show { id: Some(1), email: None }).unwrap();
        let by_email = run_command(
            &mut service,
            Command::Show { id: None, email: Some("ann@x.com".into()) },
        )
        .unwrap();
        assert_eq!(by_id, by_email);

        let err = run_command(
            &mut service,
            Command::Show { id: None, email: Some("nobody@x.com".into()) },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_NOT_FOUND");
    }

    #[test]
    fn test_missing_or_conflicting_keys_rejected() {
        let mut service = service_with(vec![contact_on(1, "Ann", 1)]);

        let err = run_command(&mut service, Command::Show { id: None, email: None }).unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_CLI_INVALID_ARGUMENTS");

        let err = run_command(
            &mut service,
            Command::Show { id: Some(1), email: Some("ann@x.com".into()) },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_CLI_INVALID_ARGUMENTS");

        let err = run_command(
            &mut service,
            Command::Filter { before: None, after: None, on: None },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "ROLODEX_CLI_INVALID_ARGUMENTS");
    }

    #[test]
    fn test_search_list_filter() {
        let mut service = service_with(vec![
            contact_on(1, "Ann", 1),
            contact_on(2, "Anna", 10),
            contact_on(3, "Bob", 20),
        ]);

        let found = run_command(&mut service, Command::Search { prefix: "AN".into() }).unwrap();
        assert_eq!(ids(&found), vec![1, 2]);

        let all = run_command(&mut service, Command::List).unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3]);

        let filtered = run_command(
            &mut service,
            Command::Filter {
                before: None,
                after: NaiveDate::from_ymd_opt(2024, 4, 5),
                on: None,
            },
        )
        .unwrap();
        assert_eq!(ids(&filtered), vec![2, 3]);
    }

    #[test]
    fn test_remove_saves() {
        let mut service = service_with(vec![contact_on(1, "Ann", 1)]);

        let data = run_command(&mut service, Command::Remove { id: 1 }).unwrap();

        assert_eq!(data["removed"], 1);
        assert!(service.repository().contacts().is_empty());
    }
}
