//! Contact service
//!
//! Sits between callers and the `IndexManager`: validates input, enforces
//! email uniqueness with readable errors, and moves batches to and from the
//! repository.

use crate::contact::{Contact, ContactId};
use crate::index::{IndexManager, IndexStats};
use crate::observability::{log_event_with_fields, Event};
use crate::repository::ContactRepository;

use super::errors::{ServiceError, ServiceResult};

/// Contact operations over an index and a repository
#[derive(Debug)]
pub struct ContactService<R> {
    repository: R,
    index: IndexManager,

    /// Set while the last load failed; blocks saves until a load succeeds
    load_failed: bool,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repository: R, index: IndexManager) -> Self {
        Self {
            repository,
            index,
            load_failed: false,
        }
    }

    /// Load every contact from the repository and rebuild the indexes.
    ///
    /// Returns the number of contacts indexed. On failure the indexes keep
    /// their previous state and `save_changes` is refused until a later
    /// load succeeds.
    pub fn initialize(&mut self) -> ServiceResult<usize> {
        self.load_failed = true;

        let contacts = self.repository.load_all()?;
        let loaded = contacts.len().to_string();
        log_event_with_fields(Event::ContactsLoaded, &[("count", &loaded)]);

        if let Err(e) = self.index.build_indexes(contacts) {
            log_event_with_fields(
                Event::IndexRebuildFailed,
                &[("code", e.code()), ("reason", &e.to_string())],
            );
            return Err(e.into());
        }

        self.load_failed = false;

        let stats = self.index.stats();
        log_event_with_fields(
            Event::IndexRebuildComplete,
            &[
                ("contacts", &stats.contacts.to_string()),
                ("prefix_nodes", &stats.prefix_nodes.unwrap_or(0).to_string()),
            ],
        );

        Ok(stats.contacts)
    }

    /// Candidate id for a new contact
    pub fn generate_next_id(&mut self) -> ServiceResult<ContactId> {
        Ok(self.index.generate_next_id()?)
    }

    /// Validate and index a new contact
    pub fn add_contact(&mut self, contact: Contact) -> ServiceResult<()> {
        Self::validate(&contact).map_err(|e| Self::rejected(contact.id, e))?;

        if self.index.email_exists(&contact.email) {
            return Err(Self::rejected(
                contact.id,
                ServiceError::DuplicateEmail(contact.email),
            ));
        }

        let id = contact.id;
        self.index
            .add_contact(contact)
            .map_err(|e| Self::rejected(id, e.into()))?;

        log_event_with_fields(Event::ContactAdded, &[("id", &id.to_string())]);
        Ok(())
    }

    /// Validate and apply new field values to an existing contact.
    ///
    /// Returns false if no contact has `contact.id`.
    pub fn edit_contact(&mut self, contact: &Contact) -> ServiceResult<bool> {
        Self::validate(contact).map_err(|e| Self::rejected(contact.id, e))?;

        if let Some(holder) = self.index.get_by_email(&contact.email) {
            if holder.id != contact.id {
                return Err(Self::rejected(
                    contact.id,
                    ServiceError::DuplicateEmail(contact.email.clone()),
                ));
            }
        }

        let updated = self
            .index
            .update_contact(contact)
            .map_err(|e| Self::rejected(contact.id, e.into()))?;

        if updated {
            log_event_with_fields(Event::ContactUpdated, &[("id", &contact.id.to_string())]);
        }
        Ok(updated)
    }

    /// Returns false if no contact has `id`
    pub fn remove_contact(&mut self, id: ContactId) -> bool {
        let removed = self.index.remove_contact(id);
        if removed {
            log_event_with_fields(Event::ContactRemoved, &[("id", &id.to_string())]);
        }
        removed
    }

    pub fn view_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.index.get_by_id(id)
    }

    pub fn view_by_email(&self, email: &str) -> Option<&Contact> {
        self.index.get_by_email(email)
    }

    pub fn all_contacts(&self) -> Vec<&Contact> {
        self.index.all_contacts()
    }

    /// Case-insensitive name prefix search
    pub fn search_contacts(&self, prefix: &str) -> Vec<&Contact> {
        let results = self.index.search_by_name_prefix(prefix);
        log_event_with_fields(
            Event::SearchServed,
            &[("matches", &results.len().to_string()), ("prefix", prefix)],
        );
        results
    }

    /// Contacts for which `predicate` holds, ascending by id
    pub fn filter_contacts<F>(&self, predicate: F) -> Vec<&Contact>
    where
        F: Fn(&Contact) -> bool,
    {
        self.index
            .all_contacts()
            .into_iter()
            .filter(|contact| predicate(contact))
            .collect()
    }

    /// Write every contact to the repository.
    ///
    /// Fails with `LoadIncomplete` after a failed `initialize`.
    pub fn save_changes(&self) -> ServiceResult<()> {
        if self.load_failed {
            let error = ServiceError::LoadIncomplete;
            log_event_with_fields(
                Event::SaveFailed,
                &[("code", error.code()), ("reason", &error.to_string())],
            );
            return Err(error);
        }

        let contacts = self.index.all_contacts();
        if let Err(e) = self.repository.save_all(&contacts) {
            log_event_with_fields(
                Event::SaveFailed,
                &[("code", e.code()), ("reason", &e.to_string())],
            );
            return Err(e.into());
        }

        log_event_with_fields(Event::ChangesSaved, &[("count", &contacts.len().to_string())]);
        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn validate(contact: &Contact) -> ServiceResult<()> {
        if contact.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name cannot be empty.".into()));
        }

        if contact.email.trim().is_empty() {
            return Err(ServiceError::Validation("Email cannot be empty.".into()));
        }

        if !contact.email.contains('@') || !contact.email.contains('.') {
            return Err(ServiceError::Validation(
                "Email format is invalid. Must contain '@' and '.'.".into(),
            ));
        }

        if contact.phone.trim().is_empty() {
            return Err(ServiceError::Validation("Phone cannot be empty.".into()));
        }

        Ok(())
    }

    fn rejected(id: ContactId, error: ServiceError) -> ServiceError {
        log_event_with_fields(
            Event::ContactRejected,
            &[
                ("code", error.code()),
                ("id", &id.to_string()),
                ("reason", &error.to_string()),
            ],
        );
        error
    }
}
