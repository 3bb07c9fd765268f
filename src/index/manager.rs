//! Index Manager for rolodex
//!
//! Owns three synchronized views of the contact set:
//! - id -> contact (the only owner of contact data)
//! - email -> id
//! - lower-cased name -> ids (prefix index)
//!
//! # API
//!
//! - `build_indexes(contacts)` - Clear and rebuild every view
//! - `add_contact(contact)` - Index a new contact
//! - `update_contact(contact)` - Re-index an existing contact
//! - `remove_contact(id)` - Drop a contact from every view
//! - `get_by_id(id)` / `get_by_email(email)` - Point lookups
//! - `search_by_name_prefix(text)` - Prefix search resolved to contacts
//!
//! # Invariants
//!
//! - Every stored contact has exactly one email entry and one prefix entry
//!   under its current values
//! - No entry survives for a previous email or name
//! - Rejected mutations leave every view untouched

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::contact::{Contact, ContactId};

use super::errors::{IndexError, IndexResult};
use super::id_gen::IdGenerator;
use super::trie::{NameTrie, SearchIndex};

/// Size of each view, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Contacts in the id view
    pub contacts: usize,
    /// Entries in the email view
    pub emails: usize,
    /// Nodes in the prefix index, when it reports them
    pub prefix_nodes: Option<usize>,
}

/// Index Manager that keeps the id, email and name views consistent
#[derive(Debug)]
pub struct IndexManager<S = NameTrie> {
    /// Primary view (id -> contact)
    by_id: BTreeMap<ContactId, Contact>,

    /// Secondary unique view (email -> id)
    by_email: HashMap<String, ContactId>,

    /// Prefix view over contact names
    name_index: S,

    id_generator: IdGenerator,
}

impl IndexManager<NameTrie> {
    /// Creates an empty manager backed by a name trie
    pub fn new(id_generator: IdGenerator) -> Self {
        Self::with_search_index(NameTrie::new(), id_generator)
    }

    /// Returns trie-backed view sizes
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            contacts: self.by_id.len(),
            emails: self.by_email.len(),
            prefix_nodes: Some(self.name_index.node_count()),
        }
    }
}

impl Default for IndexManager<NameTrie> {
    fn default() -> Self {
        Self::new(IdGenerator::default())
    }
}

impl<S: SearchIndex> IndexManager<S> {
    /// Creates an empty manager over the given prefix index.
    ///
    /// The index is cleared so it cannot carry entries for unknown contacts.
    pub fn with_search_index(mut name_index: S, id_generator: IdGenerator) -> Self {
        name_index.clear();
        Self {
            by_id: BTreeMap::new(),
            by_email: HashMap::new(),
            name_index,
            id_generator,
        }
    }

    /// Returns an id not held by any stored contact.
    ///
    /// Fails with `IdSpaceExhausted` when the range is full or sampling keeps
    /// colliding past the configured bound.
    pub fn generate_next_id(&mut self) -> IndexResult<ContactId> {
        let by_id = &self.by_id;
        self.id_generator
            .next_id(by_id.len(), |id| by_id.contains_key(&id))
    }

    /// Rebuild every view from a batch of contacts.
    ///
    /// Behavior:
    /// - Check the whole batch for duplicate ids and emails
    /// - Clear all views
    /// - Index each contact
    ///
    /// A duplicate id or email in the batch aborts with the conflict error
    /// before any view is touched.
    pub fn build_indexes<I>(&mut self, contacts: I) -> IndexResult<()>
    where
        I: IntoIterator<Item = Contact>,
    {
        let contacts: Vec<Contact> = contacts.into_iter().collect();

        Self::check_batch(&contacts)?;

        self.by_id.clear();
        self.by_email.clear();
        self.name_index.clear();

        for contact in contacts {
            self.index_contact(contact);
        }

        Ok(())
    }

    /// Index a new contact under its id, email and name.
    ///
    /// Rejects a contact whose id or email is already indexed.
    pub fn add_contact(&mut self, contact: Contact) -> IndexResult<()> {
        if self.by_id.contains_key(&contact.id) {
            return Err(IndexError::DuplicateId(contact.id));
        }
        if self.by_email.contains_key(&contact.email) {
            return Err(IndexError::DuplicateEmail(contact.email));
        }

        self.index_contact(contact);
        Ok(())
    }

    /// Apply new field values to an existing contact.
    ///
    /// Returns `Ok(false)` if no contact has `updated.id`. The stored id and
    /// creation time are kept; name, email and phone are replaced. Old email
    /// and name entries are dropped before the new ones are written.
    pub fn update_contact(&mut self, updated: &Contact) -> IndexResult<bool> {
        let Some(existing) = self.by_id.get_mut(&updated.id) else {
            return Ok(false);
        };

        if let Some(&owner) = self.by_email.get(&updated.email) {
            if owner != updated.id {
                return Err(IndexError::DuplicateEmail(updated.email.clone()));
            }
        }

        self.by_email.remove(&existing.email);
        self.name_index.remove(&existing.name, existing.id);

        existing.name = updated.name.clone();
        existing.email = updated.email.clone();
        existing.phone = updated.phone.clone();

        self.by_email.insert(existing.email.clone(), existing.id);
        self.name_index.insert(&existing.name, existing.id);

        Ok(true)
    }

    /// Drop a contact from every view.
    ///
    /// Returns false if no contact has `id`.
    pub fn remove_contact(&mut self, id: ContactId) -> bool {
        let Some(contact) = self.by_id.remove(&id) else {
            return false;
        };

        self.by_email.remove(&contact.email);
        self.name_index.remove(&contact.name, id);

        true
    }

    fn check_batch(contacts: &[Contact]) -> IndexResult<()> {
        let mut ids = HashSet::with_capacity(contacts.len());
        let mut emails = HashSet::with_capacity(contacts.len());
        for contact in contacts {
            if !ids.insert(contact.id) {
                return Err(IndexError::DuplicateId(contact.id));
            }
            if !emails.insert(contact.email.as_str()) {
                return Err(IndexError::DuplicateEmail(contact.email.clone()));
            }
        }
        Ok(())
    }

    /// Writes all three views; callers have ruled out conflicts
    fn index_contact(&mut self, contact: Contact) {
        self.by_email.insert(contact.email.clone(), contact.id);
        self.name_index.insert(&contact.name, contact.id);
        self.by_id.insert(contact.id, contact);
    }

    /// Lookup by primary key
    pub fn get_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.by_id.get(&id)
    }

    /// Lookup by exact email
    pub fn get_by_email(&self, email: &str) -> Option<&Contact> {
        self.by_email
            .get(email)
            .and_then(|id| self.by_id.get(id))
    }

    /// Returns true if some contact holds `email`
    pub fn email_exists(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    /// All contacts, ascending by id
    pub fn all_contacts(&self) -> Vec<&Contact> {
        self.by_id.values().collect()
    }

    /// Contacts whose name starts with `text`, case-insensitive.
    ///
    /// Ids without a stored contact are skipped. Ascending by id.
    pub fn search_by_name_prefix(&self, text: &str) -> Vec<&Contact> {
        self.name_index
            .search_prefix(text)
            .into_iter()
            .filter_map(|id| self.by_id.get(&id))
            .collect()
    }

    /// Number of stored contacts
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no contact is stored
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_contact(id: ContactId, name: &str, email: &str) -> Contact {
        Contact::new(id, name, email, "555-0100")
    }

    fn manager() -> IndexManager {
        IndexManager::new(IdGenerator::seeded(1, 1_000_000, 10_000, 11))
    }

    fn ids(contacts: Vec<&Contact>) -> Vec<ContactId> {
        contacts.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_add_populates_every_view() {
        let mut manager = manager();
        let contact = make_contact(1, "Ann", "a@x.com");
        manager.add_contact(contact.clone()).unwrap();

        assert_eq!(manager.get_by_id(1), Some(&contact));
        assert_eq!(manager.get_by_email("a@x.com"), Some(&contact));
        assert!(manager.email_exists("a@x.com"));
        assert_eq!(ids(manager.search_by_name_prefix("an")), vec![1]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();

        let err = manager
            .add_contact(make_contact(1, "Bob", "b@x.com"))
            .unwrap_err();
        assert_eq!(err, IndexError::DuplicateId(1));

        // Nothing from the rejected contact leaked
        assert!(!manager.email_exists("b@x.com"));
        assert!(manager.search_by_name_prefix("bob").is_empty());
        assert_eq!(manager.get_by_id(1).unwrap().name, "Ann");
    }

    #[test]
    fn test_add_rejects_duplicate_email() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();

        let err = manager
            .add_contact(make_contact(2, "Bob", "a@x.com"))
            .unwrap_err();
        assert_eq!(err, IndexError::DuplicateEmail("a@x.com".into()));
        assert!(manager.get_by_id(2).is_none());
        assert!(manager.search_by_name_prefix("b").is_empty());
    }

    #[test]
    fn test_update_unknown_id_untouched() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();

        let updated = manager
            .update_contact(&make_contact(2, "Bob", "b@x.com"))
            .unwrap();

        assert!(!updated);
        assert_eq!(manager.len(), 1);
        assert!(!manager.email_exists("b@x.com"));
        assert!(manager.search_by_name_prefix("bob").is_empty());
    }

    #[test]
    fn test_update_replaces_stale_entries() {
        let mut manager = manager();
        let first = make_contact(1, "Ann", "a@x.com");
        let created_at = first.created_at;
        manager.add_contact(first).unwrap();

        let mut changed = make_contact(1, "Bob", "b@x.com");
        changed.phone = "555-0199".into();
        assert!(manager.update_contact(&changed).unwrap());

        assert!(!manager.email_exists("a@x.com"));
        assert!(manager.search_by_name_prefix("ann").is_empty());

        let stored = manager.get_by_email("b@x.com").unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.name, "Bob");
        assert_eq!(stored.phone, "555-0199");
        assert_eq!(stored.created_at, created_at);
        assert_eq!(ids(manager.search_by_name_prefix("bo")), vec![1]);
    }

    #[test]
    fn test_update_keeping_email() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();

        assert!(manager
            .update_contact(&make_contact(1, "Anne", "a@x.com"))
            .unwrap());

        assert_eq!(manager.get_by_email("a@x.com").unwrap().name, "Anne");
        assert_eq!(manager.stats().emails, 1);
    }

    #[test]
    fn test_update_rejects_email_of_other_contact() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();
        manager.add_contact(make_contact(2, "Bob", "b@x.com")).unwrap();

        let err = manager
            .update_contact(&make_contact(1, "Zed", "b@x.com"))
            .unwrap_err();
        assert_eq!(err, IndexError::DuplicateEmail("b@x.com".into()));

        assert_eq!(manager.get_by_email("a@x.com").unwrap().name, "Ann");
        assert_eq!(manager.get_by_email("b@x.com").unwrap().name, "Bob");
        assert_eq!(ids(manager.search_by_name_prefix("ann")), vec![1]);
        assert!(manager.search_by_name_prefix("zed").is_empty());
    }

    #[test]
    fn test_remove_clears_every_view() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "Ann", "a@x.com")).unwrap();

        assert!(manager.remove_contact(1));

        assert!(manager.get_by_id(1).is_none());
        assert!(!manager.email_exists("a@x.com"));
        assert!(manager.search_by_name_prefix("a").is_empty());
        assert_eq!(
            manager.stats(),
            IndexStats { contacts: 0, emails: 0, prefix_nodes: Some(0) }
        );
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut manager = manager();
        assert!(!manager.remove_contact(5));
    }

    #[test]
    fn test_build_indexes_replaces_state() {
        let mut manager = manager();
        manager.add_contact(make_contact(9, "Old", "old@x.com")).unwrap();

        manager
            .build_indexes(vec![
                make_contact(1, "Alice", "alice@x.com"),
                make_contact(2, "Alicia", "alicia@x.com"),
            ])
            .unwrap();

        assert_eq!(manager.len(), 2);
        assert!(manager.get_by_id(9).is_none());
        assert!(!manager.email_exists("old@x.com"));
        assert!(manager.search_by_name_prefix("old").is_empty());
        assert_eq!(ids(manager.search_by_name_prefix("ali")), vec![1, 2]);
    }

    #[test]
    fn test_build_indexes_rejects_duplicates_in_batch() {
        let mut manager = manager();
        let result = manager.build_indexes(vec![
            make_contact(1, "Alice", "alice@x.com"),
            make_contact(1, "Alicia", "alicia@x.com"),
        ]);

        assert_eq!(result.unwrap_err().code(), "ROLODEX_DUPLICATE_ID");
    }

    #[test]
    fn test_failed_build_keeps_previous_state() {
        let mut manager = manager();
        manager.add_contact(make_contact(9, "Old", "old@x.com")).unwrap();
        let before = manager.stats();

        let result = manager.build_indexes(vec![
            make_contact(1, "Ann", "a@x.com"),
            make_contact(2, "Bob", "a@x.com"),
            make_contact(3, "Cy", "c@x.com"),
        ]);

        assert_eq!(result, Err(IndexError::DuplicateEmail("a@x.com".into())));
        assert_eq!(manager.stats(), before);
        assert_eq!(manager.get_by_id(9).unwrap().name, "Old");
        assert!(manager.get_by_id(1).is_none());
        assert!(!manager.email_exists("a@x.com"));
        assert!(manager.search_by_name_prefix("ann").is_empty());
        assert_eq!(ids(manager.search_by_name_prefix("old")), vec![9]);
    }

    #[test]
    fn test_blank_name_not_searchable() {
        let mut manager = manager();
        manager.add_contact(make_contact(1, "  ", "a@x.com")).unwrap();

        assert!(manager.get_by_id(1).is_some());
        assert!(manager.search_by_name_prefix(" ").is_empty());
    }

    #[test]
    fn test_generate_next_id_avoids_stored_ids() {
        let mut manager =
            IndexManager::new(IdGenerator::seeded(1, 50, 10_000, 5));

        for _ in 0..50 {
            let id = manager.generate_next_id().unwrap();
            assert!(manager.get_by_id(id).is_none());
            manager
                .add_contact(make_contact(id, "N", &format!("{}@x.com", id)))
                .unwrap();
        }

        assert_eq!(manager.len(), 50);
        let err = manager.generate_next_id().unwrap_err();
        assert_eq!(err.code(), "ROLODEX_ID_SPACE_EXHAUSTED");
    }

    #[test]
    fn test_all_contacts_sorted_by_id() {
        let mut manager = manager();
        manager.add_contact(make_contact(30, "C", "c@x.com")).unwrap();
        manager.add_contact(make_contact(10, "A", "a@x.com")).unwrap();
        manager.add_contact(make_contact(20, "B", "b@x.com")).unwrap();

        assert_eq!(ids(manager.all_contacts()), vec![10, 20, 30]);
    }
}
