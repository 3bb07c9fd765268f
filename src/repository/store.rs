//! # Contact Stores

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::contact::Contact;

use super::errors::{RepositoryError, RepositoryResult};
use super::ContactRepository;

/// JSON file-based contact store.
///
/// The file holds one pretty-printed array of contacts.
#[derive(Debug, Clone)]
pub struct JsonContactRepository {
    path: PathBuf,
}

impl JsonContactRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactRepository for JsonContactRepository {
    fn load_all(&self) -> RepositoryResult<Vec<Contact>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| RepositoryError::io(&self.path, e))?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| RepositoryError::serialization(&self.path, e))
    }

    fn save_all(&self, contacts: &[&Contact]) -> RepositoryResult<()> {
        let content = serde_json::to_string_pretty(contacts)
            .map_err(|e| RepositoryError::serialization(&self.path, e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
            }
        }

        fs::write(&self.path, content).map_err(|e| RepositoryError::io(&self.path, e))
    }
}

/// In-memory contact store for testing
#[derive(Debug, Default)]
pub struct MemoryContactRepository {
    contacts: RefCell<Vec<Contact>>,
    saves: RefCell<usize>,
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `contacts`
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RefCell::new(contacts),
            saves: RefCell::new(0),
        }
    }

    /// Snapshot of the stored batch
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.borrow().clone()
    }

    /// Number of completed `save_all` calls
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ContactRepository for MemoryContactRepository {
    fn load_all(&self) -> RepositoryResult<Vec<Contact>> {
        Ok(self.contacts.borrow().clone())
    }

    fn save_all(&self, contacts: &[&Contact]) -> RepositoryResult<()> {
        *self.contacts.borrow_mut() = contacts.iter().map(|c| (*c).clone()).collect();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
