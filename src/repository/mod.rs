//! Contact persistence
//!
//! Repositories move whole batches: `load_all` at startup, `save_all` on
//! demand. Neither is interleaved with index mutation.

mod errors;
mod store;

pub use errors::{RepositoryError, RepositoryResult};
pub use store::{JsonContactRepository, MemoryContactRepository};

use crate::contact::Contact;

/// Batch storage for contacts
pub trait ContactRepository {
    /// Load every stored contact. An empty store yields an empty batch.
    fn load_all(&self) -> RepositoryResult<Vec<Contact>>;

    /// Replace the stored batch with `contacts`
    fn save_all(&self, contacts: &[&Contact]) -> RepositoryResult<()>;
}
