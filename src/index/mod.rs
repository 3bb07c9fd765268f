//! Index subsystem for rolodex
//!
//! Indexes are in-memory only and rebuilt from the repository on startup.
//!
//! # Design Principles
//!
//! - Single mutation surface: every change goes through `IndexManager`
//! - Views never hold copies of contact data except the id view
//! - Case-insensitive name prefix search via a character trie
//!
//! # Invariants
//!
//! - Id and email are unique among stored contacts
//! - Each stored contact appears exactly once in every view
//! - Prefix search results never name a contact that is not stored

mod errors;
mod id_gen;
mod manager;
mod trie;

pub use errors::{IndexError, IndexResult};
pub use id_gen::{IdGenerator, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_ID, DEFAULT_MIN_ID};
pub use manager::{IndexManager, IndexStats};
pub use trie::{NameTrie, SearchIndex};
