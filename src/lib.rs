//! rolodex - contacts with consistent in-memory id, email and name-prefix indexes
//!
//! Layers, leaves first:
//! - `contact`: the record type
//! - `index`: name trie and the `IndexManager` that keeps every view in sync
//! - `repository`: batch load/save of contacts
//! - `service`: validation, uniqueness and filtering over the index
//! - `cli`: one-shot command-line front end

pub mod cli;
pub mod contact;
pub mod index;
pub mod observability;
pub mod repository;
pub mod service;
