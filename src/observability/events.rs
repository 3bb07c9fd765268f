//! Observable events for rolodex
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    StartupBegin,
    /// Configuration loaded
    ConfigLoaded,

    // Loading
    /// Contacts read from the repository
    ContactsLoaded,
    /// Index rebuild complete
    IndexRebuildComplete,
    /// Index rebuild failed
    IndexRebuildFailed,

    // Mutations
    /// Contact added
    ContactAdded,
    /// Contact updated
    ContactUpdated,
    /// Contact removed
    ContactRemoved,
    /// Mutation rejected by validation or uniqueness
    ContactRejected,

    // Queries
    /// Prefix search served
    SearchServed,

    // Persistence
    /// Contacts written to the repository
    ChangesSaved,
    /// Repository write failed
    SaveFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StartupBegin => "STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::ContactsLoaded => "CONTACTS_LOADED",
            Event::IndexRebuildComplete => "INDEX_REBUILD_COMPLETE",
            Event::IndexRebuildFailed => "INDEX_REBUILD_FAILED",

            Event::ContactAdded => "CONTACT_ADDED",
            Event::ContactUpdated => "CONTACT_UPDATED",
            Event::ContactRemoved => "CONTACT_REMOVED",
            Event::ContactRejected => "CONTACT_REJECTED",

            Event::SearchServed => "SEARCH_SERVED",

            Event::ChangesSaved => "CHANGES_SAVED",
            Event::SaveFailed => "SAVE_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SearchServed => Severity::Trace,
            Event::ContactRejected => Severity::Warn,
            Event::IndexRebuildFailed | Event::SaveFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
