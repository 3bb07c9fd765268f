//! Contact record
//!
//! The index layer depends on three fields only:
//! - `id`: primary key, assigned once and never changed
//! - `email`: secondary unique key
//! - `name`: searchable text, not unique
//!
//! `phone` and `created_at` are payload carried through untouched.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Contact identifier
pub type ContactId = u32;

/// A single contact record.
///
/// Serialized with PascalCase keys; lowercase and snake_case keys are
/// accepted when reading. `CreatedAt` may omit its offset, in which case it
/// is read as UTC, and a missing `CreatedAt` reads as the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(alias = "id")]
    pub id: ContactId,

    #[serde(alias = "name")]
    pub name: String,

    #[serde(alias = "email")]
    pub email: String,

    #[serde(alias = "phone", default)]
    pub phone: String,

    #[serde(
        alias = "created_at",
        alias = "createdAt",
        default,
        deserialize_with = "deserialize_created_at"
    )]
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Creates a contact stamped with the current time
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::with_created_at(id, name, email, phone, Utc::now())
    }

    /// Creates a contact with an explicit creation time
    pub fn with_created_at(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            created_at,
        }
    }
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(de::Error::custom)
}

/// Parses an RFC 3339 timestamp, or one without offset taken as UTC
fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match raw.parse::<DateTime<Utc>>() {
        Ok(timestamp) => Ok(timestamp),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc()),
    }
}
