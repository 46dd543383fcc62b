//! Defines the core data structures used in the email-finder application.

use serde::{Deserialize, Serialize};

/// A person admitted for pattern generation.
///
/// Immutable once handed to the generator; the generator tolerates empty fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Person {
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    /// Bare domain (e.g. "example.com"); already cleaned by the caller.
    pub domain: String,
}

impl Person {
    pub(crate) fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            domain: domain.into(),
        }
    }

    /// "First Last", as shown in listings.
    pub(crate) fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Raw person record as typed into a form or read from a JSON file.
/// Allows for flexibility if some fields are missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonInput {
    /// The person's first name.
    #[serde(default, alias = "first_name")]
    pub first_name: Option<String>,
    /// The person's last name.
    #[serde(default, alias = "last_name")]
    pub last_name: Option<String>,
    /// "First Last" in one field, used when either name field is missing.
    #[serde(default, alias = "full_name")]
    pub full_name: Option<String>,
    /// The company domain (e.g. "example.com", "@example.com" or a full URL).
    #[serde(default, alias = "company_domain")]
    pub domain: Option<String>,
}

/// The candidate list generated for one person.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonPatterns {
    pub person: Person,
    /// Candidates in generation order.
    pub patterns: Vec<String>,
}

/// Per-person candidates plus the flattened "copy all" list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PatternReport {
    pub per_person: Vec<PersonPatterns>,
    /// Every candidate of every person, in input order, duplicates included.
    pub flattened: Vec<String>,
}

/// An input record that was not admitted during batch processing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedRecord {
    /// Zero-based position in the input.
    pub index: usize,
    /// Human-readable reason the record was rejected.
    pub reason: String,
}

/// Result of processing a batch of person records.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub(crate) struct BatchOutcome {
    pub report: PatternReport,
    #[serde(skip_serializing_if = "Vec::is_empty")] // Don't write if empty
    #[serde(default)]
    pub skipped: Vec<SkippedRecord>,
}
