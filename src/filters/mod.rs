//! Server-side search criteria
//!
//! The registry API accepts advanced search over a fixed set of record
//! fields. A criterion is active iff its value is non-empty after trimming;
//! a criteria set with no active entries must never produce a request.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The fixed set of fields the search endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchField {
    FirstName,
    LastName,
    MiddleName,
    BirthDate,
    BirthPlace,
    Gender,
    Address,
    City,
    Country,
    Citizenship,
    EducationLevel,
    MaritalStatus,
}

impl SearchField {
    /// All searchable fields, in form order
    pub const ALL: [Self; 12] = [
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::BirthDate,
        Self::BirthPlace,
        Self::Gender,
        Self::Address,
        Self::City,
        Self::Country,
        Self::Citizenship,
        Self::EducationLevel,
        Self::MaritalStatus,
    ];

    /// Wire name used as the JSON key in the search request body
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::MiddleName => "middle_name",
            Self::BirthDate => "birth_date",
            Self::BirthPlace => "birth_place",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::City => "city",
            Self::Country => "country",
            Self::Citizenship => "citizenship",
            Self::EducationLevel => "education_level",
            Self::MaritalStatus => "marital_status",
        }
    }

    /// Human-readable label for prompts and summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::MiddleName => "Middle name",
            Self::BirthDate => "Birth date",
            Self::BirthPlace => "Birth place",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::City => "City",
            Self::Country => "Country",
            Self::Citizenship => "Citizenship",
            Self::EducationLevel => "Education level",
            Self::MaritalStatus => "Marital status",
        }
    }
}

/// A set of search criteria keyed by [`SearchField`]
///
/// Values are stored as entered; activity is judged on the trimmed value,
/// and only active criteria are projected into the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<SearchField, String>,
}

impl FilterCriteria {
    /// Create an empty criteria set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a field (an empty value deactivates it)
    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Get the raw stored value for a field
    #[must_use]
    pub fn get(&self, field: SearchField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Remove all criteria
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True if no criterion is active (all values blank after trimming)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Iterate over active criteria as (field, trimmed value)
    pub fn active(&self) -> impl Iterator<Item = (SearchField, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Project active criteria into the JSON request body (non-empty keys only)
    #[must_use]
    pub fn to_request(&self) -> Map<String, Value> {
        self.active()
            .map(|(field, value)| (field.key().to_string(), Value::from(value)))
            .collect()
    }

    /// One-line summary of active criteria for display
    #[must_use]
    pub fn summary(&self) -> String {
        self.active()
            .map(|(field, value)| format!("{}={value}", field.key()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
