//! Domain models for the citizen roster
//!
//! These are pure data structures with minimal logic, mirroring the wire
//! format of the registry API. Every field of a [`Citizen`] except `id` is
//! optional: records are sparse and an absent attribute is normal data, not
//! an error. The single shared convention for rendering absent values is
//! [`NO_DATA`] / [`text`] - nothing else in the crate formats missing fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Placeholder shown for any absent record attribute.
pub const NO_DATA: &str = "no data";

/// Render an optional attribute using the shared "no data" convention.
#[must_use]
pub fn text<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), ToString::to_string)
}

/// Render an optional boolean attribute as yes/no.
#[must_use]
pub fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => NO_DATA.to_string(),
    }
}

/// A single citizen record as served by the registry API
///
/// Only `id` is required. Unknown attributes are preserved in `extra` so
/// that a full record survives a fetch/edit/update round trip without
/// dropping fields this client does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Citizen {
    pub id: i64,

    // Identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    // Contact and residence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    // Family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_languages: Option<Vec<String>>,

    // Education and career
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<NaiveDate>,

    // Physical and medical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_donor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wears_glasses: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tattoos: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piercings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_medical_exam_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fluorography_date: Option<NaiveDate>,

    // Documents and status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_passport: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criminal_record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_car: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,

    /// Attributes the client does not model, preserved for PUT round trips
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Citizen {
    /// Create a minimal record with only the required identity field
    #[must_use]
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Full name in "last first middle" order, skipping absent parts
    ///
    /// Returns [`NO_DATA`] when all three name parts are absent.
    #[must_use]
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [&self.last_name, &self.first_name, &self.middle_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();

        if parts.is_empty() {
            NO_DATA.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Lowercased concatenation of the name parts and address
    ///
    /// This is the haystack the client-side local filter matches against.
    #[must_use]
    pub fn search_haystack(&self) -> String {
        [
            &self.last_name,
            &self.first_name,
            &self.middle_name,
            &self.address,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// One fetched result set: a page (or full match set) of rows plus the
/// server-reported total
///
/// `total_count` reflects the full matching set on the server, not
/// `rows.len()`. The wire names (`citizens`, `totalCount`) are the API's;
/// a response missing either key fails to decode, which is how malformed
/// responses are detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResultSet {
    #[serde(rename = "citizens")]
    pub rows: Vec<Citizen>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

impl ResultSet {
    /// The empty result set used after a failed fetch
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
        }
    }
}

/// Aggregate roster statistics served by `GET /statistics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub gender_distribution: BTreeMap<String, u64>,
    pub education_distribution: BTreeMap<String, u64>,
    pub citizenship_distribution: BTreeMap<String, u64>,
    pub average_salary: f64,
    pub average_children_count: f64,
    pub average_age_by_gender: BTreeMap<String, f64>,
}
