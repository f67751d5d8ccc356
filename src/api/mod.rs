//! Registry API boundary
//!
//! The remote data API is the only collaborator this client has. It is
//! modelled as the [`RosterApi`] trait so that the browse session and the
//! command handlers stay testable without a network; [`HttpRosterApi`] is
//! the blocking HTTP implementation used by the binary, and
//! [`mock::MockRosterApi`] is the scripted stand-in used by tests.
//!
//! Response bodies are decoded into typed envelopes, so a body missing an
//! expected key (e.g. `totalCount`) surfaces as [`ApiError::Malformed`]
//! instead of leaking a confusing rendering error downstream.

pub mod error;
pub mod mock;

pub use error::{ApiError, Result};

use crate::filters::FilterCriteria;
use crate::roster::{Citizen, ResultSet, Statistics};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client-side view of the registry data API
pub trait RosterApi {
    /// Fetch rows `[start, end)` of the full unfiltered roster plus its
    /// total count.
    fn fetch_slice(&self, start: u64, end: u64) -> Result<ResultSet>;

    /// Fetch all rows matching the active criteria plus the matched count.
    ///
    /// Callers must not invoke this with an empty criteria set; the browse
    /// session guards that case and never issues the request.
    fn search(&self, criteria: &FilterCriteria) -> Result<ResultSet>;

    /// Fetch a single record by id.
    fn fetch_citizen(&self, id: i64) -> Result<Citizen>;

    /// Replace a record wholesale, returning the updated record.
    fn update_citizen(&self, citizen: &Citizen) -> Result<Citizen>;

    /// Fetch the aggregate roster statistics.
    fn fetch_statistics(&self) -> Result<Statistics>;
}

/// Blocking HTTP implementation of [`RosterApi`]
pub struct HttpRosterApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpRosterApi {
    /// Create a client for the given API base URL (e.g. `https://host/api`)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL is empty, and
    /// `ApiError::Transport` if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl(
                "API base URL is not configured".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check the status and decode the body as `T`
    ///
    /// The body is read as text first so that a shape violation maps to
    /// `Malformed` rather than being folded into the transport error class.
    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

impl RosterApi for HttpRosterApi {
    fn fetch_slice(&self, start: u64, end: u64) -> Result<ResultSet> {
        let response = self
            .client
            .get(self.url(&format!("citizens/slice/{start}/{end}")))
            .send()?;
        Self::decode(response)
    }

    fn search(&self, criteria: &FilterCriteria) -> Result<ResultSet> {
        let response = self
            .client
            .post(self.url("citizens/search"))
            .json(&criteria.to_request())
            .send()?;
        Self::decode(response)
    }

    fn fetch_citizen(&self, id: i64) -> Result<Citizen> {
        let response = self.client.get(self.url(&format!("citizens/{id}"))).send()?;
        Self::decode(response)
    }

    fn update_citizen(&self, citizen: &Citizen) -> Result<Citizen> {
        let response = self
            .client
            .put(self.url(&format!("citizens/{}", citizen.id)))
            .json(citizen)
            .send()?;
        Self::decode(response)
    }

    fn fetch_statistics(&self) -> Result<Statistics> {
        let response = self.client.get(self.url("statistics")).send()?;
        Self::decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_url() {
        let result = HttpRosterApi::new("", Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpRosterApi::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            api.url("citizens/slice/0/10"),
            "http://localhost:8080/api/citizens/slice/0/10"
        );
    }
}
