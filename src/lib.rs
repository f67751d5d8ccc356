//! Citr - a command-line browser for citizen registry APIs
//!
//! This library provides the client-side logic for browsing, searching and
//! editing a roster of citizen records held behind a remote JSON-over-HTTP
//! API. The core is the browse session: server-side slice pagination,
//! server-side advanced search, and a client-side secondary filter over
//! whichever result set is currently authoritative.

use thiserror::Error;

pub mod api;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod output;
pub mod roster;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CitrError {
    /// Remote API error
    #[error("API error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),
    /// CSV export error
    #[error("Export error: {0}")]
    ExportError(#[from] csv::Error),
    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A fetch failed and was normalized to a user-facing message
    #[error("{0}")]
    DataUnavailable(String),
}
