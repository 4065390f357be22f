//! Error taxonomy for the dashboard
//!
//! Every stage has a typed error: establishing or losing the SSH channel,
//! a remote query failing, or remote output not matching the expected
//! shape. None of these are retried; they unwind out of the render loop
//! and are reported after the terminal has been restored.

use thiserror::Error;

/// Errors produced by the collection, parsing and render stages
#[derive(Debug, Error)]
pub enum DashError {
    /// The SSH channel could not be established or was closed mid-session
    #[error("connection to {host} failed: {reason}")]
    Connection { host: String, reason: String },

    /// A remote command ran but returned an error
    #[error("remote query '{query}' failed: {reason}")]
    Query { query: &'static str, reason: String },

    /// Remote output did not match the expected shape
    #[error("failed to parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },
}

impl DashError {
    pub(crate) fn parse(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Parse {
            what,
            reason: reason.into(),
        }
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;
