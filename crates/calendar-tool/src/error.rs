//! Error types for the calendar tool.
//!
//! Errors come in two tiers. [`PluginError`] covers credential parsing and
//! authenticator setup; it propagates with `?` out of an invocation.
//! [`CalendarError`] comes back from a calendar API call and is turned into
//! a chat message by the dispatcher instead of escaping.
//! [`CredentialValidationError`] is the single error the provider reports to
//! the host when a credential is rejected.

use thiserror::Error;

/// Failure while preparing an authenticated calendar handle
#[derive(Debug, Error)]
pub enum PluginError {
    /// Stored credential is missing or is not valid JSON
    #[error("Invalid service account credential: {0}")]
    CredentialParse(String),

    /// Credential JSON is not a usable service-account key
    #[error("Failed to build service account authenticator: {0}")]
    AuthConstruction(String),

    /// TLS or filesystem setup failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PluginError {
    pub fn credential_parse(message: impl Into<String>) -> Self {
        PluginError::CredentialParse(message.into())
    }

    pub fn auth_construction(message: impl Into<String>) -> Self {
        PluginError::AuthConstruction(message.into())
    }
}

/// A calendar API call failed (auth rejection, transport, API error)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CalendarError {
    message: String,
}

impl CalendarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<google_calendar3::Error> for CalendarError {
    fn from(err: google_calendar3::Error) -> Self {
        CalendarError::new(err.to_string())
    }
}

/// Credential rejected during provider validation
///
/// The message is the text of the underlying failure, which stays reachable
/// through `source()`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CredentialValidationError {
    message: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl CredentialValidationError {
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Box::new(source),
        }
    }
}
