//! Google Calendar tool for agent platforms.
//!
//! The [`GoogleCalendarTool`] lists upcoming events or creates a quick event
//! on the service account's primary calendar. The [`GoogleCalendarProvider`]
//! validates stored credentials by running one live fetch.

pub mod action;
pub mod calendar_client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod tool;

#[cfg(test)]
mod test_support;

pub use action::Action;
pub use error::{CalendarError, CredentialValidationError, PluginError};
pub use provider::{provider_descriptor, GoogleCalendarProvider};
pub use tool::{tool_descriptor, ActionOutcome, GoogleCalendarTool};
