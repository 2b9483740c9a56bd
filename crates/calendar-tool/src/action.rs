//! Action names accepted by the calendar tool.

use std::fmt;

/// The operation requested by the caller, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Create,
    Delete,
    /// Unrecognized action, kept with its original casing for the reply
    Invalid(String),
}

impl Action {
    /// Resolve an action name. Matching is case-insensitive.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "fetch" => Action::Fetch,
            "create" => Action::Create,
            "delete" => Action::Delete,
            _ => Action::Invalid(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Fetch => "fetch",
            Action::Create => "create",
            Action::Delete => "delete",
            Action::Invalid(raw) => raw,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
