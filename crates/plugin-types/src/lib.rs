//! Types shared between agent-platform plugins and the host that runs them.
//!
//! A plugin exposes one [`ToolProvider`] (credential validation) and one or
//! more [`Tool`]s (invocations). Everything that crosses the host boundary
//! here is serializable so the host, or a CLI standing in for it, can pass
//! it around as JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub mod descriptor;

pub use descriptor::{
    CredentialField, CredentialFieldType, ProviderDescriptor, ToolDescriptor,
};

/// A single message emitted by a tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolInvokeMessage {
    Text { text: String },
}

impl ToolInvokeMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ToolInvokeMessage::Text { text: text.into() }
    }

    /// The plain-text body of the message
    pub fn as_text(&self) -> &str {
        match self {
            ToolInvokeMessage::Text { text } => text,
        }
    }
}

impl fmt::Display for ToolInvokeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Caller-supplied parameters for one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolParameters(HashMap<String, Value>);

impl ToolParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, or `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Credential values stored by the host for a provider
///
/// Values are secrets; `Debug` prints only the keys.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(HashMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.0.keys().collect();
        keys.sort();
        f.debug_struct("Credentials")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

/// A tool the agent can call
#[async_trait]
pub trait Tool: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Static description of the tool and its parameters
    fn descriptor(&self) -> ToolDescriptor;

    /// Run the tool once. Messages are returned in emission order.
    async fn invoke(
        &self,
        parameters: ToolParameters,
    ) -> Result<Vec<ToolInvokeMessage>, Self::Error>;
}

/// The provider owning a set of tools and their shared credentials
#[async_trait]
pub trait ToolProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn descriptor(&self) -> ProviderDescriptor;

    /// Check that `credentials` are usable before the host stores them
    async fn validate_credentials(&self, credentials: &Credentials) -> Result<(), Self::Error>;
}
