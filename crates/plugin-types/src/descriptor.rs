//! Static descriptors the host reads to discover providers and tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of input the host renders for a credential field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialFieldType {
    SecretInput,
    TextInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: CredentialFieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub label: String,
    pub description: String,
    pub credentials: Vec<CredentialField>,
}

impl ProviderDescriptor {
    /// Look up a credential field by name
    pub fn credential(&self, name: &str) -> Option<&CredentialField> {
        self.credentials.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub label: String,
    pub description: String,
    /// JSON schema of the invocation parameters
    pub parameters: Value,
}
