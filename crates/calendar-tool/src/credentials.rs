//! Service-account credential parsing.

use google_calendar3::yup_oauth2::ServiceAccountKey;
use plugin_types::Credentials;
use std::fmt;

use crate::error::PluginError;

/// OAuth scope requested for every calendar handle (full read/write)
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Credential field holding the JSON-encoded service-account key
pub const SERVICE_ACCOUNT_FIELD: &str = "google_service_account";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// A parsed service-account key, built fresh for each invocation
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    key: ServiceAccountKey,
}

impl ServiceAccountCredentials {
    /// Parse the key stored under [`SERVICE_ACCOUNT_FIELD`]
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, PluginError> {
        let raw = credentials.get(SERVICE_ACCOUNT_FIELD).ok_or_else(|| {
            PluginError::credential_parse(format!("missing `{}`", SERVICE_ACCOUNT_FIELD))
        })?;
        Self::from_json(raw)
    }

    /// Parse a service-account key document
    ///
    /// Non-JSON input is a [`PluginError::CredentialParse`]; JSON that is not
    /// a service-account key is a [`PluginError::AuthConstruction`].
    pub fn from_json(raw: &str) -> Result<Self, PluginError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| PluginError::credential_parse(e.to_string()))?;

        let key: ServiceAccountKey = serde_json::from_value(value)
            .map_err(|e| PluginError::auth_construction(e.to_string()))?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != SERVICE_ACCOUNT_TYPE {
                return Err(PluginError::auth_construction(format!(
                    "expected credential type `{}`, got `{}`",
                    SERVICE_ACCOUNT_TYPE, key_type
                )));
            }
        }

        if key.client_email.trim().is_empty() {
            return Err(PluginError::auth_construction("`client_email` is empty"));
        }

        Ok(Self { key })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn into_key(self) -> ServiceAccountKey {
        self.key
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.key.client_email)
            .field("project_id", &self.key.project_id)
            .finish_non_exhaustive()
    }
}
