//! Provider-level credential validation.

use async_trait::async_trait;
use plugin_types::{
    CredentialField, CredentialFieldType, Credentials, ProviderDescriptor, ToolProvider,
};

use crate::action::Action;
use crate::calendar_client::{CalendarConnector, GoogleConnector};
use crate::credentials::SERVICE_ACCOUNT_FIELD;
use crate::error::CredentialValidationError;
use crate::tool::{ActionOutcome, GoogleCalendarTool};

pub const PROVIDER_NAME: &str = "google";

/// Query sent with the validation fetch
pub const VALIDATION_QUERY: &str = "Check my events";

/// Owns the calendar tool and validates its credentials
#[derive(Debug, Clone, Default)]
pub struct GoogleCalendarProvider<C = GoogleConnector> {
    connector: C,
}

impl<C: CalendarConnector + Clone> GoogleCalendarProvider<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// A tool bound to `credentials`
    pub fn tool(&self, credentials: Credentials) -> GoogleCalendarTool<C> {
        GoogleCalendarTool::with_connector(credentials, self.connector.clone())
    }
}

/// Descriptor advertised to the host for this provider
pub fn provider_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        name: PROVIDER_NAME.to_string(),
        label: "Google Calendar".to_string(),
        description: "Access Google Calendar with a service account.".to_string(),
        credentials: vec![CredentialField {
            name: SERVICE_ACCOUNT_FIELD.to_string(),
            label: "Service account key (JSON)".to_string(),
            field_type: CredentialFieldType::SecretInput,
            required: true,
            help: Some(
                "Paste the JSON key of a service account that has access to the calendar."
                    .to_string(),
            ),
        }],
    }
}

#[async_trait]
impl<C: CalendarConnector + Clone> ToolProvider for GoogleCalendarProvider<C> {
    type Error = CredentialValidationError;

    fn descriptor(&self) -> ProviderDescriptor {
        provider_descriptor()
    }

    /// Runs one live `fetch` against the calendar. Any failure, including
    /// an API error that the tool would otherwise report as a message,
    /// rejects the credentials.
    async fn validate_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<(), CredentialValidationError> {
        let tool = self.tool(credentials.clone());

        match tool.dispatch(&Action::Fetch, VALIDATION_QUERY).await {
            Ok(ActionOutcome::Failed(err)) => {
                tracing::warn!("Credential check rejected by Google Calendar: {}", err);
                Err(CredentialValidationError::new(err))
            }
            Ok(outcome) => {
                let messages = outcome.into_messages();
                tracing::info!(
                    "Credential check succeeded ({} message(s))",
                    messages.len()
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Credential check failed: {}", err);
                Err(CredentialValidationError::new(err))
            }
        }
    }
}
