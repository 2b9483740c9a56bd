//! The `google_calendar` tool: one action per invocation.

use async_trait::async_trait;
use chrono::Utc;
use plugin_types::{Credentials, Tool, ToolDescriptor, ToolInvokeMessage, ToolParameters};
use serde_json::json;

use crate::action::Action;
use crate::calendar_client::{
    CalendarConnector, CalendarService, CreatedEvent, EventListQuery, GoogleConnector, NewEvent,
    UpcomingEvent,
};
use crate::credentials::ServiceAccountCredentials;
use crate::error::{CalendarError, PluginError};

pub const TOOL_NAME: &str = "google_calendar";

/// Every action operates on the authenticated identity's default calendar
pub const PRIMARY_CALENDAR: &str = "primary";

/// Cap on events returned by `fetch`
pub const MAX_UPCOMING_EVENTS: i32 = 5;

/// How one invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Invalid(String),
    Fetched(Vec<UpcomingEvent>),
    Created(CreatedEvent),
    DeleteNoted,
    Failed(CalendarError),
}

impl ActionOutcome {
    /// Render the outcome as the chat messages returned to the host
    pub fn into_messages(self) -> Vec<ToolInvokeMessage> {
        let text = match self {
            ActionOutcome::Invalid(raw) => format!(
                "Invalid action: {}. Must be one of create, fetch, delete.",
                raw
            ),
            ActionOutcome::Fetched(events) if events.is_empty() => {
                "No upcoming events found.".to_string()
            }
            ActionOutcome::Fetched(events) => {
                let formatted = events
                    .iter()
                    .map(|event| {
                        format!(
                            "{} at {}",
                            event.summary.as_deref().unwrap_or("(no title)"),
                            event.start
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Upcoming events:\n{}", formatted)
            }
            ActionOutcome::Created(created) => format!(
                "Event created: {}",
                created.html_link.as_deref().unwrap_or("(no link returned)")
            ),
            ActionOutcome::DeleteNoted => {
                "Delete action requires event ID and is not implemented here.".to_string()
            }
            ActionOutcome::Failed(err) => format!("Google Calendar error: {}", err),
        };

        vec![ToolInvokeMessage::text(text)]
    }
}

/// Dispatches calendar actions for one set of stored credentials
pub struct GoogleCalendarTool<C = GoogleConnector> {
    credentials: Credentials,
    connector: C,
}

impl GoogleCalendarTool<GoogleConnector> {
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self::with_connector(credentials, GoogleConnector::default())
    }
}

impl<C: CalendarConnector> GoogleCalendarTool<C> {
    pub fn with_connector(credentials: Credentials, connector: C) -> Self {
        Self {
            credentials,
            connector,
        }
    }

    /// Run `action` once
    ///
    /// Invalid actions return before any authentication. Credential and
    /// authenticator failures are returned as errors; calendar API failures
    /// become [`ActionOutcome::Failed`].
    pub async fn dispatch(&self, action: &Action, query: &str) -> Result<ActionOutcome, PluginError> {
        tracing::info!("Dispatching calendar action: {}", action);

        let outcome = match action {
            Action::Invalid(raw) => {
                tracing::info!("Rejected unknown calendar action '{}'", raw);
                ActionOutcome::Invalid(raw.clone())
            }
            Action::Fetch => {
                let service = self.connect().await?;
                match fetch_upcoming(service.as_ref()).await {
                    Ok(events) => ActionOutcome::Fetched(events),
                    Err(e) => ActionOutcome::Failed(e),
                }
            }
            Action::Create => {
                let service = self.connect().await?;
                match create_quick_event(service.as_ref(), query).await {
                    Ok(created) => ActionOutcome::Created(created),
                    Err(e) => ActionOutcome::Failed(e),
                }
            }
            Action::Delete => {
                let _service = self.connect().await?;
                ActionOutcome::DeleteNoted
            }
        };

        if let ActionOutcome::Failed(ref e) = outcome {
            tracing::warn!("Google Calendar {} failed: {}", action, e);
        }

        Ok(outcome)
    }

    async fn connect(&self) -> Result<Box<dyn CalendarService>, PluginError> {
        let credentials = ServiceAccountCredentials::from_credentials(&self.credentials)?;
        self.connector.connect(credentials).await
    }
}

async fn fetch_upcoming(service: &dyn CalendarService) -> Result<Vec<UpcomingEvent>, CalendarError> {
    let query = EventListQuery {
        calendar_id: PRIMARY_CALENDAR.to_string(),
        time_min: Utc::now(),
        max_results: MAX_UPCOMING_EVENTS,
    };
    tracing::debug!("Listing events: {:?}", query);

    let events = service.list_events(&query).await?;
    tracing::info!("Fetched {} upcoming events", events.len());
    Ok(events)
}

async fn create_quick_event(
    service: &dyn CalendarService,
    description: &str,
) -> Result<CreatedEvent, CalendarError> {
    let event = NewEvent::quick(description, Utc::now());
    tracing::debug!("Inserting event {} -> {}", event.start, event.end);
    service.insert_event(PRIMARY_CALENDAR, &event).await
}

/// Descriptor advertised to the host for this tool
pub fn tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        label: "Google Calendar".to_string(),
        description: "List upcoming events on the primary Google Calendar or create a \
                      one-hour event starting in an hour."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["create", "fetch", "delete"],
                    "description": "The calendar operation to perform."
                },
                "query": {
                    "type": "string",
                    "description": "Free text used as the description of a created event."
                }
            },
            "required": ["action"],
            "additionalProperties": false
        }),
    }
}

#[async_trait]
impl<C: CalendarConnector> Tool for GoogleCalendarTool<C> {
    type Error = PluginError;

    fn descriptor(&self) -> ToolDescriptor {
        tool_descriptor()
    }

    async fn invoke(&self, parameters: ToolParameters) -> Result<Vec<ToolInvokeMessage>, PluginError> {
        let action = Action::parse(parameters.get_str("action").unwrap_or_default());
        let query = parameters.get_str("query").unwrap_or_default();

        Ok(self.dispatch(&action, query).await?.into_messages())
    }
}
