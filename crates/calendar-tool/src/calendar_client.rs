//! Google Calendar API access.
//!
//! [`CalendarConnector`] turns service-account credentials into a
//! [`CalendarService`] handle. The production pair is [`GoogleConnector`] and
//! [`GoogleCalendarClient`], which talk to the Calendar v3 API through
//! `google-calendar3`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Offset, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{Event, EventDateTime};
use google_calendar3::hyper_rustls::HttpsConnector;
use google_calendar3::CalendarHub;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::fmt;

use crate::credentials::{ServiceAccountCredentials, CALENDAR_SCOPE};
use crate::error::{CalendarError, PluginError};

/// Summary given to every event created through the tool
pub const QUICK_EVENT_SUMMARY: &str = "Quick Event";

/// Time zone written on created events
pub const QUICK_EVENT_TIME_ZONE: &str = "UTC";

/// Parameters of an upcoming-events listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListQuery {
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub max_results: i32,
}

/// Start of an event as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStart {
    /// Timed event; `time_zone` is the IANA zone the API sent with it
    DateTime {
        at: DateTime<Utc>,
        time_zone: Option<String>,
    },
    /// All-day event
    Date(NaiveDate),
    Unspecified,
}

impl EventStart {
    pub fn date_time(at: DateTime<Utc>, time_zone: Option<&str>) -> Self {
        EventStart::DateTime {
            at,
            time_zone: time_zone.map(str::to_string),
        }
    }
}

/// RFC 3339 in the event's own zone, `Z` when the zone is UTC or unknown
fn format_in_zone(at: &DateTime<Utc>, time_zone: Option<&str>) -> String {
    match time_zone.and_then(|name| name.parse::<Tz>().ok()) {
        Some(Tz::UTC) | Some(Tz::Etc__UTC) | None => {
            at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        }
        Some(tz) => {
            let offset = tz.offset_from_utc_datetime(&at.naive_utc()).fix();
            at.with_timezone(&offset).to_rfc3339_opts(SecondsFormat::AutoSi, false)
        }
    }
}

impl fmt::Display for EventStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStart::DateTime { at, time_zone } => {
                f.write_str(&format_in_zone(at, time_zone.as_deref()))
            }
            EventStart::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            EventStart::Unspecified => f.write_str("unspecified"),
        }
    }
}

/// An event returned from a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEvent {
    pub summary: Option<String>,
    pub start: EventStart,
}

impl From<Event> for UpcomingEvent {
    fn from(event: Event) -> Self {
        let start = match event.start {
            Some(EventDateTime {
                date_time: Some(at),
                time_zone,
                ..
            }) => EventStart::DateTime { at, time_zone },
            Some(EventDateTime {
                date: Some(date), ..
            }) => EventStart::Date(date),
            _ => EventStart::Unspecified,
        };

        UpcomingEvent {
            summary: event.summary,
            start,
        }
    }
}

/// Event to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub time_zone: String,
}

impl NewEvent {
    /// The fixed one-hour event starting an hour from `now`
    pub fn quick(description: &str, now: DateTime<Utc>) -> Self {
        NewEvent {
            summary: QUICK_EVENT_SUMMARY.to_string(),
            description: description.to_string(),
            start: now + Duration::hours(1),
            end: now + Duration::hours(2),
            time_zone: QUICK_EVENT_TIME_ZONE.to_string(),
        }
    }
}

impl From<&NewEvent> for Event {
    fn from(event: &NewEvent) -> Self {
        Event {
            summary: Some(event.summary.clone()),
            description: Some(event.description.clone()),
            start: Some(EventDateTime {
                date_time: Some(event.start),
                time_zone: Some(event.time_zone.clone()),
                ..Default::default()
            }),
            end: Some(EventDateTime {
                date_time: Some(event.end),
                time_zone: Some(event.time_zone.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Result of a successful insert
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatedEvent {
    pub id: Option<String>,
    pub html_link: Option<String>,
}

/// Authenticated access to one calendar account
#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn list_events(&self, query: &EventListQuery) -> Result<Vec<UpcomingEvent>, CalendarError>;

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, CalendarError>;
}

/// Builds a [`CalendarService`] from credentials
#[async_trait]
pub trait CalendarConnector: Send + Sync {
    async fn connect(
        &self,
        credentials: ServiceAccountCredentials,
    ) -> Result<Box<dyn CalendarService>, PluginError>;
}

/// Client for interacting with Google Calendar API
pub struct GoogleCalendarClient {
    hub: CalendarHub<HttpsConnector<HttpConnector>>,
}

impl GoogleCalendarClient {
    /// Authenticate as the service account and build the API hub
    ///
    /// No request is made here; the token is fetched on the first call.
    pub async fn new(
        credentials: ServiceAccountCredentials,
        api_root_url: Option<&str>,
    ) -> Result<Self, PluginError> {
        tracing::debug!(
            "Building calendar client for service account {}",
            credentials.client_email()
        );

        let auth =
            google_calendar3::yup_oauth2::ServiceAccountAuthenticator::builder(credentials.into_key())
                .build()
                .await
                .map_err(|e| PluginError::auth_construction(e.to_string()))?;

        let connector = google_calendar3::hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);
        let mut hub = CalendarHub::new(client, auth);

        if let Some(root) = api_root_url {
            let root = if root.ends_with('/') {
                root.to_string()
            } else {
                format!("{}/", root)
            };
            hub.base_url(format!("{}calendar/v3/", root));
            hub.root_url(root);
        }

        Ok(Self { hub })
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn list_events(&self, query: &EventListQuery) -> Result<Vec<UpcomingEvent>, CalendarError> {
        let (_, events) = self
            .hub
            .events()
            .list(&query.calendar_id)
            .time_min(query.time_min)
            .max_results(query.max_results)
            .single_events(true)
            .order_by("startTime")
            .add_scope(CALENDAR_SCOPE)
            .doit()
            .await?;

        Ok(events
            .items
            .unwrap_or_default()
            .into_iter()
            .map(UpcomingEvent::from)
            .collect())
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, CalendarError> {
        let (_, created) = self
            .hub
            .events()
            .insert(Event::from(event), calendar_id)
            .add_scope(CALENDAR_SCOPE)
            .doit()
            .await?;

        tracing::info!("Created calendar event: {} (id: {:?})", event.summary, created.id);

        Ok(CreatedEvent {
            id: created.id,
            html_link: created.html_link,
        })
    }
}

/// Connects to the real Google Calendar API
#[derive(Debug, Clone, Default)]
pub struct GoogleConnector {
    api_root_url: Option<String>,
}

impl GoogleConnector {
    pub fn new(api_root_url: Option<String>) -> Self {
        Self { api_root_url }
    }
}

#[async_trait]
impl CalendarConnector for GoogleConnector {
    async fn connect(
        &self,
        credentials: ServiceAccountCredentials,
    ) -> Result<Box<dyn CalendarService>, PluginError> {
        let client = GoogleCalendarClient::new(credentials, self.api_root_url.as_deref()).await?;
        Ok(Box::new(client))
    }
}
