//! Display-side data model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::HealthResponse;

/// Overall backend health as shown in the API status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overall {
    Healthy,
    Unhealthy,
    Unreachable,
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overall::Healthy => write!(f, "Healthy"),
            Overall::Unhealthy => write!(f, "Unhealthy"),
            Overall::Unreachable => write!(f, "Offline"),
        }
    }
}

/// Connection indicator for a backend dependency (database, cache)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Ok,
    Fail,
    #[default]
    Unknown,
}

impl Indicator {
    /// Only the literal `"ok"` counts as connected
    pub fn from_check(value: &str) -> Self {
        if value == "ok" {
            Indicator::Ok
        } else {
            Indicator::Fail
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Ok => write!(f, "Connected"),
            Indicator::Fail => write!(f, "Connection failed"),
            Indicator::Unknown => write!(f, "Checking..."),
        }
    }
}

/// Result of the most recent health poll.
///
/// `overall` is `None` until the first poll completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    pub overall: Option<Overall>,
    pub database: Indicator,
    pub cache: Indicator,
}

impl HealthStatus {
    /// Apply a decoded health response.
    ///
    /// Checks missing from the response leave the matching indicator as it was.
    pub fn apply_response(&mut self, response: &HealthResponse) {
        self.overall = Some(if response.status.as_deref() == Some("healthy") {
            Overall::Healthy
        } else {
            Overall::Unhealthy
        });

        let Some(checks) = &response.checks else {
            return;
        };
        if let Some(database) = present(&checks.database) {
            self.database = Indicator::from_check(database);
        }
        if let Some(redis) = present(&checks.redis) {
            self.cache = Indicator::from_check(redis);
        }
    }

    /// The backend could not be reached or answered garbage
    pub fn mark_unreachable(&mut self) {
        self.overall = Some(Overall::Unreachable);
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A message as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Message {
    pub const DEFAULT_AUTHOR: &'static str = "Anonymous";

    pub fn author_or_default(&self) -> &str {
        present(&self.author).unwrap_or(Self::DEFAULT_AUTHOR)
    }
}

/// Message count from the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_messages: i64,
}

/// What the message list currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "messages", rename_all = "snake_case")]
pub enum MessagePane {
    #[default]
    Loading,
    Empty,
    Failed,
    Items(Vec<Message>),
}

impl From<Vec<Message>> for MessagePane {
    fn from(messages: Vec<Message>) -> Self {
        if messages.is_empty() {
            MessagePane::Empty
        } else {
            MessagePane::Items(messages)
        }
    }
}

/// Values posted from the message form by one visitor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageForm {
    pub author: String,
    pub content: String,
}

/// One-shot feedback for a message submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Sent,
    Rejected,
    NetworkError,
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Sent)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Sent => write!(f, "Message sent!"),
            Notice::Rejected => write!(f, "Failed to send message, please try again."),
            Notice::NetworkError => write!(f, "Network error, check the backend service."),
        }
    }
}
