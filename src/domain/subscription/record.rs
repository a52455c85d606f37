//! Subscription records as reported by the external API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event_type::EventType;

/// A subscription that exists on the external API.
///
/// Records are never cached; they are fetched again whenever the relay needs
/// to tear its subscriptions down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    pub name: String,

    #[serde(default)]
    pub events: Vec<RecordedEvent>,
}

/// Event entry of a listed subscription.
///
/// Kept as the raw wire name: the API may list subscriptions for event types
/// this relay never registers, and listing must not fail on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    #[serde(rename = "eventType")]
    pub event_type: String,
}

impl SubscriptionRecord {
    /// The feature event types this subscription covers.
    pub fn event_types(&self) -> Vec<EventType> {
        self.events
            .iter()
            .filter_map(|event| event.event_type.parse().ok())
            .collect()
    }
}

/// Body of `GET /webhooks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionList {
    pub data: Vec<SubscriptionRecord>,

    #[serde(default)]
    pub links: Option<ListLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLinks {
    pub next: Option<String>,
}
