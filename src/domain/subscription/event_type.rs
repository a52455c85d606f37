//! Feature event types the relay subscribes to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Event types offered by the external API for features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "feature.created")]
    FeatureCreated,

    #[serde(rename = "feature.updated")]
    FeatureUpdated,

    #[serde(rename = "feature.deleted")]
    FeatureDeleted,
}

impl EventType {
    /// Every event type, in registration order.
    pub const ALL: [EventType; 3] = [
        EventType::FeatureCreated,
        EventType::FeatureUpdated,
        EventType::FeatureDeleted,
    ];

    /// Returns the wire name of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::FeatureCreated => "feature.created",
            EventType::FeatureUpdated => "feature.updated",
            EventType::FeatureDeleted => "feature.deleted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a wire name is not one of the feature event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}
