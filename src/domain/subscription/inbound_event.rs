//! Event notifications delivered by the external API.
//!
//! Payloads are not held to a schema; the relay only needs a few fields to
//! say in its logs what arrived.

use serde_json::{Map, Value};

/// Loggable summary of a feature event notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub id: Option<String>,
    pub event_type: Option<String>,
    pub target: Option<String>,
}

impl EventSummary {
    /// Picks `data.id`, `data.eventType` and `data.links.target` out of a
    /// notification body. Missing or non-string fields are left empty.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let data = payload.get("data");
        let text = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);

        Self {
            id: text(data.and_then(|d| d.get("id"))),
            event_type: text(data.and_then(|d| d.get("eventType"))),
            target: text(
                data.and_then(|d| d.get("links"))
                    .and_then(|links| links.get("target")),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn summarises_feature_notification() {
        let payload = object(json!({
            "data": {
                "id": "a3f1d2c4-0000-4000-8000-000000000001",
                "eventType": "feature.updated",
                "links": { "target": "https://api.productboard.com/features/a3f1" }
            }
        }));

        let summary = EventSummary::from_payload(&payload);
        assert_eq!(summary.id.as_deref(), Some("a3f1d2c4-0000-4000-8000-000000000001"));
        assert_eq!(summary.event_type.as_deref(), Some("feature.updated"));
        assert_eq!(
            summary.target.as_deref(),
            Some("https://api.productboard.com/features/a3f1")
        );
    }

    #[test]
    fn empty_object_yields_empty_summary() {
        let summary = EventSummary::from_payload(&Map::new());
        assert_eq!(summary, EventSummary::default());
    }

    #[test]
    fn non_string_fields_are_ignored() {
        let payload = object(json!({ "data": { "id": 42, "eventType": null } }));
        let summary = EventSummary::from_payload(&payload);
        assert!(summary.id.is_none());
        assert!(summary.event_type.is_none());
    }
}
