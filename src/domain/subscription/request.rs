//! Subscription request payload sent to the external API.

use serde::{Deserialize, Serialize};

use super::callback_token::CallbackToken;
use super::event_type::EventType;

/// Name under which the relay registers its subscription.
pub const SUBSCRIPTION_NAME: &str = "Feature Webhooks";

/// Notification payload version understood by the relay.
pub const NOTIFICATION_VERSION: u32 = 1;

/// Body of `POST /webhooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub data: SubscriptionRequestData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequestData {
    pub name: String,
    pub events: Vec<EventEntry>,
    pub notification: Notification,
}

/// One subscribed event type, wrapped the way the API expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(rename = "eventType")]
    pub event_type: EventType,
}

/// Where and how the API delivers notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub url: String,
    pub version: u32,
    pub headers: NotificationHeaders,
}

/// Headers the API attaches to every callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHeaders {
    pub authorization: String,
}

impl SubscriptionRequest {
    /// Builds the relay's subscription for all feature events.
    ///
    /// The API will echo `token` in the `Authorization` header of every
    /// callback it sends to `webhook_url`.
    pub fn for_feature_events(webhook_url: impl Into<String>, token: &CallbackToken) -> Self {
        Self {
            data: SubscriptionRequestData {
                name: SUBSCRIPTION_NAME.to_string(),
                events: EventType::ALL
                    .into_iter()
                    .map(|event_type| EventEntry { event_type })
                    .collect(),
                notification: Notification {
                    url: webhook_url.into(),
                    version: NOTIFICATION_VERSION,
                    headers: NotificationHeaders {
                        authorization: token.as_str().to_string(),
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_fixed_feature_subscription() {
        let token = CallbackToken::new("5c6b4e5e-1111-4222-8333-944444444444");
        let request =
            SubscriptionRequest::for_feature_events("https://relay.example.com/pbwebhook", &token);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "data": {
                    "name": "Feature Webhooks",
                    "events": [
                        { "eventType": "feature.created" },
                        { "eventType": "feature.updated" },
                        { "eventType": "feature.deleted" }
                    ],
                    "notification": {
                        "url": "https://relay.example.com/pbwebhook",
                        "version": 1,
                        "headers": {
                            "authorization": "5c6b4e5e-1111-4222-8333-944444444444"
                        }
                    }
                }
            })
        );
    }
}
