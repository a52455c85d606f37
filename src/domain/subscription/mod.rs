//! Subscription module - the relay's registration with the external API.
//!
//! - `SubscriptionRequest` - payload sent when registering
//! - `SubscriptionRecord` - subscriptions the API reports back
//! - `CallbackToken` / `CallbackTokenState` - secret that authenticates callbacks
//! - `EventSummary` - what the relay logs about an inbound notification

mod callback_token;
mod errors;
mod event_type;
mod inbound_event;
mod record;
mod request;

pub use callback_token::{CallbackToken, CallbackTokenState};
pub use errors::SubscriptionError;
pub use event_type::{EventType, UnknownEventType};
pub use inbound_event::EventSummary;
pub use record::{ListLinks, RecordedEvent, SubscriptionList, SubscriptionRecord};
pub use request::{
    EventEntry, Notification, NotificationHeaders, SubscriptionRequest, SubscriptionRequestData,
    NOTIFICATION_VERSION, SUBSCRIPTION_NAME,
};
