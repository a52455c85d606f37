//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionRepository` - the external API's webhook subscriptions
//! - `TokenGenerator` - source of callback tokens

mod subscription_repository;
mod token_generator;

pub use subscription_repository::SubscriptionRepository;
pub use token_generator::TokenGenerator;
