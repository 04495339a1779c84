//! Event publication: the seam between wishlist mutations and the broker.
//!
//! [`EventPublisher`] has a two-phase lifecycle: [`EventPublisher::connect`]
//! once at startup, [`EventPublisher::close`] once at shutdown. The process
//! holds a single instance, injected into handlers through
//! [`crate::app_state::AppState`].
//!
//! Implementations:
//! - [`amqp::AmqpPublisher`]: RabbitMQ via `lapin`.
//! - [`crate::domain::EventBus`]: in-process broadcast (see [`broadcast`]).

pub mod amqp;
pub mod broadcast;

use async_trait::async_trait;

use crate::domain::WishlistEvent;

pub use amqp::AmqpPublisher;

/// Failure to deliver a [`WishlistEvent`].
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Connecting, opening a channel or declaring the exchange failed.
    #[error("broker connection failed: {0}")]
    Connection(#[source] lapin::Error),

    /// The event could not be serialized to JSON.
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker refused or dropped the message.
    #[error("broker rejected publish: {0}")]
    Broker(#[source] lapin::Error),

    /// A fresh session was opened but its channel is not usable.
    #[error("broker channel unavailable after reconnect attempt")]
    ChannelUnavailable,
}

/// Delivers wishlist events to downstream consumers.
///
/// Publishing is fire-and-forget: nothing beyond the transport accepting
/// the message is awaited, and failures are returned to the caller rather
/// than retried.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug {
    /// Establishes the transport. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Connection`] if the transport is unreachable.
    async fn connect(&self) -> Result<(), PublishError>;

    /// Publishes one event, connecting first if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the event cannot be serialized or
    /// delivered.
    async fn publish(&self, event: &WishlistEvent) -> Result<(), PublishError>;

    /// Tears the transport down. A no-op when not connected.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the transport fails to close cleanly.
    async fn close(&self) -> Result<(), PublishError>;
}
