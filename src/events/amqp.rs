//! RabbitMQ publisher built on `lapin`.
//!
//! Known defect, kept for compatibility with existing consumers: the
//! publisher declares a durable topic exchange but publishes to the
//! default exchange (`""`) with the event type as routing key. Messages
//! therefore reach a queue only if one is named exactly after the event
//! type; bindings on the declared exchange never see them.

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use tokio::sync::Mutex;

use super::{EventPublisher, PublishError};
use crate::domain::WishlistEvent;
use crate::domain::wishlist_event::EVENT_SOURCE_SERVICE;

/// Exchange messages are actually published to.
const DEFAULT_EXCHANGE: &str = "";

/// AMQP `delivery_mode` for messages persisted to disk by the broker.
const PERSISTENT_DELIVERY_MODE: u8 = 2;

/// An open connection and the channel used for publishing.
struct AmqpSession {
    connection: Connection,
    channel: Channel,
}

impl AmqpSession {
    fn is_usable(&self) -> bool {
        self.connection.status().connected() && self.channel.status().connected()
    }

    /// Closes a session that is being replaced.
    ///
    /// A channel can fail while its connection stays open, and lapin keeps
    /// the connection's IO loop running until it is closed explicitly.
    async fn retire(self) {
        if !self.connection.status().connected() {
            return;
        }
        if let Err(error) = self.connection.close(200, "replacing broker session").await {
            tracing::warn!(%error, "failed to close stale broker connection");
        }
    }
}

/// Process-wide AMQP publisher.
///
/// Holds at most one session. When the session is missing or has dropped,
/// [`EventPublisher::publish`] makes exactly one attempt to open a new one
/// before giving up, so a persistent outage surfaces as an error instead of
/// being retried in a loop.
pub struct AmqpPublisher {
    url: String,
    exchange: String,
    session: Mutex<Option<AmqpSession>>,
}

impl fmt::Debug for AmqpPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmqpPublisher")
            .field("exchange", &self.exchange)
            .finish_non_exhaustive()
    }
}

impl AmqpPublisher {
    /// Creates a disconnected publisher for the broker at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            exchange: exchange.into(),
            session: Mutex::new(None),
        }
    }

    /// Name of the declared topic exchange.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Returns `true` if a usable session is currently held.
    pub async fn is_connected(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .is_some_and(AmqpSession::is_usable)
    }

    async fn open_session(&self) -> Result<AmqpSession, PublishError> {
        let connection = Connection::connect(&self.url, ConnectionProperties::default())
            .await
            .map_err(PublishError::Connection)?;
        let channel = connection
            .create_channel()
            .await
            .map_err(PublishError::Connection)?;

        channel
            .exchange_declare(
                &self.exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(PublishError::Connection)?;

        tracing::info!(exchange = %self.exchange, "connected to message broker");
        Ok(AmqpSession {
            connection,
            channel,
        })
    }

    /// Returns a publishing channel, opening a session at most once.
    async fn channel(&self) -> Result<Channel, PublishError> {
        let mut session = self.session.lock().await;
        match session.as_ref() {
            Some(current) if current.is_usable() => return Ok(current.channel.clone()),
            Some(_) => tracing::warn!("broker session lost; attempting a single reconnect"),
            None => tracing::debug!("publisher not connected; connecting lazily"),
        }

        if let Some(stale) = session.take() {
            stale.retire().await;
        }
        let fresh = self.open_session().await?;
        if !fresh.is_usable() {
            return Err(PublishError::ChannelUnavailable);
        }
        let channel = fresh.channel.clone();
        *session = Some(fresh);
        Ok(channel)
    }
}

#[async_trait]
impl EventPublisher for AmqpPublisher {
    async fn connect(&self) -> Result<(), PublishError> {
        let mut session = self.session.lock().await;
        if session.as_ref().is_some_and(AmqpSession::is_usable) {
            return Ok(());
        }
        if let Some(stale) = session.take() {
            stale.retire().await;
        }
        *session = Some(self.open_session().await?);
        Ok(())
    }

    async fn publish(&self, event: &WishlistEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;
        let channel = self.channel().await?;

        let properties = BasicProperties::default()
            .with_content_type("application/json".into())
            .with_delivery_mode(PERSISTENT_DELIVERY_MODE)
            .with_message_id(uuid::Uuid::new_v4().to_string().into())
            .with_app_id(EVENT_SOURCE_SERVICE.into())
            .with_timestamp(u64::try_from(Utc::now().timestamp()).unwrap_or_default());

        channel
            .basic_publish(
                DEFAULT_EXCHANGE,
                event.routing_key(),
                BasicPublishOptions::default(),
                &payload,
                properties,
            )
            .await
            .map_err(PublishError::Broker)?
            .await
            .map_err(PublishError::Broker)?;

        tracing::debug!(
            routing_key = event.routing_key(),
            wishlist_id = %event.data.wishlist_id,
            "wishlist event published"
        );
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        let Some(session) = self.session.lock().await.take() else {
            return Ok(());
        };
        if !session.connection.status().connected() {
            return Ok(());
        }
        session
            .connection
            .close(200, "wishlist-service shutting down")
            .await
            .map_err(PublishError::Connection)?;
        tracing::info!("broker connection closed");
        Ok(())
    }
}
