//! [`EventPublisher`] backed by the in-process [`EventBus`].

use async_trait::async_trait;

use super::{EventPublisher, PublishError};
use crate::domain::{EventBus, WishlistEvent};

#[async_trait]
impl EventPublisher for EventBus {
    async fn connect(&self) -> Result<(), PublishError> {
        Ok(())
    }

    async fn publish(&self, event: &WishlistEvent) -> Result<(), PublishError> {
        let receivers = self.send(event.clone());
        tracing::debug!(
            routing_key = event.routing_key(),
            wishlist_id = %event.data.wishlist_id,
            receivers,
            "wishlist event broadcast"
        );
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{WishlistEventType, WishlistId, WishlistItem};

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let publisher: &dyn EventPublisher = &bus;

        let item = WishlistItem {
            id: WishlistId::new(3),
            user_id: 1,
            product_variation_id: 100,
            product_name: None,
            product_price: None,
            product_image: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let Ok(()) = publisher.publish(&WishlistEvent::deleted(&item)).await else {
            panic!("publish failed");
        };

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type, WishlistEventType::Deleted);
        assert_eq!(event.data.wishlist_id, WishlistId::new(3));
    }

    #[tokio::test]
    async fn lifecycle_is_noop() {
        let bus = EventBus::new(8);
        assert!(bus.connect().await.is_ok());
        assert!(EventPublisher::close(&bus).await.is_ok());
    }
}
