//! # wishlist-service
//!
//! Microservice that keeps a per-user wishlist of product variations and
//! announces changes to other services through AMQP events.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WishlistService (service/)
//!     │       │
//!     │       ├── WishlistRepository (persistence/) ── PostgreSQL
//!     │       │
//!     │       └── EventPublisher (events/) ── RabbitMQ
//!     │
//!     └── Domain model and events (domain/)
//! ```
//!
//! Creating an item is idempotent on `(user_id, product_variation_id)`.
//! Mutations publish `wishlist.*` events after the write commits; publish
//! failures are reported to the caller and never retried.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod persistence;
pub mod service;
