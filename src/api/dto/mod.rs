//! Data Transfer Objects for REST request/response serialization.

pub mod common_dto;
pub mod wishlist_dto;

pub use common_dto::*;
pub use wishlist_dto::*;
