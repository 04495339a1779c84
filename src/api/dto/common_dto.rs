//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ServiceError;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of items to skip (≥ 0). Defaults to 0.
    #[serde(default)]
    #[param(minimum = 0)]
    pub skip: i64,
    /// Maximum items to return (1–1000). Defaults to 100.
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 1000)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    /// Checks the bounds and returns `(skip, limit)` as unsigned values.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if `skip` is negative or `limit`
    /// lies outside `1..=1000`.
    pub fn validated(&self) -> Result<(u64, u64), ServiceError> {
        let skip = u64::try_from(self.skip).map_err(|_| {
            ServiceError::Validation(format!("skip must be >= 0, got {}", self.skip))
        })?;
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ServiceError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        let limit = u64::try_from(self.limit).unwrap_or(1);
        Ok((skip, limit))
    }

    /// 1-based page number implied by the offset: `skip / limit + 1`.
    #[must_use]
    pub fn page(skip: u64, limit: u64) -> u64 {
        skip.checked_div(limit).unwrap_or(0).saturating_add(1)
    }
}
