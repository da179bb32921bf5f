use chrono::{DateTime, Utc};

use crate::domain::repository::OtcRepository;
use crate::error::LinkServiceError;

/// Delete bindings that expired without (or after) being redeemed.
pub struct ReapExpiredUseCase<R: OtcRepository> {
    pub otc_codes: R,
}

impl<R: OtcRepository> ReapExpiredUseCase<R> {
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError> {
        let deleted = self.otc_codes.delete_expired(now).await?;
        if deleted > 0 {
            tracing::info!(deleted, "reaped expired one-time codes");
        }
        Ok(deleted)
    }
}
