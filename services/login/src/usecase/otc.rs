use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use autopm_domain::id::{OtcId, UserId};

use crate::domain::repository::{CodeGenerator, OtcRepository};
use crate::domain::types::{OTC_LEN, OtcBinding, otc_ttl};
use crate::error::LinkServiceError;

/// Charset for one-time codes: uppercase alphanumeric without `0 O 1 I`, which
/// are easily confused when a code is retyped into a chat.
pub const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTC_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Thread-local RNG backed generator used in production.
#[derive(Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

pub struct IssueOtcUseCase<R, G>
where
    R: OtcRepository,
    G: CodeGenerator,
{
    pub otc_codes: R,
    pub codes: G,
}

impl<R, G> IssueOtcUseCase<R, G>
where
    R: OtcRepository,
    G: CodeGenerator,
{
    /// Mint a code for an already authenticated user and persist it.
    ///
    /// The binding is only returned once the insert succeeded; a failed write
    /// surfaces as `OtcPersistenceFailed` and no code leaves this function.
    pub async fn execute(&self, user_id: UserId) -> Result<OtcBinding, LinkServiceError> {
        let now = Utc::now();
        let binding = OtcBinding {
            id: OtcId(Uuid::new_v4()),
            code: self.codes.generate(),
            user_id,
            expires_at: now + otc_ttl(),
            used_at: None,
            created_at: now,
        };

        self.otc_codes
            .insert(&binding)
            .await
            .map_err(into_persistence_failure)?;

        tracing::info!(otc_id = %binding.id, user_id = %user_id, "issued one-time code");
        Ok(binding)
    }
}

fn into_persistence_failure(err: LinkServiceError) -> LinkServiceError {
    match err {
        LinkServiceError::Internal(e) => LinkServiceError::OtcPersistenceFailed(e),
        other => other,
    }
}
