#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{Identity, OtcBinding, Redemption, SignUpOutcome, TelegramAccount};
use crate::error::LinkServiceError;

/// Port to the hosted identity provider.
///
/// `sign_in` fails with `InvalidCredentials` for rejected credentials and
/// `AuthenticatorUnavailable` for transport or upstream failures.
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, LinkServiceError>;

    async fn sign_up(&self, email: &str, password: &str)
    -> Result<SignUpOutcome, LinkServiceError>;
}

/// Store of pending one-time code bindings.
pub trait OtcRepository: Send + Sync {
    /// Insert a binding as a single atomic write.
    async fn insert(&self, binding: &OtcBinding) -> Result<(), LinkServiceError>;

    /// Claim the binding for `code` if it is unused and unexpired at `now`, and
    /// upsert the Telegram link for its user, in one transaction.
    ///
    /// A code is claimed at most once, even under concurrent calls.
    async fn redeem(
        &self,
        code: &str,
        account: &TelegramAccount,
        now: DateTime<Utc>,
    ) -> Result<Redemption, LinkServiceError>;

    /// Delete bindings whose expiry is at or before `now`. Returns rows deleted.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError>;
}

/// Source of one-time code strings.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}
