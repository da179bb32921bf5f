use chrono::{DateTime, Duration, Utc};

use autopm_domain::id::{OtcId, TelegramId, UserId};
use autopm_domain::link::link_instruction;

/// Identity returned by the identity provider after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
}

/// Result of a signup call. Providers with email confirmation enabled create the
/// account but withhold the session until the address is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user_id: UserId,
    pub confirmation_required: bool,
}

/// One-time code bound to an identity, redeemable once via `/link <code>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtcBinding {
    pub id: OtcId,
    pub code: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtcBinding {
    /// Valid from issuance until (excluding) `expires_at`, and only while unused.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.created_at <= now && now < self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn instruction(&self) -> String {
        link_instruction(&self.code)
    }
}

/// Telegram account presented by the bot when redeeming a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramAccount {
    pub telegram_id: TelegramId,
    pub username: Option<String>,
}

impl TelegramAccount {
    pub fn username_or_unknown(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(UNKNOWN_TELEGRAM_USERNAME)
    }
}

/// Persisted association between a web account and a Telegram account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramLink {
    pub user_id: UserId,
    pub telegram_id: TelegramId,
    pub telegram_username: String,
    pub last_seen_at: DateTime<Utc>,
    pub valid: bool,
}

impl TelegramLink {
    pub fn new(user_id: UserId, account: &TelegramAccount, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            telegram_id: account.telegram_id,
            telegram_username: account.username_or_unknown().to_owned(),
            last_seen_at: now,
            valid: true,
        }
    }
}

/// Outcome of an atomic redemption attempt against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// The binding was unused and unexpired; it is now marked used and linked.
    Claimed(OtcBinding),
    NotFound,
    AlreadyUsed,
    Expired,
}

impl Redemption {
    /// Why a code could not be claimed, judged from the newest binding carrying
    /// it. A used binding reports `AlreadyUsed` even once it has also expired.
    /// An unused, unexpired binding that is still not claimable (issued after
    /// `now`) reports `NotFound`.
    pub fn classify(latest: Option<&OtcBinding>, now: DateTime<Utc>) -> Self {
        match latest {
            None => Self::NotFound,
            Some(b) if b.used_at.is_some() => Self::AlreadyUsed,
            Some(b) if b.is_expired_at(now) => Self::Expired,
            Some(_) => Self::NotFound,
        }
    }
}

/// One-time code length in characters.
pub const OTC_LEN: usize = 6;

/// One-time code time-to-live in seconds.
pub const OTC_TTL_SECS: i64 = 600;

/// Stored for Telegram accounts without a public username.
pub const UNKNOWN_TELEGRAM_USERNAME: &str = "unknown";

pub fn otc_ttl() -> Duration {
    Duration::seconds(OTC_TTL_SECS)
}
