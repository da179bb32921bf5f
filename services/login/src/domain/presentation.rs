use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::{OTC_TTL_SECS, OtcBinding};

/// What the login screen shows.
///
/// `ShowingCode` is only reachable from a persisted binding, so a code is never
/// displayed without a durable record behind it. The view does not expire on its
/// own; the code may outlive its validity on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoginView {
    #[default]
    AwaitingLogin,
    ShowingCode {
        code: String,
        instruction: String,
        #[serde(serialize_with = "autopm_core::serde::to_rfc3339_ms")]
        expires_at: DateTime<Utc>,
        notice: String,
    },
}

impl LoginView {
    pub fn showing(binding: &OtcBinding) -> Self {
        Self::ShowingCode {
            code: binding.code.clone(),
            instruction: binding.instruction(),
            expires_at: binding.expires_at,
            notice: format!(
                "Send the command above in the Telegram group. This code expires in {} minutes.",
                OTC_TTL_SECS / 60
            ),
        }
    }

    /// User closed the code dialog.
    pub fn dismiss(self) -> Self {
        Self::AwaitingLogin
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::AwaitingLogin => None,
            Self::ShowingCode { code, .. } => Some(code),
        }
    }
}
