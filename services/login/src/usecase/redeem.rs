use chrono::Utc;

use autopm_domain::id::UserId;
use autopm_domain::link::normalize_code;

use crate::domain::repository::OtcRepository;
use crate::domain::types::{Redemption, TelegramAccount};
use crate::error::LinkServiceError;

pub struct RedeemInput {
    pub code: String,
    pub account: TelegramAccount,
}

/// Redeem a one-time code on behalf of the Telegram bot and link the account.
pub struct RedeemUseCase<R: OtcRepository> {
    pub otc_codes: R,
}

impl<R: OtcRepository> RedeemUseCase<R> {
    pub async fn execute(&self, input: RedeemInput) -> Result<UserId, LinkServiceError> {
        let code = normalize_code(&input.code);
        if code.is_empty() {
            return Err(LinkServiceError::InvalidCode);
        }

        match self
            .otc_codes
            .redeem(&code, &input.account, Utc::now())
            .await?
        {
            Redemption::Claimed(binding) => {
                tracing::info!(
                    otc_id = %binding.id,
                    user_id = %binding.user_id,
                    telegram_id = %input.account.telegram_id,
                    "telegram account linked"
                );
                Ok(binding.user_id)
            }
            Redemption::NotFound => Err(LinkServiceError::InvalidCode),
            Redemption::AlreadyUsed => Err(LinkServiceError::CodeAlreadyUsed),
            Redemption::Expired => Err(LinkServiceError::CodeExpired),
        }
    }
}
