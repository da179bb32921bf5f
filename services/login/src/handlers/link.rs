use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use autopm_domain::id::{TelegramId, UserId};

use crate::domain::types::TelegramAccount;
use crate::error::LinkServiceError;
use crate::handlers::AppJson;
use crate::state::AppState;
use crate::usecase::redeem::{RedeemInput, RedeemUseCase};

pub const X_AUTOPM_BOT_KEY: &str = "x-autopm-bot-key";

#[derive(Deserialize)]
pub struct RedeemRequest {
    pub code: String,
    pub telegram_id: TelegramId,
    pub telegram_username: Option<String>,
}

#[derive(Serialize)]
pub struct RedeemResponse {
    pub user_id: UserId,
}

/// Only the Telegram bot may redeem codes; it authenticates with a shared key.
pub fn check_bot_key(headers: &HeaderMap, expected: &str) -> Result<(), LinkServiceError> {
    let presented = headers
        .get(X_AUTOPM_BOT_KEY)
        .and_then(|v| v.to_str().ok())
        .ok_or(LinkServiceError::InvalidBotKey)?;
    let matches: bool = presented.as_bytes().ct_eq(expected.as_bytes()).into();
    if expected.is_empty() || !matches {
        return Err(LinkServiceError::InvalidBotKey);
    }
    Ok(())
}

pub async fn redeem_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(body): AppJson<RedeemRequest>,
) -> Result<(StatusCode, Json<RedeemResponse>), LinkServiceError> {
    check_bot_key(&headers, &state.bot_api_key)?;

    let usecase = RedeemUseCase {
        otc_codes: state.otc_repo(),
    };
    let user_id = usecase
        .execute(RedeemInput {
            code: body.code,
            account: TelegramAccount {
                telegram_id: body.telegram_id,
                username: body.telegram_username,
            },
        })
        .await?;
    Ok((StatusCode::OK, Json(RedeemResponse { user_id })))
}
