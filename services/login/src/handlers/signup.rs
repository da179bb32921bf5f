use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use autopm_domain::id::UserId;

use crate::error::LinkServiceError;
use crate::handlers::AppJson;
use crate::state::AppState;
use crate::usecase::signup::{SignUpInput, SignUpUseCase};

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub user_id: UserId,
    pub confirmation_required: bool,
}

pub async fn signup(
    State(state): State<AppState>,
    AppJson(body): AppJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), LinkServiceError> {
    let usecase = SignUpUseCase {
        authenticator: state.authenticator(),
    };
    let outcome = usecase
        .execute(SignUpInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: outcome.user_id,
            confirmation_required: outcome.confirmation_required,
        }),
    ))
}
