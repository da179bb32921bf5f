use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::domain::presentation::LoginView;
use crate::error::LinkServiceError;
use crate::handlers::AppJson;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::otc::IssueOtcUseCase;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginView>), LinkServiceError> {
    let usecase = LoginUseCase {
        authenticator: state.authenticator(),
        issuer: IssueOtcUseCase {
            otc_codes: state.otc_repo(),
            codes: state.code_generator(),
        },
    };
    let view = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}
