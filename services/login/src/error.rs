use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Login service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum LinkServiceError {
    /// Identity provider rejected the credentials. Carries the provider's message
    /// verbatim so the user sees exactly why.
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("authentication provider unavailable")]
    AuthenticatorUnavailable(#[source] anyhow::Error),
    #[error("unable to get user id")]
    MissingIdentity,
    #[error("{0}")]
    InvalidSignup(String),
    #[error("otc creation failed")]
    OtcPersistenceFailed(#[source] anyhow::Error),
    #[error("invalid code")]
    InvalidCode,
    #[error("code already used")]
    CodeAlreadyUsed,
    #[error("code expired")]
    CodeExpired,
    #[error("invalid bot key")]
    InvalidBotKey,
    /// Request body could not be read as the expected JSON.
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LinkServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::AuthenticatorUnavailable(_) => "AUTHENTICATOR_UNAVAILABLE",
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::InvalidSignup(_) => "INVALID_SIGNUP",
            Self::OtcPersistenceFailed(_) => "OTC_PERSISTENCE_FAILED",
            Self::InvalidCode => "INVALID_CODE",
            Self::CodeAlreadyUsed => "CODE_ALREADY_USED",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::InvalidBotKey => "INVALID_BOT_KEY",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials(_) | Self::InvalidBotKey => StatusCode::UNAUTHORIZED,
            Self::AuthenticatorUnavailable(_) | Self::MissingIdentity => StatusCode::BAD_GATEWAY,
            Self::InvalidSignup(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCode => StatusCode::NOT_FOUND,
            Self::CodeAlreadyUsed => StatusCode::CONFLICT,
            Self::CodeExpired => StatusCode::GONE,
            Self::InvalidRequest { status, .. } => *status,
            Self::OtcPersistenceFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for LinkServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for LinkServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors and already visible through TraceLayer.
        // Upstream and store failures need their anyhow chain logged.
        match &self {
            Self::AuthenticatorUnavailable(e)
            | Self::OtcPersistenceFailed(e)
            | Self::Internal(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "request failed");
            }
            Self::MissingIdentity => {
                tracing::error!(kind = self.kind(), "identity provider returned no user id");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
