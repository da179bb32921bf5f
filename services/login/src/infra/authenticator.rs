//! Identity provider client for a Supabase (GoTrue) auth API.

use std::time::Duration;

use anyhow::Context as _;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use autopm_domain::id::UserId;

use crate::domain::repository::Authenticator;
use crate::domain::types::{Identity, SignUpOutcome};
use crate::error::LinkServiceError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct SupabaseAuthenticator {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuthenticator {
    pub fn new(base_url: &str, anon_key: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build identity provider client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            anon_key,
        })
    }

    async fn post(
        &self,
        path: &str,
        body: &Credentials<'_>,
    ) -> anyhow::Result<(StatusCode, String)> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {path}"))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .with_context(|| format!("read body of POST {path}"))?;
        Ok((status, text))
    }
}

impl Authenticator for SupabaseAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, LinkServiceError> {
        let (status, body) = self
            .post(
                "/auth/v1/token?grant_type=password",
                &Credentials { email, password },
            )
            .await
            .map_err(LinkServiceError::AuthenticatorUnavailable)?;

        if let Some(err) =
            failure_for_status(status, &body, "sign-in", LinkServiceError::InvalidCredentials)
        {
            return Err(err);
        }
        parse_sign_in(&body)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, LinkServiceError> {
        let (status, body) = self
            .post("/auth/v1/signup", &Credentials { email, password })
            .await
            .map_err(LinkServiceError::AuthenticatorUnavailable)?;

        if let Some(err) =
            failure_for_status(status, &body, "signup", LinkServiceError::InvalidSignup)
        {
            return Err(err);
        }
        parse_sign_up(&body)
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ProviderUser {
    id: Option<String>,
    email: Option<String>,
}

#[derive(Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
    user: Option<ProviderUser>,
    /// Signup without a session returns the user object at the top level.
    id: Option<String>,
}

/// Provider error bodies come in several shapes depending on the API version.
#[derive(Deserialize, Default)]
struct ProviderError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

fn error_message(body: &str) -> String {
    let err: ProviderError = serde_json::from_str(body).unwrap_or_default();
    err.msg
        .or(err.message)
        .or(err.error_description)
        .or(err.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "authentication failed".to_owned())
}

/// Map a non-2xx provider status to an error. Rate limiting and request timeouts
/// are transient; any other 4xx is a rejection of the request, surfaced with the
/// provider's message via `rejected`.
fn failure_for_status(
    status: StatusCode,
    body: &str,
    operation: &str,
    rejected: fn(String) -> LinkServiceError,
) -> Option<LinkServiceError> {
    if status.is_success() {
        return None;
    }
    let transient = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT
    );
    if status.is_client_error() && !transient {
        return Some(rejected(error_message(body)));
    }
    Some(LinkServiceError::AuthenticatorUnavailable(anyhow::anyhow!(
        "{operation} returned {status}: {}",
        error_message(body)
    )))
}

fn parse_user_id(raw: Option<String>) -> Result<UserId, LinkServiceError> {
    let raw = raw
        .filter(|id| !id.is_empty())
        .ok_or(LinkServiceError::MissingIdentity)?;
    raw.parse().map_err(|e| {
        LinkServiceError::AuthenticatorUnavailable(anyhow::anyhow!(
            "provider returned malformed user id {raw:?}: {e}"
        ))
    })
}

fn parse_session(body: &str) -> Result<SessionResponse, LinkServiceError> {
    serde_json::from_str(body)
        .context("decode identity provider response")
        .map_err(LinkServiceError::AuthenticatorUnavailable)
}

fn parse_sign_in(body: &str) -> Result<Identity, LinkServiceError> {
    let session = parse_session(body)?;
    let user = session.user.ok_or(LinkServiceError::MissingIdentity)?;
    let user_id = parse_user_id(user.id)?;
    Ok(Identity {
        user_id,
        email: user.email.unwrap_or_default(),
    })
}

fn parse_sign_up(body: &str) -> Result<SignUpOutcome, LinkServiceError> {
    let session = parse_session(body)?;
    let confirmation_required = session.access_token.is_none();
    let raw_id = session.user.and_then(|u| u.id).or(session.id);
    Ok(SignUpOutcome {
        user_id: parse_user_id(raw_id)?,
        confirmation_required,
    })
}
