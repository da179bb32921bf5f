use axum::extract::FromRequest;

use crate::error::LinkServiceError;

pub mod link;
pub mod login;
pub mod signup;

/// `axum::Json` whose rejections use the service's `{kind, message}` envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(LinkServiceError))]
pub struct AppJson<T>(pub T);
