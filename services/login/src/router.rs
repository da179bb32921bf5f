use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use autopm_core::health::{healthz, readyz};
use autopm_core::middleware::request_id_layer;

use crate::handlers::{link::redeem_code, login::login, signup::signup};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Web front-end
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        // Telegram bot
        .route("/link/redeem", post(redeem_code))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
