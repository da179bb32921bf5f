use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use autopm_core::tracing::init_tracing;
use autopm_login::config::LoginConfig;
use autopm_login::infra::authenticator::SupabaseAuthenticator;
use autopm_login::infra::reaper::run_reaper;
use autopm_login::router::build_router;
use autopm_login::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = LoginConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let authenticator =
        SupabaseAuthenticator::new(&config.supabase_url, config.supabase_anon_key.clone())
            .expect("failed to build identity provider client");

    let state = AppState {
        db,
        authenticator,
        bot_api_key: Arc::from(config.bot_api_key.as_str()),
    };

    // Expired-code sweeper
    let reap_every = config.otc_reap_interval();
    info!(interval_secs = reap_every.as_secs(), "starting one-time code reaper");
    tokio::spawn(run_reaper(state.otc_repo(), reap_every));

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.login_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("login service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
