use std::time::Duration;

use autopm_core::config::{parse_or, required};

/// Login service configuration loaded from environment variables.
#[derive(Debug)]
pub struct LoginConfig {
    /// PostgreSQL connection URL holding `otc_codes` and `telegram_users`.
    pub database_url: String,
    /// Base URL of the Supabase project (e.g. "https://xyz.supabase.co").
    pub supabase_url: String,
    /// Public anon key sent as `apikey` to the auth API.
    pub supabase_anon_key: String,
    /// Shared secret the Telegram bot presents in `x-autopm-bot-key`.
    pub bot_api_key: String,
    /// TCP port to listen on (default 3120). Env var: `LOGIN_PORT`.
    pub login_port: u16,
    /// Seconds between expired-code sweeps (default 300). Env var: `OTC_REAP_INTERVAL_SECS`.
    pub otc_reap_interval_secs: u64,
}

impl LoginConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            supabase_url: required("SUPABASE_URL"),
            supabase_anon_key: required("SUPABASE_ANON_KEY"),
            bot_api_key: required("BOT_API_KEY"),
            login_port: parse_or("LOGIN_PORT", 3120),
            otc_reap_interval_secs: parse_or("OTC_REAP_INTERVAL_SECS", 300),
        }
    }

    pub fn otc_reap_interval(&self) -> Duration {
        // A zero period would make `tokio::time::interval` panic.
        Duration::from_secs(self.otc_reap_interval_secs.max(1))
    }
}
