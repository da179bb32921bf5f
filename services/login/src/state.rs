use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::authenticator::SupabaseAuthenticator;
use crate::infra::db::DbOtcRepository;
use crate::usecase::otc::RandomCodeGenerator;

/// Shared application state passed to every handler via axum `State`.
///
/// Constructed once in `main`; there is no process-global client.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub authenticator: SupabaseAuthenticator,
    pub bot_api_key: Arc<str>,
}

impl AppState {
    pub fn otc_repo(&self) -> DbOtcRepository {
        DbOtcRepository {
            db: self.db.clone(),
        }
    }

    pub fn authenticator(&self) -> SupabaseAuthenticator {
        self.authenticator.clone()
    }

    pub fn code_generator(&self) -> RandomCodeGenerator {
        RandomCodeGenerator
    }
}
