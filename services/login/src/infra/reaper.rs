use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::domain::repository::OtcRepository;
use crate::usecase::reap::ReapExpiredUseCase;

/// Periodically delete expired one-time codes. Runs until the task is dropped;
/// the first pass happens immediately. Failures are logged and retried on the
/// next tick.
pub async fn run_reaper<R: OtcRepository>(otc_codes: R, every: Duration) {
    let usecase = ReapExpiredUseCase { otc_codes };
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(e) = usecase.execute(Utc::now()).await {
            tracing::warn!(error = ?e, "reaping expired one-time codes failed");
        }
    }
}
