//! Cronjob module for scheduled tasks.
//!
//! This module contains the search-then-replurk cycle and the scheduler that
//! runs it periodically. The `/run-cron` handler calls the same cycle.

use log::{error, info};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::plurk::{replurk, search_plurks, ReplurkContext, ReplurkOutcome};

/// Result of one search/replurk run.
#[derive(Debug)]
pub struct CycleReport {
    /// Number of plurk ids the search returned
    pub found: usize,
    /// What happened to the replurk request
    pub outcome: ReplurkOutcome,
}

/// Runs one search/replurk cycle.
///
/// Never fails: both steps log their own errors and degrade to an empty
/// result. Overlapping runs are independent of each other, so two runs close
/// together may replurk the same plurks twice.
pub async fn run_replurk_cycle(ctx: &ReplurkContext) -> CycleReport {
    info!("Running Plurk auto-replurk job");

    let ids = search_plurks(ctx).await;
    let outcome = replurk(ctx, &ids).await;

    match &outcome {
        ReplurkOutcome::Skipped => info!("Job finished, nothing to replurk"),
        ReplurkOutcome::Completed(_) => info!("Job finished, replurked {} plurks", ids.len()),
        ReplurkOutcome::Failed(e) => error!("Job finished with replurk failure: {}", e),
    }

    CycleReport {
        found: ids.len(),
        outcome,
    }
}

/// Creates the scheduler running [`run_replurk_cycle`] on the configured schedule.
///
/// The default schedule `0 0 * * * *` fires at minute 0 of every hour.
///
/// # Returns
///
/// - `Ok(JobScheduler)`: The configured job scheduler, not yet started
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the scheduler cannot be created
///   or the cron expression is invalid
///
/// # Example
///
/// ```rust,no_run
/// use replurker::{start_replurk_cronjob, PlurkConfig, ReplurkContext};
///
/// #[tokio::main]
/// async fn main() {
///     let ctx = ReplurkContext::from_config(PlurkConfig::from_env()).unwrap();
///     let scheduler = start_replurk_cronjob(ctx).await.unwrap();
///     scheduler.start().await.unwrap();
///
///     // Keep the scheduler running
///     tokio::signal::ctrl_c().await.unwrap();
/// }
/// ```
pub async fn start_replurk_cronjob(
    ctx: ReplurkContext,
) -> Result<JobScheduler, Box<dyn std::error::Error + Send + Sync>> {
    let sched = JobScheduler::new().await?;
    let schedule = ctx.config.cron_schedule.clone();

    sched
        .add(Job::new_async(schedule.as_str(), move |_uuid, _l| {
            let ctx = ctx.clone();
            Box::pin(async move {
                info!("Starting scheduled replurk run");
                let report = run_replurk_cycle(&ctx).await;
                info!(
                    "Scheduled replurk run completed ({} plurks found)",
                    report.found
                );
            })
        })?)
        .await?;

    info!("Cronjob scheduler configured with schedule '{}'", schedule);
    Ok(sched)
}
