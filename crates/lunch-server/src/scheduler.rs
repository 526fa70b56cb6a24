//! Background menu refresh.
//!
//! A [`RefreshScheduler`] owns the cron job that keeps the menu cache warm
//! and the one-shot task that populates it shortly after startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::service::MenuService;

pub struct RefreshScheduler {
    scheduler: JobScheduler,
    initial_refresh: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Registers the refresh job on `cron`, starts the scheduler and
    /// schedules an initial refresh after `initial_delay`.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the cron expression is rejected or
    /// the scheduler fails to start.
    pub async fn start(
        service: Arc<MenuService>,
        cron: &str,
        initial_delay: Duration,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;
        register_refresh_job(&scheduler, Arc::clone(&service), cron).await?;
        scheduler.start().await?;

        let initial_refresh = tokio::spawn(async move {
            tokio::time::sleep(initial_delay).await;
            tracing::info!("scheduler: initial menu population");
            if let Err(e) = service.refresh_menus().await {
                tracing::error!(error = %e, "scheduler: initial menu population failed");
            }
        });

        tracing::info!(cron, "scheduler: menu refresh registered");
        Ok(Self {
            scheduler,
            initial_refresh,
        })
    }

    /// Cancels the pending initial refresh and stops the cron job.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler fails to shut down.
    pub async fn shutdown(mut self) -> Result<(), JobSchedulerError> {
        self.initial_refresh.abort();
        self.scheduler.shutdown().await?;
        tracing::info!("scheduler: stopped");
        Ok(())
    }
}

async fn register_refresh_job(
    scheduler: &JobScheduler,
    service: Arc<MenuService>,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let service = Arc::clone(&service);

        Box::pin(async move {
            tracing::info!("scheduler: background menu refresh triggered");
            match service.refresh_menus().await {
                Ok(menus) => tracing::info!(
                    entries = menus.entry_count(),
                    "scheduler: background menu refresh complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: background menu refresh failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
