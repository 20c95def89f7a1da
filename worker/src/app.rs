//! Worker wiring
//!
//! Builds the pool, the MySQL repositories and the cleanup service from
//! `AppConfig`, then runs the sweeps until a shutdown signal arrives.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use tienda_core::repositories::{AccountRepository, RevokedTokenRepository};
use tienda_core::services::{CleanupConfig, CleanupService, Clock, SystemClock};
use tienda_infra::database::{DatabasePool, MySqlAccountRepository, MySqlRevokedTokenRepository};
use tienda_shared::AppConfig;

type MySqlCleanup = CleanupService<MySqlRevokedTokenRepository, MySqlAccountRepository>;

/// The assembled worker
pub struct Worker {
    pool: DatabasePool,
    cleanup: Arc<MySqlCleanup>,
}

impl Worker {
    /// Connect to the database and assemble the cleanup service
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to create database pool")?;

        if !pool.health_check().await.context("Database health check failed")? {
            anyhow::bail!("Database health check returned unhealthy");
        }
        info!("Database pool ready: {}", pool.get_statistics());

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let revocations = Arc::new(MySqlRevokedTokenRepository::new(pool.get_pool().clone()));
        let accounts = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));

        let cleanup = Arc::new(CleanupService::new(
            revocations,
            accounts,
            clock,
            CleanupConfig::from(&config.jobs),
        ));

        Ok(Self { pool, cleanup })
    }

    /// Run the sweeps until `shutdown` resolves, then close the pool
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        run_until_shutdown(self.cleanup, shutdown).await;
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Start every background sweep, wait for `shutdown`, then stop them
///
/// Returns the number of sweep tasks that were running.
pub async fn run_until_shutdown<R, A, F>(cleanup: Arc<CleanupService<R, A>>, shutdown: F) -> usize
where
    R: RevokedTokenRepository + 'static,
    A: AccountRepository + 'static,
    F: Future<Output = ()>,
{
    let handles = cleanup.start_background_task();
    let running = handles.len();
    info!(sweeps = running, "Worker started");

    shutdown.await;
    info!("Shutdown requested, stopping sweeps");

    for handle in handles {
        handle.abort();
        // Cancellation is the expected outcome
        let _ = handle.await;
    }

    running
}
