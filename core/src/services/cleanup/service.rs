//! Cleanup service for periodic maintenance of revocations and stale registrations
//!
//! Two independent sweeps run on their own schedules: expired token
//! revocations are removed, and accounts that never confirmed their email
//! are purged together with their codes.

use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use tienda_shared::config::JobsConfig;

use crate::errors::DomainError;
use crate::repositories::{AccountRepository, RevokedTokenRepository};
use crate::services::clock::Clock;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Whether to enable automatic cleanup
    pub enabled: bool,
    /// How often to sweep expired revocations (in seconds)
    pub revocation_interval_seconds: u64,
    /// How often to purge unconfirmed accounts (in seconds)
    pub unconfirmed_interval_seconds: u64,
    /// Age after which an unconfirmed account is purged (in hours)
    pub unconfirmed_max_age_hours: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            revocation_interval_seconds: 3600,
            unconfirmed_interval_seconds: 86_400,
            unconfirmed_max_age_hours: 168,
        }
    }
}

impl From<&JobsConfig> for CleanupConfig {
    fn from(config: &JobsConfig) -> Self {
        Self {
            enabled: config.enabled,
            revocation_interval_seconds: config.revocation_sweep_interval_seconds,
            unconfirmed_interval_seconds: config.unconfirmed_sweep_interval_seconds,
            unconfirmed_max_age_hours: config.unconfirmed_account_max_age_hours,
        }
    }
}

/// Which sweep a background loop runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Revocations,
    UnconfirmedAccounts,
}

impl Sweep {
    fn as_str(&self) -> &'static str {
        match self {
            Sweep::Revocations => "revocations",
            Sweep::UnconfirmedAccounts => "unconfirmed_accounts",
        }
    }
}

/// Service for sweeping expired revocations and stale registrations
pub struct CleanupService<R, A>
where
    R: RevokedTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    revocations: Arc<R>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
}

impl<R, A> CleanupService<R, A>
where
    R: RevokedTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    /// Create a new cleanup service
    pub fn new(
        revocations: Arc<R>,
        accounts: Arc<A>,
        clock: Arc<dyn Clock>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            revocations,
            accounts,
            clock,
            config,
        }
    }

    /// Run both sweeps once
    ///
    /// A failing sweep is recorded in `errors` and does not stop the other.
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting cleanup cycle");
        let started = Instant::now();
        let mut result = CleanupResult::default();

        match self.sweep_revocations().await {
            Ok(count) => result.revocations_removed = count,
            Err(e) => {
                error!("Failed to sweep revocations: {}", e);
                result.errors.push(format!("Revocation sweep error: {}", e));
            }
        }

        match self.purge_unconfirmed().await {
            Ok(count) => result.accounts_removed = count,
            Err(e) => {
                error!("Failed to purge unconfirmed accounts: {}", e);
                result
                    .errors
                    .push(format!("Unconfirmed purge error: {}", e));
            }
        }

        result.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            revocations_removed = result.revocations_removed,
            accounts_removed = result.accounts_removed,
            duration_ms = result.duration_ms,
            "Cleanup completed"
        );

        Ok(result)
    }

    /// Delete revocations whose tokens have expired
    async fn sweep_revocations(&self) -> Result<u64, DomainError> {
        let removed = self.revocations.delete_expired(self.clock.now()).await?;
        info!(removed, event = "revocations_swept", "Swept expired revocations");
        Ok(removed)
    }

    /// Delete accounts that stayed unconfirmed past the configured age
    async fn purge_unconfirmed(&self) -> Result<u64, DomainError> {
        let cutoff = self.clock.now() - ChronoDuration::hours(self.config.unconfirmed_max_age_hours);
        let removed = self.accounts.delete_unconfirmed_before(cutoff).await?;
        info!(
            removed,
            cutoff = %cutoff,
            event = "unconfirmed_purged",
            "Purged unconfirmed accounts"
        );
        Ok(removed)
    }

    async fn run_sweep(&self, sweep: Sweep) -> Result<u64, DomainError> {
        match sweep {
            Sweep::Revocations => self.sweep_revocations().await,
            Sweep::UnconfirmedAccounts => self.purge_unconfirmed().await,
        }
    }

    /// Start both sweeps as background tasks
    ///
    /// Each sweep gets its own tokio interval. Returns the task handles, which
    /// is empty when the service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Vec<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Cleanup service is disabled");
            return Vec::new();
        }

        vec![
            self.clone()
                .spawn_loop(Sweep::Revocations, self.config.revocation_interval_seconds),
            self.clone().spawn_loop(
                Sweep::UnconfirmedAccounts,
                self.config.unconfirmed_interval_seconds,
            ),
        ]
    }

    fn spawn_loop(self: Arc<Self>, sweep: Sweep, interval_seconds: u64) -> JoinHandle<()> {
        let interval = Duration::from_secs(interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                sweep = sweep.as_str(),
                "Cleanup sweep started - will run every {} seconds",
                interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep(sweep).await {
                    error!(sweep = sweep.as_str(), "Cleanup sweep failed: {}", e);
                }
            }
        })
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired revocations deleted
    pub revocations_removed: u64,
    /// Number of unconfirmed accounts deleted
    pub accounts_removed: u64,
    /// Wall time of the cycle
    pub duration_ms: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of items cleaned up
    pub fn total_cleaned(&self) -> u64 {
        self.revocations_removed + self.accounts_removed
    }
}
