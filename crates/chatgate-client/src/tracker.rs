//! Throttled usage refresh.

use std::time::Duration;

use tokio::time::Instant;

use crate::client::ChatClient;
use crate::error::ClientError;

const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Holds the last known usage figures and throttles refreshes.
///
/// Unforced refreshes within [`REFRESH_INTERVAL`] of the previous attempt
/// are skipped. The refresh timestamp advances on every attempt, including
/// failed ones, so a broken upstream is not hammered once a minute.
#[derive(Debug, Default)]
pub struct UsageTracker {
    pub used: Option<f64>,
    pub subscription: Option<f64>,
    last_refresh: Option<Instant>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the stored figures. Returns `Ok(true)` when a fetch was
    /// performed, `Ok(false)` when the throttle skipped it. On fetch errors
    /// the previous figures are retained.
    pub async fn refresh(
        &mut self,
        client: &ChatClient,
        force: bool,
    ) -> Result<bool, ClientError> {
        if !force {
            if let Some(last) = self.last_refresh {
                if last.elapsed() < REFRESH_INTERVAL {
                    tracing::debug!("usage refresh throttled");
                    return Ok(false);
                }
            }
        }

        self.last_refresh = Some(Instant::now());
        let report = client.usage().await?;
        self.used = report.used;
        self.subscription = report.total;
        tracing::debug!(used = ?self.used, subscription = ?self.subscription, "usage refreshed");
        Ok(true)
    }
}
