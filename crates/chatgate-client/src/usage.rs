//! Usage reporting against the billing endpoints of the credential's
//! upstream family.

use chrono::{Datelike, Days, Local};
use serde::Deserialize;

use chatgate_types::{Credential, UpstreamKind};

use crate::client::ChatClient;
use crate::error::ClientError;

pub const USAGE_PATH: &str = "dashboard/billing/usage";
pub const SUBSCRIPTION_PATH: &str = "dashboard/billing/subscription";
pub const CREDIT_GRANTS_PATH: &str = "dashboard/billing/credit_grants";

/// Consumption and quota figures, in dollars. Either field may be absent
/// when the upstream does not report it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageReport {
    pub used: Option<f64>,
    pub total: Option<f64>,
}

#[derive(Deserialize)]
struct BillingUsage {
    total_usage: Option<f64>,
    error: Option<BillingError>,
}

#[derive(Deserialize)]
struct BillingError {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

#[derive(Deserialize)]
struct BillingSubscription {
    hard_limit_usd: Option<f64>,
}

#[derive(Deserialize)]
struct CreditGrants {
    total_available: Option<f64>,
}

impl ChatClient {
    /// Fetch the usage report for the configured credential.
    ///
    /// The endpoint set depends on the credential's upstream family;
    /// credentials that resolve to no upstream are rejected outright.
    pub async fn usage(&self) -> Result<UsageReport, ClientError> {
        match Credential::parse(&self.config().api_key).classify() {
            UpstreamKind::OpenAi => self.usage_openai().await,
            UpstreamKind::Api2d => self.usage_api2d().await,
            UpstreamKind::Unknown => Err(ClientError::UnsupportedCredential),
        }
    }

    async fn usage_openai(&self) -> Result<UsageReport, ClientError> {
        let (start, end) = current_billing_window();
        let usage_path = format!("{USAGE_PATH}?start_date={start}&end_date={end}");
        tracing::debug!(%start, %end, "fetching billing usage");

        let (usage_resp, sub_resp) =
            tokio::try_join!(self.get(&usage_path).send(), self.get(SUBSCRIPTION_PATH).send())?;

        if usage_resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || sub_resp.status() == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(ClientError::Unauthorized);
        }
        if !usage_resp.status().is_success() || !sub_resp.status().is_success() {
            return Err(ClientError::UsageUnavailable);
        }

        let usage: BillingUsage =
            usage_resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let subscription: BillingSubscription =
            sub_resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if let Some(error) = usage.error {
            if !error.kind.is_empty() {
                return Err(ClientError::Upstream(error.message));
            }
        }

        Ok(UsageReport {
            used: usage.total_usage.map(normalize_total_usage),
            total: subscription.hard_limit_usd.map(normalize_hard_limit),
        })
    }

    async fn usage_api2d(&self) -> Result<UsageReport, ClientError> {
        let response = self.get(CREDIT_GRANTS_PATH).send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(ClientError::UsageUnavailable);
        }

        let grants: CreditGrants =
            response.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        // Credit-grant upstreams report a remaining balance, not consumption.
        Ok(UsageReport { used: Some(0.0), total: grants.total_available })
    }
}

/// Billing window for the usage query: first day of the current month
/// through tomorrow, as `YYYY-MM-DD`.
fn current_billing_window() -> (String, String) {
    let today = Local::now().date_naive();
    let start = today.with_day(1).unwrap_or(today);
    let end = today.checked_add_days(Days::new(1)).unwrap_or(today);
    (start.format("%Y-%m-%d").to_string(), end.format("%Y-%m-%d").to_string())
}

/// The usage endpoint reports cents times 100; round to cents in dollars.
fn normalize_total_usage(raw: f64) -> f64 {
    raw.round() / 100.0
}

/// The subscription endpoint reports dollars; round to cents.
fn normalize_hard_limit(usd: f64) -> f64 {
    (usd * 100.0).round() / 100.0
}
