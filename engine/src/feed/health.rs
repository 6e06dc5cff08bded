//! Periodic health polling published through a watch channel.

use std::future::Future;
use std::time::Duration;

use shared::models::HealthCheckResponse;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{ApiClient, FeedError};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Healthy { service: String, version: String },
    Unhealthy { reason: String },
    Unreachable,
}

impl HealthStatus {
    pub fn from_result(result: Result<HealthCheckResponse, FeedError>) -> Self {
        match result {
            Ok(response) if response.status.eq_ignore_ascii_case("healthy") || response.status.eq_ignore_ascii_case("ok") => {
                HealthStatus::Healthy { service: response.service, version: response.version }
            }
            Ok(response) => HealthStatus::Unhealthy { reason: response.status },
            Err(FeedError::Http(_)) => HealthStatus::Unreachable,
            Err(other) => HealthStatus::Unhealthy { reason: other.user_message() },
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy { .. })
    }

    pub fn label(&self) -> String {
        match self {
            HealthStatus::Checking => "Vérification…".to_string(),
            HealthStatus::Healthy { version, .. } => format!("API en ligne (v{})", version),
            HealthStatus::Unhealthy { reason } => format!("API dégradée: {}", reason),
            HealthStatus::Unreachable => "API injoignable".to_string(),
        }
    }
}

/// Polls immediately, then once per interval. Dropping the monitor stops polling.
#[derive(Debug)]
pub struct HealthMonitor {
    receiver: watch::Receiver<HealthStatus>,
    task: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn spawn(client: ApiClient, interval: Duration) -> Self {
        Self::spawn_with(
            move || {
                let client = client.clone();
                async move { client.health().await }
            },
            interval,
        )
    }

    /// Same as [`spawn`](Self::spawn) with an arbitrary health check.
    pub fn spawn_with<F, Fut>(check: F, interval: Duration) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<HealthCheckResponse, FeedError>> + Send + 'static,
    {
        let (sender, receiver) = watch::channel(HealthStatus::Checking);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
            loop {
                ticker.tick().await;
                let status = HealthStatus::from_result(check().await);
                match &status {
                    HealthStatus::Healthy { .. } => tracing::debug!(?status, "Health check"),
                    _ => tracing::warn!(?status, "Health check failed"),
                }
                if sender.send(status).is_err() {
                    break;
                }
            }
        });
        Self { receiver, task }
    }

    pub fn status(&self) -> HealthStatus {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.receiver.clone()
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
