/*!
 * Backend call gating.
 *
 * Every backend call runs through a `RequestGate`, which bounds the number
 * of calls in flight, enforces a deadline, and lets the caller abandon the
 * call through a cancellation token.
 */

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use log::warn;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;

/// Default deadline for a single backend call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Bounded, deadline-enforcing executor for backend calls
///
/// Clones share the same permit pool.
#[derive(Debug, Clone)]
pub struct RequestGate {
    permits: Arc<Semaphore>,
    max_concurrent_requests: usize,
    timeout: Duration,
}

impl RequestGate {
    /// Create a gate allowing `max_concurrent_requests` calls at once (at least one)
    pub fn new(max_concurrent_requests: usize, timeout: Duration) -> Self {
        let max_concurrent_requests = max_concurrent_requests.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent_requests)),
            max_concurrent_requests,
            timeout,
        }
    }

    /// Gate allowing one call at a time
    pub fn sequential(timeout: Duration) -> Self {
        Self::new(1, timeout)
    }

    /// Configured deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured permit count
    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Number of calls that could start right now
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `call` once a permit is free, failing on timeout or cancellation
    pub async fn run<T, F>(&self, label: &str, cancel: &CancellationToken, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let _permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("{} cancelled while waiting for a free request slot", label);
                return Err(ProviderError::Cancelled);
            }
            permit = self.permits.acquire() => permit
                .map_err(|_| ProviderError::RequestFailed("Request gate is closed".to_string()))?,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("{} cancelled", label);
                Err(ProviderError::Cancelled)
            }
            result = tokio::time::timeout(self.timeout, call) => match result {
                Ok(result) => result,
                Err(_) => {
                    warn!("{} timed out after {:?}", label, self.timeout);
                    Err(ProviderError::Timeout(self.timeout))
                }
            },
        }
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::sequential(DEFAULT_REQUEST_TIMEOUT)
    }
}
