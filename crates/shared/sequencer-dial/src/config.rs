//! Construction parameters for the endpoint providers.

use std::time::Duration;

use crate::error::ConfigError;

/// Default time budget for a single dial attempt or activity check.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default staleness window between active-sequencer checks, twice the dial
/// budget so a follower is never considered current across two failed dials.
pub const DEFAULT_SEQUENCER_CHECK_INTERVAL: Duration = DEFAULT_DIAL_TIMEOUT.saturating_mul(2);

/// Endpoint lists and timing for an
/// [`ActiveEndpointProvider`](crate::ActiveEndpointProvider).
///
/// Index `i` of `exec_urls` and index `i` of `rollup_urls` describe the same
/// physical node. Both lists are fixed at construction.
///
/// This struct is clap-free so the library can be driven from tests, config
/// files, or any other source.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Execution-layer RPC URLs, one per rollup URL, same ordering.
    pub exec_urls: Vec<String>,
    /// Rollup-node RPC URLs.
    pub rollup_urls: Vec<String>,
    /// How long an active-sequencer determination stays fresh before the
    /// next request re-checks.
    pub check_interval: Duration,
    /// Time budget for a single dial or activity check.
    pub network_timeout: Duration,
}

impl ProviderConfig {
    /// Creates a config with the default check cadence and network timeout.
    pub fn new(exec_urls: Vec<String>, rollup_urls: Vec<String>) -> Self {
        Self {
            exec_urls,
            rollup_urls,
            check_interval: DEFAULT_SEQUENCER_CHECK_INTERVAL,
            network_timeout: DEFAULT_DIAL_TIMEOUT,
        }
    }

    /// Overrides the active-sequencer check cadence.
    pub fn with_check_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// Overrides the per-operation network timeout.
    pub fn with_network_timeout(mut self, network_timeout: Duration) -> Self {
        self.network_timeout = network_timeout;
        self
    }

    /// Validates list cardinality: the rollup list must be non-empty and
    /// both lists must have equal length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rollup_urls.is_empty() {
            return Err(ConfigError::EmptyRollupUrls);
        }
        if self.exec_urls.len() != self.rollup_urls.len() {
            return Err(ConfigError::UrlCountMismatch {
                exec: self.exec_urls.len(),
                rollup: self.rollup_urls.len(),
            });
        }
        Ok(())
    }
}
