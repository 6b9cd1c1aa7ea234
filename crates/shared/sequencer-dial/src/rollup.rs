//! Active rollup endpoint selection.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{
    sync::Mutex,
    time::{Instant, timeout},
};
use tracing::{debug, info, warn};

use crate::{
    client::{RollupClient, RollupDialer},
    error::{ConfigError, DialError},
    provider::RollupProvider,
};

/// Selector state. All of it lives behind one lock: the active index, the
/// cached client, and the freshness deadline move together.
#[derive(Debug)]
struct RollupState {
    /// Index into the URL list currently believed to front the active
    /// sequencer.
    active_index: usize,
    /// Client dialed for `active_index`. `None` only before the first
    /// successful probe.
    client: Option<Arc<dyn RollupClient>>,
    /// Deadline after which the next request re-checks which endpoint is
    /// active. `None` forces a check.
    check_deadline: Option<Instant>,
}

/// Tracks which of a fixed list of rollup endpoints fronts the active
/// sequencer and caches a client for it.
///
/// There is no background task: activity checks run inline with a caller's
/// request once the previous determination is older than the check
/// interval. The state lock is held for the full call, dials included, so
/// concurrent callers cannot race two dials or observe a half-swapped
/// client. A replacement client is installed before the superseded one is
/// closed.
#[derive(Debug)]
pub struct ActiveRollupProvider {
    rollup_urls: Vec<String>,
    check_interval: Duration,
    network_timeout: Duration,
    dialer: Arc<dyn RollupDialer>,
    state: Mutex<RollupState>,
}

impl ActiveRollupProvider {
    /// Creates a provider and synchronously resolves the active endpoint.
    ///
    /// Fails with [`ConfigError::EmptyRollupUrls`] before any dial when the
    /// URL list is empty, or with the probe error when no endpoint can be
    /// confirmed active within `network_timeout` per attempt.
    pub async fn new(
        rollup_urls: Vec<String>,
        check_interval: Duration,
        network_timeout: Duration,
        dialer: Arc<dyn RollupDialer>,
    ) -> Result<Self, DialError> {
        if rollup_urls.is_empty() {
            return Err(ConfigError::EmptyRollupUrls.into());
        }
        let provider = Self {
            rollup_urls,
            check_interval,
            network_timeout,
            dialer,
            state: Mutex::new(RollupState {
                active_index: 0,
                client: None,
                check_deadline: None,
            }),
        };
        provider.rollup_client().await?;
        Ok(provider)
    }

    /// The index of the endpoint currently believed to front the active
    /// sequencer.
    pub async fn active_index(&self) -> usize {
        self.state.lock().await.active_index
    }

    /// Number of configured endpoints.
    pub fn num_endpoints(&self) -> usize {
        self.rollup_urls.len()
    }

    /// Resolves the active endpoint, re-checking if stale, and returns its
    /// index together with the cached client.
    pub(crate) async fn ensure_active_endpoint(
        &self,
    ) -> Result<(usize, Arc<dyn RollupClient>), DialError> {
        let mut state = self.state.lock().await;
        let client = self.ensure_locked(&mut state).await?;
        Ok((state.active_index, client))
    }

    /// Returns the cached client, probing first when the last determination
    /// went stale. Must be called with the state lock held.
    async fn ensure_locked(
        &self,
        state: &mut RollupState,
    ) -> Result<Arc<dyn RollupClient>, DialError> {
        if let Some(client) = state.client.as_ref() {
            if state.check_deadline.is_some_and(|deadline| Instant::now() < deadline) {
                return Ok(client.clone());
            }
        }
        let client = self.find_active_endpoint(state).await?;
        // Only a successful round advances the deadline; after a failed one
        // the very next request probes again.
        state.check_deadline = Some(Instant::now() + self.check_interval);
        Ok(client)
    }

    /// Probes endpoints in index order and adopts the first one reporting
    /// itself active. Lowest-index-wins doubles as failback: once a
    /// lower-index endpoint recovers it is re-adopted at the next stale
    /// check.
    ///
    /// Adoption is replace-then-close: a freshly dialed candidate is only
    /// installed, and the superseded client only closed, after the
    /// candidate confirmed it is the active sequencer. Candidates that lose
    /// are closed on the spot. If nothing reports active the cached state
    /// is left untouched.
    async fn find_active_endpoint(
        &self,
        state: &mut RollupState,
    ) -> Result<Arc<dyn RollupClient>, DialError> {
        for (index, url) in self.rollup_urls.iter().enumerate() {
            let cached = (index == state.active_index)
                .then(|| state.client.clone())
                .flatten();
            let is_probe = cached.is_none();
            let candidate = match cached {
                Some(client) => client,
                None => {
                    debug!(index, url = %url, "dialing candidate sequencer");
                    let dialed =
                        timeout(self.network_timeout, self.dialer.dial(self.network_timeout, url))
                            .await
                            .unwrap_or(Err(DialError::Timeout(self.network_timeout)));
                    match dialed {
                        Ok(client) => client,
                        Err(error) => {
                            warn!(index, url = %url, %error, "failed to dial candidate sequencer");
                            continue;
                        }
                    }
                }
            };
            match timeout(self.network_timeout, candidate.sequencer_active()).await {
                Ok(Ok(true)) => {
                    if is_probe {
                        info!(index, url = %url, "active sequencer found, adopting endpoint");
                        if let Some(previous) = state.client.take() {
                            previous.close().await;
                        }
                        state.active_index = index;
                        state.client = Some(candidate.clone());
                    } else {
                        debug!(index, url = %url, "current sequencer still active");
                    }
                    return Ok(candidate);
                }
                Ok(Ok(false)) => {
                    debug!(index, url = %url, "candidate sequencer inactive");
                    if is_probe {
                        candidate.close().await;
                    }
                }
                Ok(Err(error)) => {
                    warn!(index, url = %url, %error, "error querying candidate sequencer");
                    if is_probe {
                        candidate.close().await;
                    }
                }
                Err(_) => {
                    warn!(index, url = %url, "timed out querying candidate sequencer");
                    if is_probe {
                        candidate.close().await;
                    }
                }
            }
        }
        Err(DialError::NoActiveSequencer { tried: self.rollup_urls.len() })
    }
}

#[async_trait]
impl RollupProvider for ActiveRollupProvider {
    async fn rollup_client(&self) -> Result<Arc<dyn RollupClient>, DialError> {
        let mut state = self.state.lock().await;
        self.ensure_locked(&mut state).await
    }

    async fn close(&self) {
        let mut state = self.state.lock().await;
        if let Some(client) = state.client.take() {
            client.close().await;
        }
    }
}
