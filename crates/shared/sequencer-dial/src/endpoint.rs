//! Failover-aware execution-layer client provider.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{sync::Mutex, time::timeout};
use tracing::info;

use crate::{
    alloy_client::{AlloyExecutionDialer, AlloyRollupDialer},
    client::{ExecutionClient, ExecutionDialer, RollupClient, RollupDialer},
    config::ProviderConfig,
    error::DialError,
    provider::{EndpointProvider, RollupProvider},
    rollup::ActiveRollupProvider,
};

/// Execution-side state, guarded by one lock together with the dial path.
#[derive(Debug)]
struct ExecState {
    /// Index the execution client was last dialed for. Recorded before the
    /// dial completes: a failed redial is not retried until the active
    /// index moves again.
    client_index: usize,
    /// Client dialed for `client_index`. `None` only before the first
    /// successful dial.
    client: Option<Arc<dyn ExecutionClient>>,
}

/// Produces an execution-layer client for whichever endpoint pair currently
/// fronts the active sequencer.
///
/// The active index is resolved through an [`ActiveRollupProvider`]; the
/// execution client is re-dialed only when that index diverges from the one
/// it was last dialed for. Dials are serialized under a single lock held
/// for the whole call, and a superseded client is closed only after its
/// replacement dialed successfully, so callers never observe a clientless
/// window past the initial dial.
#[derive(Debug)]
pub struct ActiveEndpointProvider {
    rollup_provider: ActiveRollupProvider,
    exec_urls: Vec<String>,
    network_timeout: Duration,
    dialer: Arc<dyn ExecutionDialer>,
    state: Mutex<ExecState>,
}

impl ActiveEndpointProvider {
    /// Creates a provider backed by the production alloy dialers.
    pub async fn new(config: ProviderConfig) -> Result<Self, DialError> {
        Self::with_dialers(config, Arc::new(AlloyExecutionDialer), Arc::new(AlloyRollupDialer))
            .await
    }

    /// Creates a provider with injected dial strategies.
    ///
    /// Validates the URL lists, resolves the active endpoint through the
    /// rollup provider, then performs one synchronous execution dial
    /// bounded by `network_timeout`, so an unreachable initial endpoint
    /// fails construction instead of the first request.
    pub async fn with_dialers(
        config: ProviderConfig,
        exec_dialer: Arc<dyn ExecutionDialer>,
        rollup_dialer: Arc<dyn RollupDialer>,
    ) -> Result<Self, DialError> {
        config.validate()?;
        let ProviderConfig { exec_urls, rollup_urls, check_interval, network_timeout } = config;
        let rollup_provider =
            ActiveRollupProvider::new(rollup_urls, check_interval, network_timeout, rollup_dialer)
                .await?;
        let provider = Self {
            rollup_provider,
            exec_urls,
            network_timeout,
            dialer: exec_dialer,
            state: Mutex::new(ExecState { client_index: 0, client: None }),
        };
        match timeout(network_timeout, provider.execution_client()).await {
            Ok(Ok(_)) => Ok(provider),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(DialError::Timeout(network_timeout)),
        }
    }

    /// The index of the endpoint pair currently believed active.
    pub async fn active_index(&self) -> usize {
        self.rollup_provider.active_index().await
    }

    /// Number of configured endpoint pairs.
    pub fn num_endpoints(&self) -> usize {
        self.exec_urls.len()
    }
}

#[async_trait]
impl RollupProvider for ActiveEndpointProvider {
    async fn rollup_client(&self) -> Result<Arc<dyn RollupClient>, DialError> {
        self.rollup_provider.rollup_client().await
    }

    /// Closes the cached execution client, then the underlying rollup
    /// provider. Call once.
    async fn close(&self) {
        let mut state = self.state.lock().await;
        if let Some(client) = state.client.take() {
            client.close().await;
        }
        self.rollup_provider.close().await;
    }
}

#[async_trait]
impl EndpointProvider for ActiveEndpointProvider {
    async fn execution_client(&self) -> Result<Arc<dyn ExecutionClient>, DialError> {
        let mut state = self.state.lock().await;
        let (active_index, _) = self.rollup_provider.ensure_active_endpoint().await?;
        if state.client_index == active_index {
            if let Some(client) = state.client.as_ref() {
                return Ok(client.clone());
            }
        }
        // Sequencer moved, or this is the first call: dial the matching
        // execution endpoint before retiring the old client.
        let url = &self.exec_urls[active_index];
        info!(index = active_index, url = %url, "sequencer changed, dialing new execution client");
        state.client_index = active_index;
        let dialed = timeout(self.network_timeout, self.dialer.dial(self.network_timeout, url))
            .await
            .unwrap_or(Err(DialError::Timeout(self.network_timeout)))?;
        if let Some(previous) = state.client.replace(dialed.clone()) {
            previous.close().await;
        }
        Ok(dialed)
    }
}
