//! Single-endpoint provider without failover.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    alloy_client::{AlloyExecutionDialer, AlloyRollupDialer},
    client::{ExecutionClient, ExecutionDialer, RollupClient, RollupDialer},
    error::DialError,
    provider::{EndpointProvider, RollupProvider},
};

/// Serves one fixed endpoint pair behind the same traits as
/// [`ActiveEndpointProvider`](crate::ActiveEndpointProvider), for
/// deployments without sequencer redundancy.
///
/// Clients are dialed once (or supplied pre-dialed) and handed back
/// unchanged; there is no activity checking and no re-dialing.
#[derive(Debug)]
pub struct StaticEndpointProvider {
    execution_client: Arc<dyn ExecutionClient>,
    rollup_client: Arc<dyn RollupClient>,
}

impl StaticEndpointProvider {
    /// Wraps already-dialed clients.
    pub fn new(
        execution_client: Arc<dyn ExecutionClient>,
        rollup_client: Arc<dyn RollupClient>,
    ) -> Self {
        Self { execution_client, rollup_client }
    }

    /// Dials one endpoint pair with the production alloy dialers, each
    /// attempt bounded by `network_timeout`.
    pub async fn dial(
        exec_url: &str,
        rollup_url: &str,
        network_timeout: Duration,
    ) -> Result<Self, DialError> {
        Self::dial_with(
            exec_url,
            rollup_url,
            network_timeout,
            Arc::new(AlloyExecutionDialer),
            Arc::new(AlloyRollupDialer),
        )
        .await
    }

    /// Dials one endpoint pair with injected dial strategies.
    pub async fn dial_with(
        exec_url: &str,
        rollup_url: &str,
        network_timeout: Duration,
        exec_dialer: Arc<dyn ExecutionDialer>,
        rollup_dialer: Arc<dyn RollupDialer>,
    ) -> Result<Self, DialError> {
        let execution_client = exec_dialer.dial(network_timeout, exec_url).await?;
        let rollup_client = rollup_dialer.dial(network_timeout, rollup_url).await?;
        Ok(Self { execution_client, rollup_client })
    }
}

#[async_trait]
impl RollupProvider for StaticEndpointProvider {
    async fn rollup_client(&self) -> Result<Arc<dyn RollupClient>, DialError> {
        Ok(self.rollup_client.clone())
    }

    /// Closes both clients. Call once.
    async fn close(&self) {
        self.execution_client.close().await;
        self.rollup_client.close().await;
    }
}

#[async_trait]
impl EndpointProvider for StaticEndpointProvider {
    async fn execution_client(&self) -> Result<Arc<dyn ExecutionClient>, DialError> {
        Ok(self.execution_client.clone())
    }
}
