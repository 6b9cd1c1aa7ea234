//! Alloy-backed production clients and dialers.

use std::{sync::Arc, time::Duration};

use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_transport::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use tokio::time::timeout;
use url::Url;

use crate::{
    client::{ExecutionClient, ExecutionDialer, RollupClient, RollupDialer},
    error::DialError,
};

fn parse_url(url: &str) -> Result<Url, DialError> {
    url.parse().map_err(|e: url::ParseError| DialError::Dial {
        url: url.to_string(),
        source: RpcError::local_usage_str(&e.to_string()),
    })
}

/// An [`ExecutionClient`] backed by an alloy HTTP provider.
#[derive(Debug, Clone)]
pub struct AlloyExecutionClient {
    provider: RootProvider,
}

impl AlloyExecutionClient {
    /// Connects to the given HTTP endpoint.
    pub fn new_http(url: Url) -> Self {
        let provider = ProviderBuilder::new().disable_recommended_fillers().connect_http(url);
        Self { provider }
    }

    /// The wrapped provider, for issuing RPC calls against the endpoint.
    pub fn provider(&self) -> &RootProvider {
        &self.provider
    }
}

#[async_trait]
impl ExecutionClient for AlloyExecutionClient {
    async fn chain_id(&self) -> Result<u64, RpcError<TransportErrorKind>> {
        self.provider.get_chain_id().await
    }

    async fn close(&self) {
        // The HTTP transport holds no persistent connection; dropping the
        // handle releases everything.
    }
}

/// A [`RollupClient`] backed by an alloy HTTP provider against the rollup
/// node's RPC.
#[derive(Debug, Clone)]
pub struct AlloyRollupClient {
    provider: RootProvider,
}

impl AlloyRollupClient {
    /// Connects to the given HTTP endpoint.
    pub fn new_http(url: Url) -> Self {
        let provider = ProviderBuilder::new().disable_recommended_fillers().connect_http(url);
        Self { provider }
    }
}

#[async_trait]
impl RollupClient for AlloyRollupClient {
    async fn sequencer_active(&self) -> Result<bool, RpcError<TransportErrorKind>> {
        self.provider.client().request("admin_sequencerActive", ()).await
    }

    async fn close(&self) {}
}

/// Production execution dialer.
///
/// Connects over HTTP and probes `eth_chainId` within the dial budget, so
/// an unreachable endpoint fails the dial instead of the first request
/// issued through the returned client.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlloyExecutionDialer;

#[async_trait]
impl ExecutionDialer for AlloyExecutionDialer {
    async fn dial(
        &self,
        dial_timeout: Duration,
        url: &str,
    ) -> Result<Arc<dyn ExecutionClient>, DialError> {
        let client = AlloyExecutionClient::new_http(parse_url(url)?);
        match timeout(dial_timeout, client.chain_id()).await {
            Ok(Ok(_)) => Ok(Arc::new(client)),
            Ok(Err(source)) => Err(DialError::Dial { url: url.to_string(), source }),
            Err(_) => Err(DialError::Timeout(dial_timeout)),
        }
    }
}

/// Production rollup dialer.
///
/// Reachability is validated by the activity check that immediately follows
/// every dial in the selection loop, so the dial itself only builds the
/// client.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlloyRollupDialer;

#[async_trait]
impl RollupDialer for AlloyRollupDialer {
    async fn dial(
        &self,
        _dial_timeout: Duration,
        url: &str,
    ) -> Result<Arc<dyn RollupClient>, DialError> {
        Ok(Arc::new(AlloyRollupClient::new_http(parse_url(url)?)))
    }
}
