//! Client handle and dialer seams.
//!
//! The providers in this crate never talk to a wire protocol directly: they
//! hold client handles behind the traits below and obtain new ones through
//! injected dialers. Production implementations live in
//! [`alloy_client`](crate::alloy_client); tests substitute scripted mocks.

use std::{fmt::Debug, sync::Arc, time::Duration};

use alloy_transport::{RpcError, TransportErrorKind};
use async_trait::async_trait;

use crate::error::DialError;

/// Handle to an execution-layer client for the endpoint currently in use.
///
/// Handed to callers read-only: replacement and closing remain the owning
/// provider's responsibility.
#[async_trait]
pub trait ExecutionClient: Debug + Send + Sync {
    /// Chain id of the connected endpoint. Doubles as a readiness probe.
    async fn chain_id(&self) -> Result<u64, RpcError<TransportErrorKind>>;

    /// Releases the underlying connection. Best effort: implementations log
    /// failures rather than surfacing them.
    async fn close(&self);
}

/// Handle to a rollup-node client capable of the sequencer activity query.
#[async_trait]
pub trait RollupClient: Debug + Send + Sync {
    /// Whether the connected node currently reports itself as the active
    /// sequencer.
    async fn sequencer_active(&self) -> Result<bool, RpcError<TransportErrorKind>>;

    /// Releases the underlying connection. Best effort.
    async fn close(&self);
}

/// Pluggable dial strategy for execution-layer endpoints.
///
/// `timeout` is the budget for the whole attempt, internal retries
/// included; the caller additionally bounds the call with the same budget.
#[async_trait]
pub trait ExecutionDialer: Debug + Send + Sync {
    /// Establishes a usable client for `url` within `timeout`.
    async fn dial(
        &self,
        timeout: Duration,
        url: &str,
    ) -> Result<Arc<dyn ExecutionClient>, DialError>;
}

/// Pluggable dial strategy for rollup-node endpoints.
#[async_trait]
pub trait RollupDialer: Debug + Send + Sync {
    /// Establishes a usable client for `url` within `timeout`.
    async fn dial(&self, timeout: Duration, url: &str) -> Result<Arc<dyn RollupClient>, DialError>;
}
