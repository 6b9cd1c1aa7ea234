//! Provider interfaces shared by the active and static implementations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    client::{ExecutionClient, RollupClient},
    error::DialError,
};

/// Source of a ready-to-use rollup client for the active sequencer.
#[async_trait]
pub trait RollupProvider: Send + Sync {
    /// Returns the cached rollup client, re-checking which endpoint is
    /// active and re-dialing first if the cached determination went stale.
    ///
    /// Safe for concurrent invocation; callers block behind at most one
    /// in-flight dial per provider.
    async fn rollup_client(&self) -> Result<Arc<dyn RollupClient>, DialError>;

    /// Closes the cached client handles. Closing with nothing cached is a
    /// no-op; calling twice is not guaranteed to be safe. Call once.
    async fn close(&self);
}

/// Source of a ready-to-use execution-layer client for the active
/// sequencer, layered over a [`RollupProvider`].
#[async_trait]
pub trait EndpointProvider: RollupProvider {
    /// Returns the cached execution client, dialing a fresh one first when
    /// the active index moved since the last dial (or nothing is cached
    /// yet).
    async fn execution_client(&self) -> Result<Arc<dyn ExecutionClient>, DialError>;
}
