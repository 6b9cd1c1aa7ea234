//! Failover-aware client providers for redundant sequencer deployments.
//!
//! A deployment that runs several sequencer-capable nodes exposes one
//! (execution, rollup) endpoint pair per node. At most one node is the
//! active sequencer at any time, and only its pair should serve client
//! traffic. The providers here keep exactly one cached client per role
//! pointed at the active pair: activity is re-checked on a configurable
//! cadence, inline with a caller's request, and when the active index
//! moves the replacement client is fully dialed before the superseded
//! one is closed.
//!
//! [`ActiveEndpointProvider`] is the entry point for redundant
//! deployments. [`StaticEndpointProvider`] serves fixed single-node
//! setups behind the same [`EndpointProvider`] / [`RollupProvider`]
//! traits, so call sites do not care which flavor they were handed.

mod alloy_client;
mod client;
mod config;
mod endpoint;
mod error;
mod provider;
mod rollup;
mod static_provider;

pub use alloy_client::{
    AlloyExecutionClient, AlloyExecutionDialer, AlloyRollupClient, AlloyRollupDialer,
};
pub use client::{ExecutionClient, ExecutionDialer, RollupClient, RollupDialer};
pub use config::{DEFAULT_DIAL_TIMEOUT, DEFAULT_SEQUENCER_CHECK_INTERVAL, ProviderConfig};
pub use endpoint::ActiveEndpointProvider;
pub use error::{ConfigError, DialError};
pub use provider::{EndpointProvider, RollupProvider};
pub use rollup::ActiveRollupProvider;
pub use static_provider::StaticEndpointProvider;

#[cfg(test)]
mod test_support;
