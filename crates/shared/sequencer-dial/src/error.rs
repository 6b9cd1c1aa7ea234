//! Error types for the endpoint providers.

use std::time::Duration;

use alloy_transport::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Malformed construction input. Fatal to construction and never recovered
/// internally; no dials are performed before validation passes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The rollup URL list was empty.
    #[error("empty rollup urls list, expected at least one URL")]
    EmptyRollupUrls,
    /// The execution and rollup URL lists differ in length.
    #[error("number of execution urls ({exec}) and rollup urls ({rollup}) mismatch")]
    UrlCountMismatch {
        /// Length of the execution URL list.
        exec: usize,
        /// Length of the rollup URL list.
        rollup: usize,
    },
}

/// Errors surfaced by provider operations.
///
/// Every failure is returned to the immediate caller and none are retried
/// internally; retry policy belongs to the caller or to the dialer's own
/// contract. A failed call leaves the cached state usable on the next call.
/// The only errors not propagated are close failures on superseded client
/// handles, which are best effort.
#[derive(Debug, Error)]
pub enum DialError {
    /// Invalid construction input.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dialing an endpoint failed.
    #[error("dialing {url}: {source}")]
    Dial {
        /// The endpoint URL the dial was issued against.
        url: String,
        /// The underlying transport error.
        #[source]
        source: RpcError<TransportErrorKind>,
    },

    /// A dial or activity check exceeded its time budget.
    #[error("endpoint operation timed out after {0:?}")]
    Timeout(Duration),

    /// No endpoint reported itself as the active sequencer. Per-endpoint
    /// failures are logged at warn where they occur.
    #[error("failed to find an active sequencer, tried {tried} endpoints")]
    NoActiveSequencer {
        /// How many endpoints were probed.
        tried: usize,
    },
}
