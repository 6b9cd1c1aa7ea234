//! Scripted mock endpoints, clients, and dialers for provider tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use alloy_transport::{RpcError, TransportErrorKind};
use async_trait::async_trait;

use crate::{
    client::{ExecutionClient, ExecutionDialer, RollupClient, RollupDialer},
    error::DialError,
};

/// One scripted endpoint: per-URL behavior switches plus dial/close ledgers.
#[derive(Debug, Default)]
pub(crate) struct MockEndpoint {
    active: AtomicBool,
    fail_rollup_dial: AtomicBool,
    fail_exec_dial: AtomicBool,
    hang_exec_dial: AtomicBool,
    fail_activity_query: AtomicBool,
    rollup_dials: AtomicUsize,
    exec_dials: AtomicUsize,
    rollup_closes: AtomicUsize,
    exec_closes: AtomicUsize,
}

impl MockEndpoint {
    pub(crate) fn fail_rollup_dial(&self, fail: bool) {
        self.fail_rollup_dial.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_exec_dial(&self, fail: bool) {
        self.fail_exec_dial.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn hang_exec_dial(&self, hang: bool) {
        self.hang_exec_dial.store(hang, Ordering::SeqCst);
    }

    pub(crate) fn fail_activity_query(&self, fail: bool) {
        self.fail_activity_query.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn rollup_dials(&self) -> usize {
        self.rollup_dials.load(Ordering::SeqCst)
    }

    pub(crate) fn exec_dials(&self) -> usize {
        self.exec_dials.load(Ordering::SeqCst)
    }

    pub(crate) fn rollup_closes(&self) -> usize {
        self.rollup_closes.load(Ordering::SeqCst)
    }

    pub(crate) fn exec_closes(&self) -> usize {
        self.exec_closes.load(Ordering::SeqCst)
    }
}

/// A scripted pair of dialers sharing per-URL endpoint state and an ordered
/// event ledger (`dial-exec:<url>`, `close-rollup:<url>`, ...) so tests can
/// assert sequencing, not just counts.
#[derive(Debug, Default)]
pub(crate) struct MockNetwork {
    endpoints: Mutex<HashMap<String, Arc<MockEndpoint>>>,
    events: Mutex<Vec<String>>,
}

impl MockNetwork {
    pub(crate) fn new() -> Arc<Self> {
        Arc::default()
    }

    /// The scripted state for `url`, created on first use.
    pub(crate) fn endpoint(&self, url: &str) -> Arc<MockEndpoint> {
        self.endpoints
            .lock()
            .expect("mock endpoints lock")
            .entry(url.to_string())
            .or_default()
            .clone()
    }

    /// Marks the rollup node at `url` as (in)active.
    pub(crate) fn set_active(&self, url: &str, active: bool) {
        self.endpoint(url).active.store(active, Ordering::SeqCst);
    }

    /// Everything dialed and closed so far, in order.
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().expect("mock events lock").clone()
    }

    fn record(&self, event: String) {
        self.events.lock().expect("mock events lock").push(event);
    }

    pub(crate) fn rollup_dialer(self: &Arc<Self>) -> Arc<MockRollupDialer> {
        Arc::new(MockRollupDialer { net: self.clone() })
    }

    pub(crate) fn exec_dialer(self: &Arc<Self>) -> Arc<MockExecutionDialer> {
        Arc::new(MockExecutionDialer { net: self.clone() })
    }
}

#[derive(Debug)]
pub(crate) struct MockRollupClient {
    net: Arc<MockNetwork>,
    url: String,
    endpoint: Arc<MockEndpoint>,
}

#[async_trait]
impl RollupClient for MockRollupClient {
    async fn sequencer_active(
        &self,
    ) -> Result<bool, RpcError<TransportErrorKind>> {
        if self.endpoint.fail_activity_query.load(Ordering::SeqCst) {
            return Err(RpcError::local_usage_str("sequencer status unavailable"));
        }
        Ok(self.endpoint.active.load(Ordering::SeqCst))
    }

    async fn close(&self) {
        self.endpoint.rollup_closes.fetch_add(1, Ordering::SeqCst);
        self.net.record(format!("close-rollup:{}", self.url));
    }
}

#[derive(Debug)]
pub(crate) struct MockExecutionClient {
    net: Arc<MockNetwork>,
    url: String,
    endpoint: Arc<MockEndpoint>,
}

#[async_trait]
impl ExecutionClient for MockExecutionClient {
    async fn chain_id(&self) -> Result<u64, RpcError<TransportErrorKind>> {
        Ok(8453)
    }

    async fn close(&self) {
        self.endpoint.exec_closes.fetch_add(1, Ordering::SeqCst);
        self.net.record(format!("close-exec:{}", self.url));
    }
}

#[derive(Debug)]
pub(crate) struct MockRollupDialer {
    net: Arc<MockNetwork>,
}

#[async_trait]
impl RollupDialer for MockRollupDialer {
    async fn dial(
        &self,
        _timeout: Duration,
        url: &str,
    ) -> Result<Arc<dyn RollupClient>, DialError> {
        let endpoint = self.net.endpoint(url);
        endpoint.rollup_dials.fetch_add(1, Ordering::SeqCst);
        self.net.record(format!("dial-rollup:{url}"));
        if endpoint.fail_rollup_dial.load(Ordering::SeqCst) {
            return Err(DialError::Dial {
                url: url.to_string(),
                source: RpcError::local_usage_str("connection refused"),
            });
        }
        Ok(Arc::new(MockRollupClient { net: self.net.clone(), url: url.to_string(), endpoint }))
    }
}

#[derive(Debug)]
pub(crate) struct MockExecutionDialer {
    net: Arc<MockNetwork>,
}

#[async_trait]
impl ExecutionDialer for MockExecutionDialer {
    async fn dial(
        &self,
        _timeout: Duration,
        url: &str,
    ) -> Result<Arc<dyn ExecutionClient>, DialError> {
        let endpoint = self.net.endpoint(url);
        endpoint.exec_dials.fetch_add(1, Ordering::SeqCst);
        self.net.record(format!("dial-exec:{url}"));
        if endpoint.hang_exec_dial.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if endpoint.fail_exec_dial.load(Ordering::SeqCst) {
            return Err(DialError::Dial {
                url: url.to_string(),
                source: RpcError::local_usage_str("connection refused"),
            });
        }
        Ok(Arc::new(MockExecutionClient { net: self.net.clone(), url: url.to_string(), endpoint }))
    }
}
