//! Configuration types shared across the orchestrator and connectors.

use std::collections::HashMap;
use std::time::Duration;

use crate::connector::ConnectorKey;

/// Strategy for selecting among eligible data connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next connector on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible connectors concurrently and return the first success.
    Latency,
}

/// Global configuration for the `Rivulet` orchestrator.
#[derive(Debug, Clone)]
pub struct RivuletConfig {
    /// Preferred connector ordering per chain id.
    ///
    /// Unknown connector keys are rejected during the orchestrator's build
    /// step. Connectors absent from a chain's list are still considered,
    /// after the listed ones.
    pub per_chain_priority: HashMap<u64, Vec<ConnectorKey>>,
    /// Strategy for fetching from multiple connectors.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual connector requests.
    pub connector_timeout: Duration,
    /// Optional overall deadline for requests that fan out across chains.
    pub request_timeout: Option<Duration>,
}

impl Default for RivuletConfig {
    fn default() -> Self {
        Self {
            per_chain_priority: HashMap::new(),
            fetch_strategy: FetchStrategy::default(),
            connector_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
