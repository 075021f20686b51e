//! rivulet-graph
//!
//! Public connector that implements `RivuletConnector` on top of an indexed
//! on-chain data source (a protocol subgraph queried over GraphQL). Exposes
//! stream periods and token metadata for every chain it has an endpoint for.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod dto;
/// Built-in chain-id → subgraph endpoint registry.
pub mod networks;

use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, SubgraphPeriods, SubgraphTokens};
use async_trait::async_trait;
use rivulet_core::connector::{
    ConnectorKey, RivuletConnector, StreamPeriodsProvider, TokenProvider,
};
use rivulet_core::{Address, PeriodQuery, RivuletError, StreamPeriod, Token};
use url::Url;

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type PeriodsAdapter = Arc<dyn SubgraphPeriods>;
#[cfg(not(feature = "test-adapters"))]
type PeriodsAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type TokensAdapter = Arc<dyn SubgraphTokens>;
#[cfg(not(feature = "test-adapters"))]
type TokensAdapter = AdapterArc;

/// Public connector type. Production users will construct with
/// `GraphConnector::new_default()`.
pub struct GraphConnector {
    periods: PeriodsAdapter,
    tokens: TokensAdapter,
    chains: Vec<u64>,
}

impl GraphConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("rivulet-graph");

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("not indexed")
    }

    fn normalize_error(e: RivuletError, what: &str) -> RivuletError {
        match e {
            RivuletError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    RivuletError::not_found(what.to_string())
                } else {
                    RivuletError::connector("rivulet-graph", msg)
                }
            }
            RivuletError::Other(msg) => RivuletError::connector("rivulet-graph", msg),
            other => other,
        }
    }

    /// Build against the built-in endpoint registry with a fresh HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        let a = RealAdapter::new_default();
        Self::from_adapter(&a)
    }

    /// Build against an explicit chain-id → endpoint map.
    #[must_use]
    pub fn new_with_endpoints(endpoints: HashMap<u64, Url>) -> Self {
        let http = reqwest::Client::new();
        let a = RealAdapter::new(http, endpoints);
        Self::from_adapter(&a)
    }

    /// Build from a provided `reqwest::Client` against the built-in registry.
    #[must_use]
    pub fn new_with_reqwest_client(http: reqwest::Client) -> Self {
        let a = RealAdapter::new(http, networks::default_endpoints());
        Self::from_adapter(&a)
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            periods: adapter.clone_arc_periods(),
            tokens: adapter.clone_arc_tokens(),
            chains: adapter.supported_chains(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let chains = adapter.chain_ids();
        let shared = Arc::new(adapter.clone());
        Self {
            periods: Arc::clone(&shared),
            tokens: shared,
            chains,
        }
    }
}

#[async_trait]
impl StreamPeriodsProvider for GraphConnector {
    async fn stream_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError> {
        let mut periods = self
            .periods
            .fetch_periods(chain_id, query)
            .await
            .map_err(|e| {
                Self::normalize_error(e, &format!("stream periods on chain {chain_id}"))
            })?;
        periods.sort_by_key(|p| p.started_at);
        Ok(periods)
    }
}

#[async_trait]
impl TokenProvider for GraphConnector {
    async fn token(&self, chain_id: u64, address: &Address) -> Result<Token, RivuletError> {
        self.tokens
            .fetch_token(chain_id, address)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("token {address} on chain {chain_id}")))
    }
}

#[async_trait]
impl RivuletConnector for GraphConnector {
    fn name(&self) -> &'static str {
        "rivulet-graph"
    }
    fn vendor(&self) -> &'static str {
        "Protocol Subgraph"
    }

    fn supports_chain(&self, chain_id: u64) -> bool {
        self.chains.contains(&chain_id)
    }

    fn as_stream_periods_provider(&self) -> Option<&dyn StreamPeriodsProvider> {
        Some(self as &dyn StreamPeriodsProvider)
    }

    fn as_token_provider(&self) -> Option<&dyn TokenProvider> {
        Some(self as &dyn TokenProvider)
    }
}
