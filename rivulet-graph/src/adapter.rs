#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use rivulet_core::{Address, PeriodQuery, RivuletError, StreamPeriod, Token};

use crate::dto::{RawStreamPeriod, RawToken};
use crate::networks;

/// Stream-periods abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait SubgraphPeriods: Send + Sync {
    /// Fetch every stream period on `chain_id` matching the query, already
    /// flattened into workspace records.
    async fn fetch_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError>;
}

/// Token-metadata abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait SubgraphTokens: Send + Sync {
    /// Fetch token metadata by contract address.
    async fn fetch_token(
        &self,
        chain_id: u64,
        address: &Address,
    ) -> Result<Token, RivuletError>;
}

/// Subgraph page size. The indexer caps `first` at 1000.
const PAGE: usize = 1_000;

const STREAM_PERIODS_QUERY: &str = r#"
query StreamPeriods($first: Int!, $skip: Int!, $addresses: [String!]!, $before: BigInt!) {
  streamPeriods(
    first: $first
    skip: $skip
    orderBy: startedAtTimestamp
    orderDirection: asc
    where: {
      startedAtTimestamp_lt: $before
      or: [{ sender_in: $addresses }, { receiver_in: $addresses }]
    }
  ) {
    sender { id }
    receiver { id }
    token { id symbol decimals }
    flowRate
    startedAtTimestamp
    stoppedAtTimestamp
    startedAtBlockNumber
    stoppedAtBlockNumber
    startedAtEvent { transactionHash }
    stoppedAtEvent { transactionHash }
  }
}"#;

const TOKEN_QUERY: &str = r#"
query Token($id: ID!) {
  token(id: $id) {
    id
    symbol
    decimals
  }
}"#;

#[derive(Deserialize)]
struct GraphEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GraphErrorMessage>>,
}

#[derive(Deserialize)]
struct GraphErrorMessage {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodsData {
    stream_periods: Vec<RawStreamPeriod>,
}

#[derive(Deserialize)]
struct TokenData {
    token: Option<RawToken>,
}

/// Real adapter backed by a single `reqwest::Client` and a per-chain
/// endpoint map. The client is `Clone + Send + Sync`, so no external locking
/// is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    endpoints: HashMap<u64, Url>,
}

impl RealAdapter {
    /// Build a default client against the built-in endpoint registry.
    ///
    /// # Panics
    /// Panics if building the underlying `reqwest::Client` fails, which is
    /// unexpected in normal environments (invalid TLS backend configuration).
    #[must_use]
    pub fn new_default() -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to build reqwest client for RealAdapter");
        Self::new(http, networks::default_endpoints())
    }

    /// Wrap an existing HTTP client with an explicit endpoint map.
    #[must_use]
    pub const fn new(http: reqwest::Client, endpoints: HashMap<u64, Url>) -> Self {
        Self { http, endpoints }
    }

    /// Chain ids this adapter has endpoints for.
    #[must_use]
    pub fn chain_ids(&self) -> Vec<u64> {
        self.endpoints.keys().copied().collect()
    }

    fn endpoint(&self, chain_id: u64) -> Result<&Url, RivuletError> {
        self.endpoints
            .get(&chain_id)
            .ok_or_else(|| RivuletError::unsupported(format!("stream-periods/chain-{chain_id}")))
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &Url,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<T, RivuletError> {
        let body = json!({ "query": query, "variables": variables });
        let resp = self
            .http
            .post(endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RivuletError::connector("rivulet-graph", e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RivuletError::connector(
                "rivulet-graph",
                format!("subgraph returned HTTP {status}"),
            ));
        }

        let envelope: GraphEnvelope<T> = resp
            .json()
            .await
            .map_err(|e| RivuletError::Data(format!("malformed subgraph response: {e}")))?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let msgs: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(RivuletError::connector("rivulet-graph", msgs.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| RivuletError::Data("subgraph response missing data".into()))
    }
}

#[async_trait]
impl SubgraphPeriods for RealAdapter {
    async fn fetch_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError> {
        let endpoint = self.endpoint(chain_id)?;
        let addresses: Vec<&str> = query.addresses.iter().map(Address::as_str).collect();

        let mut periods = Vec::new();
        let mut skip = 0usize;
        loop {
            let variables = json!({
                "first": PAGE,
                "skip": skip,
                "addresses": addresses,
                "before": query.window.end.to_string(),
            });
            let page: PeriodsData = self.post(endpoint, STREAM_PERIODS_QUERY, variables).await?;
            let fetched = page.stream_periods.len();
            for raw in page.stream_periods {
                periods.push(raw.flatten(chain_id)?);
            }
            if fetched < PAGE {
                break;
            }
            skip += PAGE;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(chain_id, count = periods.len(), "fetched stream periods");

        // The subgraph can only express the upper window bound in `where`;
        // the lower bound and counterparty narrowing happen here.
        periods.retain(|p| p.stopped_at.is_none_or(|stop| stop >= query.window.start));
        if !query.counterparties.is_empty() {
            periods.retain(|p| {
                query.counterparties.contains(&p.sender)
                    || query.counterparties.contains(&p.receiver)
            });
        }
        Ok(periods)
    }
}

#[async_trait]
impl SubgraphTokens for RealAdapter {
    async fn fetch_token(
        &self,
        chain_id: u64,
        address: &Address,
    ) -> Result<Token, RivuletError> {
        let endpoint = self.endpoint(chain_id)?;
        let variables = json!({ "id": address.as_str() });
        let data: TokenData = self.post(endpoint, TOKEN_QUERY, variables).await?;
        match data.token {
            Some(raw) => raw.flatten(),
            None => Err(RivuletError::not_found(format!(
                "token {address} on chain {chain_id}"
            ))),
        }
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn SubgraphPeriods {
    /// Build a `SubgraphPeriods` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn SubgraphPeriods>
    where
        F: Send + Sync + 'static + Fn(u64, PeriodQuery) -> Result<Vec<StreamPeriod>, RivuletError>,
    {
        struct FnPeriods<F>(F);
        #[async_trait]
        impl<F> SubgraphPeriods for FnPeriods<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(u64, PeriodQuery) -> Result<Vec<StreamPeriod>, RivuletError>,
        {
            async fn fetch_periods(
                &self,
                chain_id: u64,
                query: &PeriodQuery,
            ) -> Result<Vec<StreamPeriod>, RivuletError> {
                (self.0)(chain_id, query.clone())
            }
        }
        Arc::new(FnPeriods(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn SubgraphTokens {
    /// Build a `SubgraphTokens` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn SubgraphTokens>
    where
        F: Send + Sync + 'static + Fn(u64, Address) -> Result<Token, RivuletError>,
    {
        struct FnTokens<F>(F);
        #[async_trait]
        impl<F> SubgraphTokens for FnTokens<F>
        where
            F: Send + Sync + 'static + Fn(u64, Address) -> Result<Token, RivuletError>,
        {
            async fn fetch_token(
                &self,
                chain_id: u64,
                address: &Address,
            ) -> Result<Token, RivuletError> {
                (self.0)(chain_id, address.clone())
            }
        }
        Arc::new(FnTokens(f))
    }
}

/// Bundle of injectable adapters for constructing a connector in tests.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Periods adapter handle; defaults to an unsupported stub.
    fn clone_arc_periods(&self) -> Arc<dyn SubgraphPeriods> {
        <dyn SubgraphPeriods>::from_fn(|_, _| Err(RivuletError::unsupported("stream-periods")))
    }
    /// Tokens adapter handle; defaults to an unsupported stub.
    fn clone_arc_tokens(&self) -> Arc<dyn SubgraphTokens> {
        <dyn SubgraphTokens>::from_fn(|_, _| Err(RivuletError::unsupported("token")))
    }
    /// Chains the injected adapters claim to serve.
    fn supported_chains(&self) -> Vec<u64> {
        networks::default_endpoints().keys().copied().collect()
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_periods(&self) -> Arc<dyn SubgraphPeriods> {
        Arc::new(self.clone()) as Arc<dyn SubgraphPeriods>
    }
    fn clone_arc_tokens(&self) -> Arc<dyn SubgraphTokens> {
        Arc::new(self.clone()) as Arc<dyn SubgraphTokens>
    }
    fn supported_chains(&self) -> Vec<u64> {
        self.chain_ids()
    }
}
