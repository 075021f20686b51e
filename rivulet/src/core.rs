use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rivulet_core::connector::ConnectorKey;
use rivulet_core::{Capability, FetchStrategy, RivuletConfig, RivuletConnector, RivuletError};

/// Orchestrator that routes accounting requests across registered connectors.
pub struct Rivulet {
    pub(crate) connectors: Vec<Arc<dyn RivuletConnector>>,
    pub(crate) cfg: RivuletConfig,
}

impl core::fmt::Debug for Rivulet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rivulet")
            .field("connectors", &self.connectors.len())
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Rivulet` orchestrator with custom configuration.
pub struct RivuletBuilder {
    connectors: Vec<Arc<dyn RivuletConnector>>,
    cfg: RivuletConfig,
}

impl Default for RivuletBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RivuletBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via
    ///   [`with_connector`](Self::with_connector).
    /// - Defaults are conservative: priority-with-fallback fetches, a 10s
    ///   per-connector timeout, and no overall request deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: RivuletConfig::default(),
        }
    }

    /// Register a data-source connector.
    ///
    /// Behavior and trade-offs:
    /// - The registration order is used when no explicit per-chain priority
    ///   is set via [`prefer_for_chain`](Self::prefer_for_chain).
    /// - Multiple connectors can index the same chain; the orchestrator
    ///   routes based on priorities and the selected fetch strategy.
    /// - Duplicates are not deduplicated; avoid registering the same
    ///   connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn RivuletConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred connectors for a chain id using connector instances.
    ///
    /// Behavior and trade-offs:
    /// - Influences ordering among eligible connectors for the given chain;
    ///   it does not filter out non-listed connectors (they remain after the
    ///   listed ones).
    /// - Type-safe and ergonomic: keys are derived from the connectors
    ///   themselves, so typos cannot silently disable a priority.
    #[must_use]
    pub fn prefer_for_chain(
        mut self,
        chain_id: u64,
        connectors_desc: &[Arc<dyn RivuletConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self.cfg.per_chain_priority.insert(chain_id, keys);
        self
    }

    /// Select the fetch strategy for multi-connector requests.
    ///
    /// Behavior and trade-offs:
    /// - `PriorityWithFallback`: deterministic order, applies per-connector
    ///   timeout, aggregates errors; may be slower but predictable and
    ///   economical on rate limits.
    /// - `Latency`: race all eligible connectors and return the first
    ///   success; fastest typical latency but consumes more concurrent
    ///   requests and can add indexer load.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-connector request timeout.
    ///
    /// Applied in both `PriorityWithFallback` and `Latency` strategies to
    /// bound each connector call.
    #[must_use]
    pub const fn connector_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.connector_timeout = timeout;
        self
    }

    /// Set an overall request timeout for multi-chain fan-outs.
    ///
    /// Behavior and trade-offs:
    /// - Bounds total latency even when many connectors time out
    ///   sequentially.
    /// - When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Rivulet` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector).
    pub fn build(mut self) -> Result<Rivulet, RivuletError> {
        // Validate priority keys against registered connectors; drop unknowns and dedup.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();

        for v in self.cfg.per_chain_priority.values_mut() {
            let mut out: Vec<ConnectorKey> = Vec::new();
            let mut seen: HashSet<&'static str> = HashSet::new();
            for k in v.iter().copied() {
                let n = k.as_str();
                if known.contains(n) && seen.insert(n) {
                    out.push(k);
                }
            }
            *v = out;
        }

        if self.connectors.is_empty() {
            return Err(RivuletError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        Ok(Rivulet {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

pub(crate) fn tag_err(connector: &str, e: RivuletError) -> RivuletError {
    match e {
        e @ (RivuletError::NotFound { .. }
        | RivuletError::ConnectorTimeout { .. }
        | RivuletError::Connector { .. }
        | RivuletError::RequestTimeout { .. }
        | RivuletError::AllConnectorsTimedOut { .. }
        | RivuletError::AllConnectorsFailed(_)) => e,
        other => RivuletError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Apply an optional request-level deadline to a future.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, RivuletError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .map_err(|_| RivuletError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Rivulet {
    /// Wrap a connector future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rivulet::core::connector_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn connector_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, RivuletError>
    where
        Fut: core::future::Future<Output = Result<T, RivuletError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(RivuletError::connector_timeout(connector_name, capability)))
    }

    /// Start building a new `Rivulet` instance.
    #[must_use]
    pub fn builder() -> RivuletBuilder {
        RivuletBuilder::new()
    }

    pub(crate) fn ordered_for_chain(&self, chain_id: u64) -> Vec<Arc<dyn RivuletConnector>> {
        let out: Vec<(usize, Arc<dyn RivuletConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();

        if let Some(pref) = self.cfg.per_chain_priority.get(&chain_id) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            let mut v = out;
            v.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
            return v.into_iter().map(|(_, c)| c).collect();
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-chain fetch helper.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies per-connector timeout in both modes
    /// - Aggregates errors and treats `NotFound` specially in fallback mode
    /// - In latency mode, returns the first success; if all attempted
    ///   connectors fail, aggregates and returns `AllConnectorsFailed`; if no
    ///   connectors support the capability on the chain, returns a
    ///   capability error
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rivulet::core::fetch_single",
            skip(self, call),
            fields(chain_id = chain_id, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        chain_id: u64,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, RivuletError>
    where
        T: Send,
        F: Fn(Arc<dyn RivuletConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, RivuletError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::PriorityWithFallback => {
                self.fetch_single_priority_with_fallback(
                    chain_id,
                    capability,
                    not_found_label,
                    call,
                )
                .await
            }
            FetchStrategy::Latency => {
                self.fetch_single_latency(chain_id, capability, not_found_label, call)
                    .await
            }
            _ => unreachable!("unhandled FetchStrategy variant"),
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        chain_id: u64,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, RivuletError>
    where
        T: Send,
        F: Fn(Arc<dyn RivuletConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, RivuletError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<RivuletError> = Vec::new();

        for c in self.ordered_for_chain(chain_id) {
            if !c.supports_chain(chain_id) {
                continue;
            }
            if let Some(fut) = call(c.clone()) {
                attempted_any = true;
                match Self::connector_call_with_timeout(
                    c.name(),
                    capability.as_str(),
                    self.cfg.connector_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ (RivuletError::NotFound { .. } | RivuletError::ConnectorTimeout { .. })) => {
                        errors.push(e);
                    }
                    Err(e) => {
                        errors.push(tag_err(c.name(), e));
                    }
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} on chain {chain_id}")),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        chain_id: u64,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, RivuletError>
    where
        T: Send,
        F: Fn(Arc<dyn RivuletConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, RivuletError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in self.ordered_for_chain(chain_id) {
            if !c.supports_chain(chain_id) {
                continue;
            }
            if let Some(fut) = call(c.clone()) {
                let name = c.name();
                let timeout = self.cfg.connector_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::connector_call_with_timeout(name, capability.as_str(), timeout, fut)
                            .await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<RivuletError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(
                    e @ (RivuletError::ConnectorTimeout { .. } | RivuletError::NotFound { .. }),
                ) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} on chain {chain_id}")),
        ))
    }
}
