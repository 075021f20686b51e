use async_trait::async_trait;
use rivulet_core::connector::{RivuletConnector, StreamPeriodsProvider, TokenProvider};
use rivulet_core::{Address, PeriodQuery, RivuletError, StreamPeriod, Token};

mod fixtures;

/// Scripted connector for orchestrator tests; see [`dynamic::DynamicConnector`].
pub mod dynamic;

/// Magic address that forces a connector failure on any query containing it.
pub const FAIL_ADDRESS: &str = "0x00000000000000000000000000000000000000ff";
/// Magic address that injects ~200ms of latency before responding.
pub const SLOW_ADDRESS: &str = "0x00000000000000000000000000000000000000ee";

/// Mock connector for CI-safe examples. Provides deterministic data from
/// static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> RivuletError {
        RivuletError::not_found(what.to_string())
    }

    async fn maybe_fail_or_stall(
        addresses: &[Address],
        capability: &'static str,
    ) -> Result<(), RivuletError> {
        if addresses.iter().any(|a| a.as_str() == FAIL_ADDRESS) {
            return Err(RivuletError::connector(
                "rivulet-mock",
                format!("forced failure: {capability}"),
            ));
        }
        if addresses.iter().any(|a| a.as_str() == SLOW_ADDRESS) {
            // Long enough that a tight orchestrator timeout trips, short
            // enough not to drag the suite.
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
        Ok(())
    }
}

#[async_trait]
impl RivuletConnector for MockConnector {
    fn name(&self) -> &'static str {
        "rivulet-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_chain(&self, _chain_id: u64) -> bool {
        true
    }

    fn as_stream_periods_provider(&self) -> Option<&dyn StreamPeriodsProvider> {
        Some(self as &dyn StreamPeriodsProvider)
    }
    fn as_token_provider(&self) -> Option<&dyn TokenProvider> {
        Some(self as &dyn TokenProvider)
    }
}

#[async_trait]
impl StreamPeriodsProvider for MockConnector {
    async fn stream_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError> {
        Self::maybe_fail_or_stall(&query.addresses, "stream-periods").await?;
        Ok(fixtures::periods::matching(chain_id, query))
    }
}

#[async_trait]
impl TokenProvider for MockConnector {
    async fn token(&self, chain_id: u64, address: &Address) -> Result<Token, RivuletError> {
        fixtures::tokens::by_address(address)
            .ok_or_else(|| Self::not_found(&format!("token {address} on chain {chain_id}")))
    }
}
