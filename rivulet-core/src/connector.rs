use async_trait::async_trait;

use crate::RivuletError;
pub use rivulet_types::ConnectorKey;
use rivulet_types::{Address, PeriodQuery, StreamPeriod, Token};

/// Focused role trait for connectors that provide stream periods.
#[async_trait]
pub trait StreamPeriodsProvider: Send + Sync {
    /// Fetch raw stream periods on the given chain for the accounts in `query`.
    ///
    /// Implementations return every period overlapping `query.window` where
    /// one of `query.addresses` is the sender or the receiver, filtered by
    /// `query.counterparties` when non-empty. Periods are returned as the
    /// data source recorded them; `daily_amounts` must be left empty — the
    /// orchestrator attaches the decomposition.
    async fn stream_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError>;
}

/// Focused role trait for connectors that resolve token metadata.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch metadata for the token contract at `address` on `chain_id`.
    async fn token(&self, chain_id: u64, address: &Address) -> Result<Token, RivuletError>;
}

/// Main connector trait implemented by data-source crates. Exposes capability
/// discovery.
#[async_trait]
pub trait RivuletConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "rivulet-graph").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring per-chain priorities.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to serve a given chain.
    ///
    /// Default: returns `false` for all chains. Connectors must explicitly
    /// override this method to declare which chains they index.
    fn supports_chain(&self, chain_id: u64) -> bool {
        let _ = chain_id;
        false
    }

    /// Advertise the stream-periods capability by returning a usable trait
    /// object reference when supported.
    fn as_stream_periods_provider(&self) -> Option<&dyn StreamPeriodsProvider> {
        None
    }

    /// Advertise the token-metadata capability by returning a usable trait
    /// object reference when supported.
    fn as_token_provider(&self) -> Option<&dyn TokenProvider> {
        None
    }
}
