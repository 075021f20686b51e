//! Accounting request shapes exchanged between callers, the orchestrator,
//! and connectors.

use serde::{Deserialize, Serialize};

use crate::{Address, ReportingWindow, RivuletError, Timestamp};

/// Caller-facing accounting request.
///
/// `start`/`end` stay optional here; the orchestrator resolves them into a
/// concrete [`ReportingWindow`] (defaults: epoch / now) before any connector
/// or engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingRequest {
    /// Accounts to report on (matched as sender or receiver).
    pub addresses: Vec<Address>,
    /// Chains to query.
    pub chain_ids: Vec<u64>,
    /// Restrict to streams whose counterparty is in this list (empty = all).
    #[serde(default)]
    pub counterparties: Vec<Address>,
    /// Optional window start; defaults to the Unix epoch.
    pub start: Option<Timestamp>,
    /// Optional window end; defaults to "now".
    pub end: Option<Timestamp>,
}

impl AccountingRequest {
    /// Build a request for a set of accounts on a set of chains.
    #[must_use]
    pub fn new(addresses: Vec<Address>, chain_ids: Vec<u64>) -> Self {
        Self {
            addresses,
            chain_ids,
            counterparties: Vec::new(),
            start: None,
            end: None,
        }
    }

    /// Restrict results to streams against the given counterparties.
    #[must_use]
    pub fn counterparties(mut self, counterparties: Vec<Address>) -> Self {
        self.counterparties = counterparties;
        self
    }

    /// Set an explicit window start.
    #[must_use]
    pub const fn start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    /// Set an explicit window end.
    #[must_use]
    pub const fn end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Check the identifying fields the whole request depends on.
    ///
    /// # Errors
    /// Returns `RivuletError::InvalidArg` when `addresses` or `chain_ids` is
    /// empty. Shape errors abort the request before any engine call.
    pub fn validate(&self) -> Result<(), RivuletError> {
        if self.addresses.is_empty() {
            return Err(RivuletError::InvalidArg(
                "accounting request needs at least one address".into(),
            ));
        }
        if self.chain_ids.is_empty() {
            return Err(RivuletError::InvalidArg(
                "accounting request needs at least one chain id".into(),
            ));
        }
        Ok(())
    }
}

/// Connector-facing query for one chain: which accounts, which counterparties,
/// and the already-resolved reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Accounts to match as sender or receiver.
    pub addresses: Vec<Address>,
    /// Counterparty filter (empty = all).
    pub counterparties: Vec<Address>,
    /// Resolved reporting window; connectors should only return periods
    /// overlapping it.
    pub window: ReportingWindow,
}
