//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::RivuletError;
use crate::period::{StreamPeriod, Token};

/// Outcome of an accounting request.
///
/// Carries every fetched stream period with its `daily_amounts` attached,
/// plus non-fatal warnings (e.g. a chain whose connectors all failed while
/// other chains succeeded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountingReport {
    /// Stream periods with daily decomposition attached, ordered by chain
    /// then start time.
    pub periods: Vec<StreamPeriod>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<RivuletError>,
}

/// Outcome of a token metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenReport {
    /// Resolved token metadata, if any connector knew the address.
    pub token: Option<Token>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<RivuletError>,
}
