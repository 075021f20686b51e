//! rivulet-core
//!
//! Core traits and utilities shared across the rivulet ecosystem.
//!
//! - `connector`: the `RivuletConnector` trait and capability provider traits.
//! - `ledger`: the daily-ledger engine that decomposes stream periods into
//!   UTC-day-aligned accounting amounts.
//!
//! The ledger itself is pure and synchronous; only the connector contracts
//! are async (they sit in front of remote indexed data sources and assume a
//! Tokio 1.x runtime, like the rest of the workspace).
#![warn(missing_docs)]

/// Connector capability traits and the primary `RivuletConnector` interface.
pub mod connector;
/// Daily-ledger decomposition and reporting-window clipping.
pub mod ledger;

pub use connector::RivuletConnector;
pub use ledger::decompose::decompose;
pub use ledger::window::{effective_interval, with_daily_amounts};

pub use rivulet_types::{
    AccountingReport, AccountingRequest, Address, Capability, ConnectorKey, DailyAmount,
    FetchStrategy, FlowRate, PeriodQuery, ReportingWindow, RivuletConfig, RivuletError,
    StreamPeriod, Timestamp, Token, TokenReport,
};
