//! Rivulet orchestrates stream-accounting requests across multiple indexed
//! data sources.
//!
//! Overview
//! - Routes requests to connectors that implement the `rivulet_core` contracts.
//! - Applies per-chain priorities to influence connector order.
//! - Resolves reporting windows (defaults: Unix epoch → now) before any
//!   connector or engine call.
//! - Attaches the daily-ledger decomposition onto every fetched stream
//!   period, clipped to the reporting window and aligned to UTC day
//!   boundaries.
//! - Normalizes error handling and exposes uniform domain types from
//!   `rivulet_core`.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-connector timeout,
//!     aggregates errors; fewer concurrent requests but potentially higher
//!     latency.
//!   - `Latency`: races eligible connectors; lowest tail latency but higher
//!     request fanout.
//! - Multi-chain requests fan out concurrently; a chain whose connectors all
//!   fail becomes a warning on the report as long as another chain
//!   succeeds, so partial outages do not sink whole requests.
//! - The decomposition itself is pure and synchronous; connectors are the
//!   only I/O boundary.
//!
//! Examples
//! Building an orchestrator with priorities:
//! ```rust,ignore
//! use std::sync::Arc;
//! use rivulet::Rivulet;
//! use rivulet_graph::GraphConnector;
//!
//! let graph = Arc::new(GraphConnector::new_default());
//!
//! let rivulet = Rivulet::builder()
//!     .with_connector(graph.clone())
//!     .prefer_for_chain(137, &[graph])
//!     .build()?;
//! ```
//!
//! Fetching the accounting report for an account:
//! ```rust,ignore
//! use rivulet_core::AccountingRequest;
//!
//! let req = AccountingRequest::new(
//!     vec!["0x1111111111111111111111111111111111111111".parse()?],
//!     vec![137],
//! )
//! .start(1_672_531_200);
//! let report = rivulet.stream_periods(&req).await?;
//! for period in &report.periods {
//!     for day in &period.daily_amounts {
//!         // exact base-unit quantity flowed during [day.start_time, day.end_time)
//!     }
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Rivulet, RivuletBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use rivulet_core::{
    AccountingReport, AccountingRequest, Address, Capability, ConnectorKey, DailyAmount,
    FetchStrategy, FlowRate, PeriodQuery, ReportingWindow, RivuletConfig, RivuletConnector,
    RivuletError, StreamPeriod, Timestamp, Token, TokenReport,
};
