//! Daily-ledger utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `decompose`: split one flow interval into UTC-day-aligned amounts
//! - `window`: clip a stream period's lifetime to a reporting window

/// Decomposition of a flow interval into per-day amounts.
pub mod decompose;
/// Reporting-window clipping and period augmentation.
pub mod window;
