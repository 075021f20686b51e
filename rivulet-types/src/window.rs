//! Reporting windows over which accounting is requested.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{RivuletError, Timestamp};

/// Half-open interval `[start, end)` over which accounting is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// Inclusive window start.
    pub start: Timestamp,
    /// Exclusive window end.
    pub end: Timestamp,
}

impl ReportingWindow {
    /// Build a window, validating its ordering.
    ///
    /// # Errors
    /// Returns `RivuletError::InvalidArg` if `end < start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, RivuletError> {
        if end < start {
            return Err(RivuletError::InvalidArg(format!(
                "reporting window end ({end}) precedes start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Resolve optional bounds into a concrete window.
    ///
    /// Defaults: start = Unix epoch, end = now.
    ///
    /// # Errors
    /// Returns `RivuletError::InvalidArg` if the resolved end precedes the
    /// resolved start.
    pub fn resolve(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<Self, RivuletError> {
        Self::new(
            start.unwrap_or(0),
            end.unwrap_or_else(|| Utc::now().timestamp()),
        )
    }

    /// Window length in seconds.
    #[must_use]
    pub const fn duration(&self) -> i64 {
        self.end - self.start
    }
}
