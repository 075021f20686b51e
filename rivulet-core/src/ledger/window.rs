use rivulet_types::{ReportingWindow, StreamPeriod, Timestamp};

use super::decompose::decompose;

/// Intersect a period's lifetime with a reporting window.
///
/// Returns the half-open `[effective_start, effective_end)` bounds, or `None`
/// when the period lies entirely outside the window. An unterminated period
/// is treated as running until the window end.
#[must_use]
pub fn effective_interval(
    period: &StreamPeriod,
    window: &ReportingWindow,
) -> Option<(Timestamp, Timestamp)> {
    let start = period.started_at.max(window.start);
    let end = period.stopped_at.map_or(window.end, |s| s.min(window.end));
    (end >= start).then_some((start, end))
}

/// Attach the daily decomposition for `window` onto a stream period.
///
/// A period entirely outside the window comes back with empty
/// `daily_amounts`; this is a degenerate outcome, not an error.
#[must_use]
pub fn with_daily_amounts(mut period: StreamPeriod, window: &ReportingWindow) -> StreamPeriod {
    period.daily_amounts = match effective_interval(&period, window) {
        Some((start, end)) => decompose(start, end, period.flow_rate),
        None => {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                chain_id = period.chain_id,
                started_at = period.started_at,
                "stream period outside reporting window"
            );
            Vec::new()
        }
    };
    period
}
