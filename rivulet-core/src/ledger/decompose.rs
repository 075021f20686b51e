use rivulet_types::{DailyAmount, FlowRate, Timestamp};

/// One calendar day, in seconds. Days are exactly 86 400 s: the ledger uses a
/// non-leap-second UTC model.
pub const DAY: i64 = 86_400;

/// Floor a timestamp to the start of its UTC calendar day (00:00:00 UTC).
///
/// `div_euclid` keeps pre-epoch timestamps flooring toward earlier days
/// rather than toward zero.
#[must_use]
pub const fn day_start(ts: Timestamp) -> Timestamp {
    ts.div_euclid(DAY) * DAY
}

const fn amount_between(start: Timestamp, end: Timestamp, flow_rate: FlowRate) -> DailyAmount {
    DailyAmount {
        start_time: start,
        end_time: end,
        amount: (end - start) as i128 * flow_rate,
    }
}

/// Split the half-open interval `[start, end)` into UTC-day-aligned amounts
/// at a constant flow rate.
///
/// Guarantees, for `end >= start`:
/// - amounts are contiguous and ordered: each `end_time` equals the next
///   `start_time`, the first `start_time` is `start`, the last `end_time`
///   is `end`;
/// - every `end_time` except the last falls on a UTC day boundary;
/// - the amounts sum exactly to `(end - start) * flow_rate`.
///
/// Degenerate inputs produce no error: `start == end` yields one zero-length,
/// zero-quantity amount, and `end < start` yields one amount with negative
/// duration and quantity so that upstream data anomalies stay visible to the
/// caller instead of being silently absorbed.
///
/// ```
/// use rivulet_core::decompose;
///
/// // 2023-01-01T12:00:00Z .. 2023-01-03T06:00:00Z at 1 unit/s:
/// // a 12h head, one full day, a 6h tail.
/// let amounts = decompose(1_672_574_400, 1_672_725_600, 1);
/// assert_eq!(amounts.len(), 3);
/// assert_eq!(amounts[0].amount, 43_200);
/// assert_eq!(amounts[1].amount, 86_400);
/// assert_eq!(amounts[2].amount, 21_600);
/// assert_eq!(amounts.iter().map(|a| a.amount).sum::<i128>(), 151_200);
/// ```
#[must_use]
pub fn decompose(start: Timestamp, end: Timestamp, flow_rate: FlowRate) -> Vec<DailyAmount> {
    // First (possibly only) partial day.
    let next_day = day_start(start) + DAY;
    if end <= next_day {
        return vec![amount_between(start, end, flow_rate)];
    }
    let mut amounts = vec![amount_between(start, next_day, flow_rate)];

    // Full days. A day ending exactly at `end` still counts as full.
    let mut cursor = next_day;
    while cursor + DAY <= end {
        amounts.push(amount_between(cursor, cursor + DAY, flow_rate));
        cursor += DAY;
    }

    // Trailing partial day, if the last full day stopped short of `end`.
    if cursor < end {
        amounts.push(amount_between(cursor, end, flow_rate));
    }
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap().timestamp()
    }

    #[test]
    fn splits_midday_to_midday_across_two_boundaries() {
        let start = ts(2023, 1, 1, 12);
        let end = ts(2023, 1, 3, 6);
        let amounts = decompose(start, end, 1);

        assert_eq!(
            amounts,
            vec![
                DailyAmount {
                    start_time: 1_672_574_400,
                    end_time: 1_672_617_600,
                    amount: 43_200,
                },
                DailyAmount {
                    start_time: 1_672_617_600,
                    end_time: 1_672_704_000,
                    amount: 86_400,
                },
                DailyAmount {
                    start_time: 1_672_704_000,
                    end_time: 1_672_725_600,
                    amount: 21_600,
                },
            ]
        );
        let total: i128 = amounts.iter().map(|a| a.amount).sum();
        assert_eq!(total, i128::from(end - start));
    }

    #[test]
    fn interval_within_one_day_yields_single_amount() {
        let start = ts(2023, 1, 1, 3);
        let end = ts(2023, 1, 1, 20);
        let amounts = decompose(start, end, 5);
        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].start_time, start);
        assert_eq!(amounts[0].end_time, end);
        assert_eq!(amounts[0].amount, i128::from(end - start) * 5);
    }

    #[test]
    fn interval_ending_exactly_at_midnight_stays_single() {
        let start = ts(2023, 1, 1, 12);
        let end = ts(2023, 1, 2, 0);
        let amounts = decompose(start, end, 1);
        assert_eq!(amounts, vec![amount_between(start, end, 1)]);
    }

    #[test]
    fn interval_starting_at_midnight_emits_whole_days() {
        let start = ts(2023, 1, 1, 0);
        let end = ts(2023, 1, 4, 0);
        let amounts = decompose(start, end, 2);
        assert_eq!(amounts.len(), 3);
        for a in &amounts {
            assert_eq!(a.end_time - a.start_time, DAY);
            assert_eq!(a.amount, i128::from(DAY) * 2);
        }
    }

    #[test]
    fn zero_length_interval_yields_one_empty_amount() {
        let t = ts(2023, 6, 15, 9);
        let amounts = decompose(t, t, 42);
        assert_eq!(
            amounts,
            vec![DailyAmount {
                start_time: t,
                end_time: t,
                amount: 0,
            }]
        );
    }

    #[test]
    fn zero_rate_keeps_shape_with_zero_quantities() {
        let start = ts(2023, 1, 1, 12);
        let end = ts(2023, 1, 3, 6);
        let amounts = decompose(start, end, 0);
        assert_eq!(amounts.len(), 3);
        assert!(amounts.iter().all(|a| a.amount == 0));
    }

    #[test]
    fn negative_rate_flows_negative_quantities() {
        let start = ts(2023, 1, 1, 12);
        let end = ts(2023, 1, 2, 12);
        let amounts = decompose(start, end, -7);
        let total: i128 = amounts.iter().map(|a| a.amount).sum();
        assert_eq!(total, i128::from(end - start) * -7);
        assert!(amounts.iter().all(|a| a.amount < 0));
    }

    #[test]
    fn inverted_interval_passes_through() {
        // Clock skew upstream can hand us end < start; the engine emits one
        // negative-duration amount rather than guessing a correction.
        let start = ts(2023, 1, 2, 0);
        let end = ts(2023, 1, 1, 0);
        let amounts = decompose(start, end, 3);
        assert_eq!(
            amounts,
            vec![DailyAmount {
                start_time: start,
                end_time: end,
                amount: i128::from(end - start) * 3,
            }]
        );
        assert!(amounts[0].amount < 0);
    }

    #[test]
    fn pre_epoch_intervals_floor_to_earlier_days() {
        // 1969-12-31T18:00:00Z .. 1970-01-01T06:00:00Z crosses the epoch.
        let amounts = decompose(-21_600, 21_600, 1);
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts[0].end_time, 0);
        assert_eq!(amounts[0].amount, 21_600);
        assert_eq!(amounts[1].start_time, 0);
        assert_eq!(amounts[1].amount, 21_600);
    }
}
