use chrono::NaiveDateTime;
use rivulet_core::{Address, PeriodQuery, StreamPeriod, Timestamp};

use super::tokens;

/// Fixture accounts, stable across the test suite.
pub const ALICE: &str = "0x1111111111111111111111111111111111111111";
pub const BOB: &str = "0x2222222222222222222222222222222222222222";
pub const CAROL: &str = "0x3333333333333333333333333333333333333333";

/// Periods on `chain_id` involving the queried accounts, filtered to the
/// query window exactly as an indexed data source would filter them.
pub fn matching(chain_id: u64, query: &PeriodQuery) -> Vec<StreamPeriod> {
    all(chain_id)
        .into_iter()
        .filter(|p| {
            query.addresses.contains(&p.sender) || query.addresses.contains(&p.receiver)
        })
        .filter(|p| {
            query.counterparties.is_empty()
                || query.counterparties.contains(&p.sender)
                || query.counterparties.contains(&p.receiver)
        })
        .filter(|p| {
            p.started_at < query.window.end
                && p.stopped_at.is_none_or(|stop| stop >= query.window.start)
        })
        .collect()
}

fn all(chain_id: u64) -> Vec<StreamPeriod> {
    match chain_id {
        137 => vec![
            // Alice -> Bob, closed January stream.
            build(
                137,
                ALICE,
                BOB,
                tokens::USDCX,
                385_802_469_135_802, // ~1000/month at 18 decimals
                "2023-01-01 12:00:00",
                Some("2023-01-31 00:00:00"),
            ),
            // Alice -> Carol, still flowing.
            build(
                137,
                ALICE,
                CAROL,
                tokens::DAIX,
                192_901_234_567_901,
                "2023-02-15 08:30:00",
                None,
            ),
        ],
        10 => vec![build(
            10,
            BOB,
            ALICE,
            tokens::USDCX,
            771_604_938_271_604,
            "2023-03-01 00:00:00",
            Some("2023-03-08 00:00:00"),
        )],
        _ => Vec::new(),
    }
}

fn ts(s: &str) -> Timestamp {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap()
        .and_utc()
        .timestamp()
}

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn build(
    chain_id: u64,
    sender: &str,
    receiver: &str,
    token: &str,
    flow_rate: i128,
    started_at: &str,
    stopped_at: Option<&str>,
) -> StreamPeriod {
    let stopped = stopped_at.map(ts);
    StreamPeriod {
        chain_id,
        sender: addr(sender),
        receiver: addr(receiver),
        token: tokens::by_address(&addr(token)).unwrap(),
        flow_rate,
        started_at: ts(started_at),
        stopped_at: stopped,
        started_at_block: 38_000_000,
        stopped_at_block: stopped.map(|_| 39_000_000),
        started_at_tx: format!("0x{:064x}", chain_id + 1),
        stopped_at_tx: stopped.map(|_| format!("0x{:064x}", chain_id + 2)),
        daily_amounts: Vec::new(),
    }
}
