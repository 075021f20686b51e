use std::collections::HashMap;

use httpmock::prelude::*;
use serde_json::{Value, json};
use url::Url;

use rivulet_graph::adapter::{RealAdapter, SubgraphPeriods, SubgraphTokens};
use rivulet_core::{Address, PeriodQuery, ReportingWindow, RivuletError};

fn addr(s: &str) -> Address {
    s.parse().expect("valid test address")
}

fn query(end: i64) -> PeriodQuery {
    PeriodQuery {
        addresses: vec![addr("0x1111111111111111111111111111111111111111")],
        counterparties: Vec::new(),
        window: ReportingWindow::new(0, end).expect("valid window"),
    }
}

fn adapter_for(server: &MockServer, chain_id: u64, path: &str) -> RealAdapter {
    let endpoints = HashMap::from([(
        chain_id,
        Url::parse(&server.url(path)).expect("mock server url"),
    )]);
    RealAdapter::new(reqwest::Client::new(), endpoints)
}

fn raw_period(started_at: i64, stopped_at: Option<i64>) -> Value {
    json!({
        "sender": { "id": "0x1111111111111111111111111111111111111111" },
        "receiver": { "id": "0x2222222222222222222222222222222222222222" },
        "token": {
            "id": "0x00000000000000000000000000000000000000aa",
            "symbol": "USDCx",
            "decimals": 18
        },
        "flowRate": "385802469135802",
        "startedAtTimestamp": started_at.to_string(),
        "stoppedAtTimestamp": stopped_at.map(|s| s.to_string()),
        "startedAtBlockNumber": "38000000",
        "stoppedAtBlockNumber": stopped_at.map(|_| "39000000"),
        "startedAtEvent": { "transactionHash": "0xaaaa" },
        "stoppedAtEvent": stopped_at.map(|_| json!({ "transactionHash": "0xbbbb" }))
    })
}

#[tokio::test]
async fn fetches_and_flattens_a_single_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon");
            then.status(200).json_body(json!({
                "data": { "streamPeriods": [raw_period(1_672_574_400, Some(1_675_123_200))] }
            }));
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let periods = adapter
        .fetch_periods(137, &query(2_000_000_000))
        .await
        .expect("one page");

    mock.assert_async().await;
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].chain_id, 137);
    assert_eq!(periods[0].flow_rate, 385_802_469_135_802);
    assert_eq!(periods[0].stopped_at, Some(1_675_123_200));
}

#[tokio::test]
async fn paginates_until_a_short_page() {
    let server = MockServer::start_async().await;
    // Full first page forces a second request; the short second page ends the loop.
    let first_page: Vec<Value> = (0..1_000).map(|i| raw_period(1_600_000_000 + i, None)).collect();
    let page1 = server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon").body_includes("\"skip\":0");
            then.status(200)
                .json_body(json!({ "data": { "streamPeriods": first_page } }));
        })
        .await;
    let page2 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/polygon")
                .body_includes("\"skip\":1000");
            then.status(200).json_body(json!({
                "data": { "streamPeriods": [raw_period(1_700_000_000, None)] }
            }));
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let periods = adapter
        .fetch_periods(137, &query(2_000_000_000))
        .await
        .expect("two pages");

    page1.assert_async().await;
    page2.assert_async().await;
    assert_eq!(periods.len(), 1_001);
}

#[tokio::test]
async fn window_start_filters_closed_periods_client_side() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon");
            then.status(200).json_body(json!({
                "data": { "streamPeriods": [
                    raw_period(1_500_000_000, Some(1_550_000_000)),
                    raw_period(1_500_000_000, None)
                ] }
            }));
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let q = PeriodQuery {
        addresses: vec![addr("0x1111111111111111111111111111111111111111")],
        counterparties: Vec::new(),
        window: ReportingWindow::new(1_600_000_000, 2_000_000_000).expect("valid window"),
    };
    let periods = adapter.fetch_periods(137, &q).await.expect("fetched");

    // The closed period ended before the window opened; only the open one stays.
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].stopped_at, None);
}

#[tokio::test]
async fn graphql_errors_surface_as_connector_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon");
            then.status(200).json_body(json!({
                "errors": [{ "message": "indexing error: block 123 reorged" }]
            }));
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let err = adapter
        .fetch_periods(137, &query(1))
        .await
        .expect_err("graphql errors");
    match err {
        RivuletError::Connector { msg, .. } => assert!(msg.contains("indexing error")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn http_failures_surface_as_connector_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon");
            then.status(502);
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let err = adapter
        .fetch_periods(137, &query(1))
        .await
        .expect_err("bad gateway");
    match err {
        RivuletError::Connector { msg, .. } => assert!(msg.contains("502")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_chain_is_unsupported_without_a_request() {
    let server = MockServer::start_async().await;
    let adapter = adapter_for(&server, 137, "/polygon");
    let err = adapter
        .fetch_periods(42_161, &query(1))
        .await
        .expect_err("no endpoint");
    assert!(matches!(err, RivuletError::Unsupported { .. }));
}

#[tokio::test]
async fn missing_token_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/polygon");
            then.status(200).json_body(json!({ "data": { "token": null } }));
        })
        .await;

    let adapter = adapter_for(&server, 137, "/polygon");
    let err = adapter
        .fetch_token(137, &addr("0x00000000000000000000000000000000000000aa"))
        .await
        .expect_err("unknown token");
    assert!(matches!(err, RivuletError::NotFound { .. }));
}
