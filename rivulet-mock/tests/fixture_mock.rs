use rivulet_core::connector::RivuletConnector;
use rivulet_core::{Address, PeriodQuery, ReportingWindow, RivuletError};
use rivulet_mock::{FAIL_ADDRESS, MockConnector};

fn addr(s: &str) -> Address {
    s.parse().expect("valid test address")
}

fn query(addresses: Vec<Address>, start: i64, end: i64) -> PeriodQuery {
    PeriodQuery {
        addresses,
        counterparties: Vec::new(),
        window: ReportingWindow::new(start, end).expect("valid window"),
    }
}

#[tokio::test]
async fn returns_fixture_periods_for_known_account() {
    let mock = MockConnector::new();
    let provider = mock.as_stream_periods_provider().expect("capability");

    let alice = addr("0x1111111111111111111111111111111111111111");
    let periods = provider
        .stream_periods(137, &query(vec![alice.clone()], 0, 2_000_000_000))
        .await
        .expect("fixtures");

    assert_eq!(periods.len(), 2);
    assert!(periods.iter().all(|p| p.sender == alice));
    assert!(periods.iter().all(|p| p.daily_amounts.is_empty()));
}

#[tokio::test]
async fn window_filter_drops_closed_periods_before_start() {
    let mock = MockConnector::new();
    let provider = mock.as_stream_periods_provider().expect("capability");

    let alice = addr("0x1111111111111111111111111111111111111111");
    // Window opens after the January stream closed; only the open stream stays.
    let periods = provider
        .stream_periods(137, &query(vec![alice], 1_690_000_000, 1_700_000_000))
        .await
        .expect("fixtures");

    assert_eq!(periods.len(), 1);
    assert!(periods[0].stopped_at.is_none());
}

#[tokio::test]
async fn counterparty_filter_narrows_results() {
    let mock = MockConnector::new();
    let provider = mock.as_stream_periods_provider().expect("capability");

    let alice = addr("0x1111111111111111111111111111111111111111");
    let bob = addr("0x2222222222222222222222222222222222222222");
    let q = PeriodQuery {
        addresses: vec![alice],
        counterparties: vec![bob.clone()],
        window: ReportingWindow::new(0, 2_000_000_000).expect("valid window"),
    };
    let periods = provider.stream_periods(137, &q).await.expect("fixtures");
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].receiver, bob);
}

#[tokio::test]
async fn fail_address_forces_connector_error() {
    let mock = MockConnector::new();
    let provider = mock.as_stream_periods_provider().expect("capability");

    let err = provider
        .stream_periods(137, &query(vec![addr(FAIL_ADDRESS)], 0, 1))
        .await
        .expect_err("forced failure");
    assert!(matches!(err, RivuletError::Connector { .. }));
}

#[tokio::test]
async fn token_lookup_hits_and_misses() {
    let mock = MockConnector::new();
    let tokens = mock.as_token_provider().expect("capability");

    let usdcx = tokens
        .token(137, &addr("0x00000000000000000000000000000000000000aa"))
        .await
        .expect("known token");
    assert_eq!(usdcx.symbol.as_deref(), Some("USDCx"));
    assert_eq!(usdcx.decimals, 18);

    let missing = tokens
        .token(137, &addr("0x00000000000000000000000000000000000000cc"))
        .await
        .expect_err("unknown token");
    assert!(matches!(missing, RivuletError::NotFound { .. }));
}
