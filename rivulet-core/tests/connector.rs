use async_trait::async_trait;
use rivulet_core::connector::{RivuletConnector, StreamPeriodsProvider};
use rivulet_core::{Address, PeriodQuery, ReportingWindow, RivuletError, StreamPeriod, Token};

struct StaticConnector {
    periods: Vec<StreamPeriod>,
}

#[async_trait]
impl StreamPeriodsProvider for StaticConnector {
    async fn stream_periods(
        &self,
        _chain_id: u64,
        _query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError> {
        Ok(self.periods.clone())
    }
}

impl RivuletConnector for StaticConnector {
    fn name(&self) -> &'static str {
        "static"
    }
    fn supports_chain(&self, chain_id: u64) -> bool {
        chain_id == 137
    }
    fn as_stream_periods_provider(&self) -> Option<&dyn StreamPeriodsProvider> {
        Some(self)
    }
}

fn sample_period() -> StreamPeriod {
    StreamPeriod {
        chain_id: 137,
        sender: "0x1111111111111111111111111111111111111111"
            .parse::<Address>()
            .expect("valid address"),
        receiver: "0x2222222222222222222222222222222222222222"
            .parse::<Address>()
            .expect("valid address"),
        token: Token {
            address: "0x00000000000000000000000000000000000000aa"
                .parse::<Address>()
                .expect("valid address"),
            symbol: None,
            decimals: 18,
        },
        flow_rate: 5,
        started_at: 0,
        stopped_at: None,
        started_at_block: 1,
        stopped_at_block: None,
        started_at_tx: "0xaaaa".into(),
        stopped_at_tx: None,
        daily_amounts: Vec::new(),
    }
}

#[test]
fn key_mirrors_the_static_name_and_defaults_apply() {
    let c = StaticConnector { periods: vec![] };
    assert_eq!(c.key().as_str(), "static");
    assert_eq!(c.vendor(), "unknown");
    assert!(c.supports_chain(137));
    assert!(!c.supports_chain(1));
    // Token capability was never advertised.
    assert!(c.as_token_provider().is_none());
}

#[tokio::test]
async fn capability_directory_routes_to_the_provider() {
    let c = StaticConnector {
        periods: vec![sample_period()],
    };
    let provider = c.as_stream_periods_provider().expect("advertised");
    let query = PeriodQuery {
        addresses: vec![
            "0x1111111111111111111111111111111111111111"
                .parse::<Address>()
                .expect("valid address"),
        ],
        counterparties: Vec::new(),
        window: ReportingWindow::new(0, 86_400).expect("valid window"),
    };
    let periods = provider.stream_periods(137, &query).await.expect("static");
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].flow_rate, 5);
}
