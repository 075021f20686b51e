use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rivulet_core::connector::{RivuletConnector, StreamPeriodsProvider, TokenProvider};
use rivulet_core::{Address, PeriodQuery, RivuletError, StreamPeriod, Token};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(RivuletError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    period_rules: HashMap<u64, MockBehavior<Vec<StreamPeriod>>>,
    token_rules: HashMap<String, MockBehavior<Token>>,
    period_requests: Vec<(u64, PeriodQuery)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `stream_periods` calls on a specific chain.
    pub async fn set_periods_behavior(
        &self,
        chain_id: u64,
        behavior: MockBehavior<Vec<StreamPeriod>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.period_rules.insert(chain_id, behavior);
    }

    /// Set the behavior for `token` calls for a specific token address.
    pub async fn set_token_behavior(&self, address: &Address, behavior: MockBehavior<Token>) {
        let mut guard = self.state.lock().await;
        guard.token_rules.insert(address.to_string(), behavior);
    }

    /// Return a copy of the request log for `stream_periods`.
    pub async fn period_requests(&self) -> Vec<(u64, PeriodQuery)> {
        let guard = self.state.lock().await;
        guard.period_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.period_rules.clear();
        guard.token_rules.clear();
        guard.period_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicConnector {
    /// Create a new dynamic connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn RivuletConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn RivuletConnector>, controller)
    }
}

#[async_trait]
impl RivuletConnector for DynamicConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_chain(&self, _chain_id: u64) -> bool {
        true
    }

    fn as_stream_periods_provider(&self) -> Option<&dyn StreamPeriodsProvider> {
        Some(self as &dyn StreamPeriodsProvider)
    }

    fn as_token_provider(&self) -> Option<&dyn TokenProvider> {
        Some(self as &dyn TokenProvider)
    }
}

#[async_trait]
impl StreamPeriodsProvider for DynamicConnector {
    async fn stream_periods(
        &self,
        chain_id: u64,
        query: &PeriodQuery,
    ) -> Result<Vec<StreamPeriod>, RivuletError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.period_requests.push((chain_id, query.clone()));
            guard.period_rules.get(&chain_id).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(periods)) => Ok(periods),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
            None => Err(RivuletError::not_found(format!(
                "periods on chain {chain_id}"
            ))),
        }
    }
}

#[async_trait]
impl TokenProvider for DynamicConnector {
    async fn token(&self, chain_id: u64, address: &Address) -> Result<Token, RivuletError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.token_rules.get(address.as_str()).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(token)) => Ok(token),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
            None => Err(RivuletError::not_found(format!(
                "token {address} on chain {chain_id}"
            ))),
        }
    }
}
