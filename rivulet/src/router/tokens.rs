use rivulet_core::{Address, Capability, RivuletError, Token};

use crate::Rivulet;

impl Rivulet {
    /// Resolve token metadata (symbol, decimals) for a contract address.
    ///
    /// Behavior and trade-offs:
    /// - Honors the builder's `FetchStrategy`: `PriorityWithFallback` applies
    ///   the per-connector timeout and aggregates errors; `Latency` races
    ///   connectors and returns the first success.
    /// - `NotFound` from every attempted connector maps to a single
    ///   `NotFound` outcome.
    ///
    /// # Errors
    /// Returns an error if no eligible connector succeeds or none support the
    /// capability on the given chain.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "rivulet::router",
            skip(self, address),
            fields(chain_id = chain_id, token = %address),
        )
    )]
    pub async fn token(&self, chain_id: u64, address: &Address) -> Result<Token, RivuletError> {
        let address = address.clone();
        self.fetch_single(chain_id, Capability::Token, "token", move |c| {
            if c.as_token_provider().is_none() {
                return None;
            }
            let a = address.clone();
            Some(async move {
                match c.as_token_provider() {
                    Some(p) => p.token(chain_id, &a).await,
                    None => Err(RivuletError::connector(
                        c.name(),
                        "missing token capability during call",
                    )),
                }
            })
        })
        .await
    }
}
