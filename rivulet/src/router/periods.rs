use rivulet_core::ledger::window::with_daily_amounts;
use rivulet_core::{
    AccountingReport, AccountingRequest, Capability, PeriodQuery, ReportingWindow, RivuletError,
    StreamPeriod,
};

use crate::Rivulet;
use crate::router::util;

impl Rivulet {
    /// Fetch stream periods for the requested accounts and attach their
    /// daily-ledger decomposition.
    ///
    /// Behavior and trade-offs:
    /// - Validates the request shape first; an empty address or chain list
    ///   aborts the whole request with `InvalidArg` before any connector or
    ///   engine call.
    /// - Resolves the reporting window once (defaults: Unix epoch → now) and
    ///   uses it for every chain.
    /// - Chains are queried concurrently; each chain honors the builder's
    ///   `FetchStrategy` across its eligible connectors.
    /// - Partial success is a report, not an error: a chain whose connectors
    ///   all failed contributes a warning while other chains' periods are
    ///   returned. Only when every chain fails does the request fail.
    /// - Every returned period carries `daily_amounts`: contiguous,
    ///   UTC-day-aligned slices clipped to the window, whose quantities sum
    ///   exactly to the flow over the clipped interval.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed request or window, a collapsed
    /// connector error when every chain fails, and `RequestTimeout` when the
    /// configured overall deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "rivulet::router",
            skip(self, req),
            fields(addresses = req.addresses.len(), chains = req.chain_ids.len()),
        )
    )]
    pub async fn stream_periods(
        &self,
        req: &AccountingRequest,
    ) -> Result<AccountingReport, RivuletError> {
        req.validate()?;
        let window = ReportingWindow::resolve(req.start, req.end)?;
        let query = PeriodQuery {
            addresses: req.addresses.clone(),
            counterparties: req.counterparties.clone(),
            window,
        };

        let tasks = req.chain_ids.iter().copied().map(|chain_id| {
            let query = query.clone();
            async move {
                self.fetch_single(
                    chain_id,
                    Capability::StreamPeriods,
                    "stream periods",
                    move |c| {
                        if c.as_stream_periods_provider().is_none() {
                            return None;
                        }
                        let q = query.clone();
                        Some(async move {
                            match c.as_stream_periods_provider() {
                                Some(p) => p.stream_periods(chain_id, &q).await,
                                None => Err(RivuletError::connector(
                                    c.name(),
                                    "missing stream-periods capability during call",
                                )),
                            }
                        })
                    },
                )
                .await
            }
        });

        let results = util::join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| RivuletError::request_timeout(Capability::StreamPeriods.as_str()))?;

        let mut periods: Vec<StreamPeriod> = Vec::new();
        let mut warnings: Vec<RivuletError> = Vec::new();
        let mut any_success = false;
        for res in results {
            match res {
                Ok(list) => {
                    any_success = true;
                    periods.extend(
                        list.into_iter().map(|p| with_daily_amounts(p, &window)),
                    );
                }
                Err(e) => warnings.push(e),
            }
        }

        if !any_success && !warnings.is_empty() {
            return Err(if warnings.len() == 1 {
                warnings.remove(0)
            } else {
                RivuletError::AllConnectorsFailed(warnings)
            });
        }

        periods.sort_by(|a, b| {
            (a.chain_id, a.started_at, a.stopped_at).cmp(&(b.chain_id, b.started_at, b.stopped_at))
        });
        Ok(AccountingReport { periods, warnings })
    }
}
