//! Raw subgraph record shapes and their flattening into workspace DTOs.
//!
//! The subgraph nests identifying fields inside `sender`/`receiver`/`token`/
//! event objects and encodes big integers as decimal strings. Everything is
//! flattened here, at the connector boundary, so the rest of the workspace
//! only ever sees flat, typed records.

use serde::Deserialize;

use rivulet_core::{RivuletError, StreamPeriod, Token};

#[derive(Debug, Deserialize)]
pub(crate) struct RawAccount {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawToken {
    pub id: String,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEvent {
    pub transaction_hash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStreamPeriod {
    pub sender: RawAccount,
    pub receiver: RawAccount,
    pub token: RawToken,
    pub flow_rate: String,
    pub started_at_timestamp: String,
    pub stopped_at_timestamp: Option<String>,
    pub started_at_block_number: String,
    pub stopped_at_block_number: Option<String>,
    pub started_at_event: RawEvent,
    pub stopped_at_event: Option<RawEvent>,
}

fn parse_num<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, RivuletError> {
    raw.trim()
        .parse()
        .map_err(|_| RivuletError::Data(format!("unparsable {field}: {raw:?}")))
}

impl RawStreamPeriod {
    /// Flatten the nested subgraph record into a workspace `StreamPeriod`.
    ///
    /// Each numeric field is parsed individually so a malformed record names
    /// the offending field instead of failing opaquely.
    pub(crate) fn flatten(self, chain_id: u64) -> Result<StreamPeriod, RivuletError> {
        let stopped_at = self
            .stopped_at_timestamp
            .as_deref()
            .map(|raw| parse_num("stoppedAtTimestamp", raw))
            .transpose()?;
        let stopped_at_block = self
            .stopped_at_block_number
            .as_deref()
            .map(|raw| parse_num("stoppedAtBlockNumber", raw))
            .transpose()?;

        Ok(StreamPeriod {
            chain_id,
            sender: self.sender.id.parse()?,
            receiver: self.receiver.id.parse()?,
            token: Token {
                address: self.token.id.parse()?,
                symbol: self.token.symbol,
                decimals: self.token.decimals.unwrap_or(18),
            },
            flow_rate: parse_num("flowRate", &self.flow_rate)?,
            started_at: parse_num("startedAtTimestamp", &self.started_at_timestamp)?,
            stopped_at,
            started_at_block: parse_num("startedAtBlockNumber", &self.started_at_block_number)?,
            stopped_at_block,
            started_at_tx: self.started_at_event.transaction_hash,
            stopped_at_tx: self.stopped_at_event.map(|e| e.transaction_hash),
            daily_amounts: Vec::new(),
        })
    }
}

impl RawToken {
    pub(crate) fn flatten(self) -> Result<Token, RivuletError> {
        Ok(Token {
            address: self.id.parse()?,
            symbol: self.symbol,
            decimals: self.decimals.unwrap_or(18),
        })
    }
}
