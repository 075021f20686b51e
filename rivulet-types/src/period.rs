//! Stream periods and their per-day accounting decomposition.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::RivuletError;

/// Seconds since the Unix epoch, UTC.
pub type Timestamp = i64;

/// Net base units of token transferred per second during a stream period.
///
/// Signed: a negative rate models net outflow. Upstream indexers encode the
/// rate as a 96-bit signed integer, so `i128` holds every representable rate
/// and every `duration * rate` product without overflow.
pub type FlowRate = i128;

/// Lowercase EVM account address (`0x` + 40 hex chars).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Returns the canonical lowercase string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = RivuletError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let v = value.trim();
        let hex = v
            .strip_prefix("0x")
            .ok_or_else(|| RivuletError::InvalidArg(format!("address must start with 0x: {v}")))?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RivuletError::InvalidArg(format!(
                "address must be 20 hex bytes: {v}"
            )));
        }
        Ok(Self(v.to_ascii_lowercase()))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// Token identity and display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token contract address.
    pub address: Address,
    /// Ticker symbol, when the data source knows it.
    pub symbol: Option<String>,
    /// Number of decimal places in the token's base unit.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

const fn default_decimals() -> u8 {
    18
}

/// Serialize 128-bit quantities as decimal strings.
///
/// JSON numbers cannot carry full 128-bit precision; upstream indexers use
/// string-encoded integers for the same reason.
pub(crate) mod base_units {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<i128>().map_err(D::Error::custom)
    }
}

/// A maximal interval during which a constant-rate token flow was active
/// between a sender and a receiver.
///
/// Fields are flat by design: connectors are responsible for flattening
/// whatever nested record shape their data source returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamPeriod {
    /// EVM chain id the stream lives on.
    pub chain_id: u64,
    /// Flow sender.
    pub sender: Address,
    /// Flow receiver.
    pub receiver: Address,
    /// Streamed token.
    pub token: Token,
    /// Constant flow rate in base units per second for this period's lifetime.
    #[serde(with = "base_units")]
    pub flow_rate: FlowRate,
    /// When the flow began.
    pub started_at: Timestamp,
    /// When the flow stopped; `None` means still active as of query time.
    pub stopped_at: Option<Timestamp>,
    /// Block number of the start event.
    pub started_at_block: u64,
    /// Block number of the stop event, when stopped.
    pub stopped_at_block: Option<u64>,
    /// Transaction hash of the start event (opaque).
    pub started_at_tx: String,
    /// Transaction hash of the stop event, when stopped (opaque).
    pub stopped_at_tx: Option<String>,
    /// Per-UTC-day decomposition over the requested reporting window.
    ///
    /// Empty on ingest; filled by the accounting engine.
    #[serde(default)]
    pub daily_amounts: Vec<DailyAmount>,
}

/// One UTC-day-aligned slice of a stream period with its exact flowed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAmount {
    /// Inclusive slice start.
    pub start_time: Timestamp,
    /// Exclusive slice end.
    pub end_time: Timestamp,
    /// Exact quantity flowed during `[start_time, end_time)`, in base units.
    #[serde(with = "base_units")]
    pub amount: i128,
}

impl DailyAmount {
    /// Convert the base-unit quantity into whole token units.
    ///
    /// # Errors
    /// Returns `RivuletError::Data` if the quantity does not fit the decimal
    /// mantissa at the requested scale.
    pub fn amount_in_units(&self, decimals: u8) -> Result<Decimal, RivuletError> {
        Decimal::try_from_i128_with_scale(self.amount, u32::from(decimals))
            .map_err(|e| RivuletError::Data(e.to_string()))
    }
}
