use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the rivulet workspace.
///
/// This wraps capability mismatches, argument validation errors,
/// connector-tagged failures, not-found conditions, and an aggregate for
/// multi-connector attempts.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RivuletError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "stream-periods").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, unparsable numerics, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource, account, or token could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "token 0xabc… on chain 137".
        what: String,
    },

    /// All selected connectors failed; contains the individual failures.
    #[error("all connectors failed: {0:?}")]
    AllConnectorsFailed(Vec<RivuletError>),

    /// An individual connector call exceeded the configured timeout.
    #[error("connector timed out: {capability} via {connector}")]
    ConnectorTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "stream-periods", "token").
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// All attempted connectors timed out for the requested capability.
    #[error("all connectors timed out: {capability}")]
    AllConnectorsTimedOut {
        /// Capability label that timed out across all connectors.
        capability: String,
    },
}

impl RivuletError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ConnectorTimeout` error.
    pub fn connector_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ConnectorTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Non-actionable errors are those indicating capability absence or a benign
    /// not-found condition. Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } => false,
            Self::AllConnectorsFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllConnectorsFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllConnectorsFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
