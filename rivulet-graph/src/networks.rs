//! Built-in subgraph endpoints for the chains rivulet knows out of the box.

use std::collections::HashMap;

use url::Url;

/// Chains with a built-in endpoint, by canonical name.
const BUILTIN: &[(u64, &str, &str)] = &[
    (
        1,
        "ethereum",
        "https://subgraph-endpoints.rivulet.dev/ethereum/protocol-v1",
    ),
    (
        10,
        "optimism",
        "https://subgraph-endpoints.rivulet.dev/optimism-mainnet/protocol-v1",
    ),
    (
        100,
        "gnosis",
        "https://subgraph-endpoints.rivulet.dev/xdai-mainnet/protocol-v1",
    ),
    (
        137,
        "polygon",
        "https://subgraph-endpoints.rivulet.dev/polygon-mainnet/protocol-v1",
    ),
    (
        8453,
        "base",
        "https://subgraph-endpoints.rivulet.dev/base-mainnet/protocol-v1",
    ),
    (
        42161,
        "arbitrum",
        "https://subgraph-endpoints.rivulet.dev/arbitrum-one/protocol-v1",
    ),
    (
        43114,
        "avalanche",
        "https://subgraph-endpoints.rivulet.dev/avalanche-c/protocol-v1",
    ),
];

/// Endpoint map for every built-in chain.
///
/// The URLs above are statically well-formed; the parse cannot fail.
#[must_use]
pub fn default_endpoints() -> HashMap<u64, Url> {
    BUILTIN
        .iter()
        .filter_map(|(chain_id, _, raw)| Url::parse(raw).ok().map(|u| (*chain_id, u)))
        .collect()
}

/// Canonical name for a built-in chain id, if known.
#[must_use]
pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(id, _, _)| *id == chain_id)
        .map(|(_, name, _)| *name)
}
