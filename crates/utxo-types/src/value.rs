use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Native-asset bundle: policy id -> asset name -> quantity.
///
/// Carried through the ledger untouched; only [`Value::coin`] takes part in
/// balance checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiAsset(BTreeMap<String, BTreeMap<String, u64>>);

impl MultiAsset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `quantity` of `policy.name`, merging with any existing amount.
    pub fn insert(&mut self, policy: impl Into<String>, name: impl Into<String>, quantity: u64) {
        let slot = self
            .0
            .entry(policy.into())
            .or_default()
            .entry(name.into())
            .or_insert(0);
        *slot = slot.saturating_add(quantity);
    }

    pub fn quantity(&self, policy: &str, name: &str) -> u64 {
        self.0
            .get(policy)
            .and_then(|assets| assets.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate `(policy, name, quantity)` triples in policy/name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.0.iter().flat_map(|(policy, assets)| {
            assets
                .iter()
                .map(move |(name, qty)| (policy.as_str(), name.as_str(), *qty))
        })
    }
}

/// Amount held by an output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    /// Base-currency amount (lovelace on mainnet).
    pub coin: u64,
    #[serde(default)]
    pub assets: MultiAsset,
}

impl Value {
    /// A value carrying only base currency.
    pub fn coin(coin: u64) -> Self {
        Self {
            coin,
            assets: MultiAsset::new(),
        }
    }

    pub fn with_asset(mut self, policy: impl Into<String>, name: impl Into<String>, quantity: u64) -> Self {
        self.assets.insert(policy, name, quantity);
        self
    }

    pub fn is_coin_only(&self) -> bool {
        self.assets.is_empty()
    }
}
