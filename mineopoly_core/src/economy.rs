use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{InventoryItem, ResourceKind};

/// Prices the market pays per resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    prices: HashMap<ResourceKind, u32>,
}

impl Default for Economy {
    fn default() -> Self {
        Economy::new([
            (ResourceKind::Diamond, 400),
            (ResourceKind::Emerald, 300),
            (ResourceKind::Ruby, 200),
        ])
    }
}

impl Economy {
    pub fn new(prices: impl IntoIterator<Item = (ResourceKind, u32)>) -> Self {
        Economy {
            prices: prices.into_iter().collect(),
        }
    }

    /// Price of one unit, 0 for unpriced kinds.
    pub fn price_of(&self, kind: ResourceKind) -> u32 {
        self.prices.get(&kind).copied().unwrap_or(0)
    }

    pub fn sell_price(&self, items: &[InventoryItem]) -> u32 {
        items.iter().map(|item| self.price_of(item.kind)).sum()
    }
}
