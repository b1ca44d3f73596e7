use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{NewOrder, OrderId, PriceLevel, Side};

use super::order_store::{OrderStore, StoreError};

/// A persisted row as the in-memory store keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOrder {
    pub id: OrderId,
    pub symbol: String,
    pub side: String,
    pub price: String,
    pub quantity: i64,
}

/// In-process [`OrderStore`]. Ids start at 1 like an auto-increment column,
/// and price levels come back in the order their price was first seen.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    rows: RwLock<Vec<StoredOrder>>,
    offline: AtomicBool,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a lost connection: every call fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn rows(&self) -> Vec<StoredOrder> {
        self.rows.read().await.clone()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        self.check_online()?;

        let mut rows = self.rows.write().await;
        let id = OrderId(rows.len() as i64 + 1);
        rows.push(StoredOrder {
            id,
            symbol: order.symbol.clone(),
            side: order.side.clone(),
            price: order.price.clone(),
            quantity: order.quantity,
        });
        Ok(id)
    }

    async fn price_levels(&self, symbol: &str, side: Side) -> Result<Vec<PriceLevel>, StoreError> {
        self.check_online()?;

        let rows = self.rows.read().await;
        let mut levels: Vec<PriceLevel> = Vec::new();

        for row in rows
            .iter()
            .filter(|r| r.symbol == symbol && r.side == side.as_str())
        {
            match levels.iter_mut().find(|l| l.price == row.price) {
                Some(level) => {
                    level.count += 1;
                    level.quantity = level.quantity.saturating_add(row.quantity);
                }
                None => levels.push(PriceLevel {
                    count: 1,
                    price: row.price.clone(),
                    quantity: row.quantity,
                }),
            }
        }

        Ok(levels)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
