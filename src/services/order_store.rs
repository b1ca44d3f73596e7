use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewOrder, OrderId, PriceLevel, Side};

#[derive(Debug, Error)]
pub enum StoreError {
    /// No usable connection could be obtained.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The connection was fine but the statement failed.
    #[error("statement failed: {0}")]
    Statement(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Durable home of Order rows.
///
/// Implementations hold whatever connection machinery they need (a pool, a
/// lock-guarded vector); handlers only see this capability through
/// [`crate::AppState`]. Rows are insert-only.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist one order and return its generated id.
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, StoreError>;

    /// Orders for `symbol` on `side`, grouped by price. Level order is whatever
    /// the backend's grouping yields.
    async fn price_levels(&self, symbol: &str, side: Side) -> Result<Vec<PriceLevel>, StoreError>;

    /// Succeeds when a usable connection can be obtained.
    async fn ping(&self) -> Result<(), StoreError>;
}
