//! MySQL-backed [`OrderStore`].
//!
//! Expected table layout (created out of band):
//!
//! ```sql
//! CREATE TABLE `order` (
//!     id       BIGINT AUTO_INCREMENT PRIMARY KEY,
//!     symbol   VARCHAR(64)  NOT NULL,
//!     side     VARCHAR(16)  NOT NULL,
//!     price    VARCHAR(64)  NOT NULL,
//!     quantity BIGINT       NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{NewOrder, OrderId, PriceLevel, Side};

use super::order_store::{OrderStore, StoreError};

#[derive(Debug, Clone)]
pub struct MySqlOrderStore {
    pool: MySqlPool,
    insert_sql: String,
    levels_sql: String,
}

impl MySqlOrderStore {
    /// Builds the pool without connecting. Connections are opened on first
    /// use, so the service can start while the database is still down.
    pub fn connect_lazy(settings: &Settings) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .connect_lazy(&settings.database_url)
            .map_err(classify)?;

        Ok(Self::with_pool(pool, &settings.order_table))
    }

    pub fn with_pool(pool: MySqlPool, table: &str) -> Self {
        Self {
            pool,
            insert_sql: format!(
                "INSERT INTO {table} (symbol, side, price, quantity) VALUES (?, ?, ?, ?)"
            ),
            // SUM over BIGINT comes back as DECIMAL in MySQL; cast it back.
            levels_sql: format!(
                "SELECT COUNT(id) AS depth, price, CAST(SUM(quantity) AS SIGNED) AS quantity \
                 FROM {table} WHERE symbol = ? AND side = ? GROUP BY price"
            ),
        }
    }
}

/// Connection-level failures mean the store is unreachable; everything else
/// is blamed on the statement.
fn classify(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Statement(other.to_string()),
    }
}

#[async_trait]
impl OrderStore for MySqlOrderStore {
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(classify)?;

        let res = sqlx::query(&self.insert_sql)
            .bind(&order.symbol)
            .bind(&order.side)
            .bind(&order.price)
            .bind(order.quantity)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                warn!("insert failed: {e}");
                classify(e)
            })?;

        let id = i64::try_from(res.last_insert_id())
            .map_err(|e| StoreError::Statement(format!("order id out of range: {e}")))?;
        debug!("order {} persisted", id);
        Ok(OrderId(id))
    }

    async fn price_levels(&self, symbol: &str, side: Side) -> Result<Vec<PriceLevel>, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(classify)?;

        let rows = sqlx::query(&self.levels_sql)
            .bind(symbol)
            .bind(side.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(classify)?;

        rows.iter()
            .map(|row| -> Result<PriceLevel, StoreError> {
                Ok(PriceLevel {
                    count: row.try_get::<i64, _>("depth").map_err(classify)?,
                    price: row.try_get::<String, _>("price").map_err(classify)?,
                    quantity: row
                        .try_get::<Option<i64>, _>("quantity")
                        .map_err(classify)?
                        .unwrap_or(0),
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }
}
