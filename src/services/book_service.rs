use crate::{
    error::ApiError,
    models::{BookEntry, BookResponse, Side},
    AppState,
};

use super::order_store::StoreError;

/// Aggregated depth for one symbol. Sell is queried before buy; if either
/// query fails the whole book fails.
pub async fn get_book(state: &AppState, symbol: &str) -> Result<BookResponse, ApiError> {
    let mut book = BookResponse::default();

    for side in Side::ALL {
        let levels = state
            .store
            .price_levels(symbol, side)
            .await
            .map_err(|e| match e {
                StoreError::Unavailable(msg) => ApiError::StorageUnavailable(msg),
                StoreError::Statement(msg) => ApiError::Query(msg),
            })?;

        let entries: Vec<BookEntry> = levels.into_iter().map(BookEntry::from).collect();
        match side {
            Side::Sell => book.sell = entries,
            Side::Buy => book.buy = entries,
        }
    }

    Ok(book)
}
