pub mod order;
pub mod book;

pub use order::{NewOrder, OrderId, OrderRequest, OrderResponse, Side};
pub use book::{BookEntry, BookRequest, BookResponse, PriceLevel};
