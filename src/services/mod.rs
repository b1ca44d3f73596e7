pub mod order_store;
pub mod mysql_store;
pub mod memory_store;

pub mod order_service;
pub mod book_service;

pub use memory_store::MemoryOrderStore;
pub use mysql_store::MySqlOrderStore;
pub use order_store::{OrderStore, StoreError};
