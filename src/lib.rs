//! Library entrypoint for OrderDesk.
//!
//! Order intake and book-depth queries over HTTPS. The binary in `main.rs`
//! wires a MySQL store into [`AppState`]; integration tests under `tests/`
//! build the same router around an in-memory store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn services::OrderStore>,
    pub settings: config::Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn services::OrderStore>, settings: config::Settings) -> Self {
        Self { store, settings }
    }
}
