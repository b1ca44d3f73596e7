use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use orderdesk::models::{NewOrder, OrderId, PriceLevel, Side};
use orderdesk::services::{MemoryOrderStore, OrderStore, StoreError};
use orderdesk::{config::Settings, routes, AppState};
use tower::ServiceExt;

fn test_state(settings: Settings) -> (AppState, Arc<MemoryOrderStore>) {
    let store = Arc::new(MemoryOrderStore::new());
    (AppState::new(store.clone(), settings), store)
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn post_order(body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri("/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Store whose statements always fail while the connection looks healthy.
struct BrokenStore;

#[async_trait]
impl OrderStore for BrokenStore {
    async fn insert_order(&self, _order: &NewOrder) -> Result<OrderId, StoreError> {
        Err(StoreError::Statement("Duplicate entry".into()))
    }

    async fn price_levels(&self, _symbol: &str, _side: Side) -> Result<Vec<PriceLevel>, StoreError> {
        Err(StoreError::Statement("Unknown column".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn post_order_on_empty_table_returns_first_id() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"5"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert_eq!(body, r#"{"order_id":1}"#);

    let rows = store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, OrderId(1));
    assert_eq!(rows[0].symbol, "BTC");
    assert_eq!(rows[0].side, "buy");
    assert_eq!(rows[0].price, "100");
    assert_eq!(rows[0].quantity, 5);
}

#[tokio::test]
async fn post_order_with_non_numeric_quantity_stores_zero() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"abc"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&response_body_string(res).await).unwrap();
    assert_eq!(body["order_id"], 1);

    let rows = store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 0);
}

#[tokio::test]
async fn post_order_ids_increase_per_insert() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    for expected in 1..=3 {
        let res = app
            .clone()
            .oneshot(post_order(r#"{"symbol":"ETH","side":"sell","price":"2.5","quantity":"1"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = response_body_string(res).await;
        assert_eq!(body, format!(r#"{{"order_id":{expected}}}"#));
    }

    assert_eq!(store.rows().await.len(), 3);
}

#[tokio::test]
async fn post_order_missing_fields_default_to_empty() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app.oneshot(post_order(r#"{"symbol":"BTC"}"#)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let rows = store.rows().await;
    assert_eq!(rows[0].side, "");
    assert_eq!(rows[0].price, "");
    assert_eq!(rows[0].quantity, 0);
}

#[tokio::test]
async fn post_order_non_json_body_returns_402() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app.oneshot(post_order("symbol=BTC&side=buy")).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);

    let body = response_body_string(res).await;
    assert_eq!(body, "get order parameters failed");
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn post_order_wrong_field_type_returns_402() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":5}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn post_order_accepts_body_without_content_type() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/order")
        .body(axum::body::Body::from(
            r#"{"symbol":"BTC","side":"sell","price":"101","quantity":"2"}"#,
        ))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.rows().await.len(), 1);
}

#[tokio::test]
async fn get_order_returns_404_without_processing() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let req = Request::builder()
        .method("GET")
        .uri("/order")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = response_body_string(res).await;
    assert_eq!(body, "please use POST method");
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn put_order_with_valid_body_is_not_persisted() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let req = Request::builder()
        .method("PUT")
        .uri("/order")
        .body(axum::body::Body::from(
            r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"5"}"#,
        ))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn post_order_store_offline_returns_404() {
    let (state, store) = test_state(Settings::default());
    store.set_offline(true);
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"5"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = response_body_string(res).await;
    assert_eq!(body, "connect to mysql error");
}

#[tokio::test]
async fn post_order_insert_failure_returns_402() {
    let state = AppState::new(Arc::new(BrokenStore), Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"5"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);

    let body = response_body_string(res).await;
    assert_eq!(body, "get order resp failed");
}

#[tokio::test]
async fn strict_mode_rejects_non_numeric_quantity() {
    let settings = Settings {
        strict_quantity: true,
        ..Settings::default()
    };
    let (state, store) = test_state(settings);
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"abc"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn strict_mode_still_accepts_valid_orders() {
    let settings = Settings {
        strict_quantity: true,
        ..Settings::default()
    };
    let (state, store) = test_state(settings);
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"sell","price":"100.50","quantity":"7"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.rows().await[0].quantity, 7);
}

#[tokio::test]
async fn post_order_null_field_is_stored_as_empty() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(r#"{"symbol":"BTC","side":"buy","price":null,"quantity":"5"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(response_body_string(res).await, r#"{"order_id":1}"#);

    let rows = store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, "");
    assert_eq!(rows[0].quantity, 5);
}

#[tokio::test]
async fn post_order_out_of_range_quantity_is_clamped() {
    let (state, store) = test_state(Settings::default());
    let app = routes::app(state);

    let res = app
        .oneshot(post_order(
            r#"{"symbol":"BTC","side":"buy","price":"100","quantity":"99999999999999999999"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.rows().await[0].quantity, i64::MAX);
}
