use axum::{Router, routing::post};

use crate::{AppState, controllers::{home_controller, order_controller}};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/order",
        post(order_controller::post_order).fallback(home_controller::wrong_method),
    )
}
