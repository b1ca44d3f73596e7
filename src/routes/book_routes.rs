use axum::{Router, routing::post};

use crate::{AppState, controllers::{book_controller, home_controller}};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/book",
        post(book_controller::post_book).fallback(home_controller::wrong_method),
    )
}
