//! Route table

use axum::Router;
use axum::routing::{get, post};

use super::AppState;
use super::handlers::{auth, carts, orders, products};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/products", post(products::create).get(products::list))
        .route(
            "/products/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/order", post(orders::create).get(orders::list))
        .route(
            "/order/{id}",
            get(orders::get_by_id)
                .put(orders::update)
                .delete(orders::remove),
        )
        .route("/cart", post(carts::create).get(carts::list))
        .route(
            "/cart/{id}",
            get(carts::get_by_id)
                .put(carts::update)
                .delete(carts::remove),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "Server Connected!"
}
