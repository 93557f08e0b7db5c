use crate::handlers::{account, market, order};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/order", post(order::create_order))
        .route("/depth", get(market::get_depth))
        .route("/balance/{user_id}", get(account::get_balance))
        .route("/quote", post(market::get_quote))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
