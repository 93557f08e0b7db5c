use crate::error::AppError;
use crate::models::{CreateOrderRequest, OrderResponse};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, AppError> {
    let Json(payload) = payload?;
    let order = payload.into_order()?;

    // Write guard spans matching, settlement and residual insertion
    let receipt = {
        let mut engine = state.engine.write().await;
        engine.place_order(order.side, order.price, order.quantity, &order.user_id)?
    };

    tracing::info!(
        user_id = %order.user_id,
        side = %order.side,
        filled = %receipt.filled_quantity,
        trades = receipt.trades.len(),
        "Order placed"
    );

    Ok(Json(OrderResponse {
        filled_quantity: receipt.filled_quantity,
    }))
}
