use crate::models::BalanceResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// Unknown users get a zero-valued mapping, not an error
pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<BalanceResponse> {
    let balances = state.engine.read().await.balances(&user_id);
    Json(BalanceResponse { balances })
}
