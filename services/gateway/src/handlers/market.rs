use crate::error::AppError;
use crate::models::{DepthResponse, QuoteRequest, QuoteResponse};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

pub async fn get_depth(State(state): State<AppState>) -> Json<DepthResponse> {
    let depth = state.engine.read().await.depth();
    Json(DepthResponse {
        depth: depth
            .into_iter()
            .map(|(price, level)| (price.to_string(), level))
            .collect(),
    })
}

pub async fn get_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(payload) = payload?;
    let query = payload.into_query()?;

    let quote = state.engine.read().await.quote(query.side, query.quantity)?;
    tracing::debug!(user_id = %query.user_id, side = %query.side, quantity = %query.quantity, %quote, "Quote served");

    Ok(Json(QuoteResponse { quote }))
}
