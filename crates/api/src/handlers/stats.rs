//! Aggregate statistics handler.

use axum::extract::State;
use axum::Json;
use stockroom_db::models::stats::StatsSummary;
use stockroom_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/products/stats
///
/// Counts by brand and status, average price by brand, and the total
/// number of in-stock products.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DataResponse<StatsSummary>>> {
    let stats = StatsRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
