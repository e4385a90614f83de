use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::reports::{CollectorReportRow, PincodeRatingRow};
use crate::reports::overall::{build_overall_report, OverallReport};
use crate::state::AppState;
use crate::store::StoreResponse;

/// GET /average_ratings_per_pincode
pub async fn handle_average_ratings(
    State(state): State<AppState>,
) -> Result<Json<StoreResponse<PincodeRatingRow>>, AppError> {
    Ok(Json(state.store.get_average_ratings_per_pincode().await?))
}

/// GET /collectors_report
pub async fn handle_collectors_report(
    State(state): State<AppState>,
) -> Result<Json<StoreResponse<CollectorReportRow>>, AppError> {
    Ok(Json(state.store.get_collector_daily_report().await?))
}

/// GET /overall_report
/// Any failing aggregation fails the whole report.
pub async fn handle_overall_report(
    State(state): State<AppState>,
) -> Result<Json<OverallReport>, AppError> {
    let (ratings, collectors, metrics) = tokio::try_join!(
        state.store.get_average_ratings_per_pincode(),
        state.store.get_collector_daily_report(),
        state.store.get_daily_dashboard_metrics(),
    )?;
    Ok(Json(build_overall_report(
        ratings.data,
        collectors.data,
        metrics,
    )))
}
