use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::trash::{Ratings, TrashUpload};
use crate::pickup::tasks::{shape_assigned_trash, CollectorTask};
use crate::state::AppState;
use crate::store::StoreResponse;

/// Ratings arrive positionally: wet, recyclable, non-recyclable.
#[derive(Debug, Deserialize)]
pub struct TrashUploadQuery {
    pub user_id: String,
    pub rating_1: f64,
    pub rating_2: f64,
    pub rating_3: f64,
}

impl TrashUploadQuery {
    /// Ratings are unbounded, but must be finite numbers.
    fn ratings(&self) -> Result<Ratings, AppError> {
        for (name, value) in [
            ("rating_1", self.rating_1),
            ("rating_2", self.rating_2),
            ("rating_3", self.rating_3),
        ] {
            if !value.is_finite() {
                return Err(AppError::Validation(format!(
                    "{name} must be a finite number"
                )));
            }
        }
        Ok(Ratings {
            wet: self.rating_1,
            recyclable: self.rating_2,
            nonrecyclable: self.rating_3,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateQuery {
    pub user_id: String,
    pub date: NaiveDate,
}

/// POST /trash_upload
pub async fn handle_trash_upload(
    State(state): State<AppState>,
    Query(params): Query<TrashUploadQuery>,
) -> Result<Json<StoreResponse<TrashUpload>>, AppError> {
    let ratings = params.ratings()?;
    let response = state
        .store
        .insert_trash_upload(&params.user_id, ratings)
        .await?;
    info!("Trash upload recorded for user {}", params.user_id);
    Ok(Json(response))
}

/// GET /get_trash_for_collector/:collector_id
pub async fn handle_get_trash_for_collector(
    State(state): State<AppState>,
    Path(collector_id): Path<String>,
) -> Result<Json<Vec<CollectorTask>>, AppError> {
    let rows = state
        .store
        .get_assigned_trash_for_collector(&collector_id)
        .await?;
    Ok(Json(shape_assigned_trash(rows)?))
}

/// POST /update_status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Query(params): Query<StatusUpdateQuery>,
) -> Result<Json<StoreResponse<TrashUpload>>, AppError> {
    let response = state
        .store
        .update_trash_upload_status(&params.user_id, params.date)
        .await?;
    info!(
        "Marked {} upload(s) of user {} on {} as collected",
        response.data.len(),
        params.user_id,
        params.date
    );
    Ok(Json(response))
}
