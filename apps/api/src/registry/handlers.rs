use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::collector::{Collector, PincodeAssignment};
use crate::models::user::User;
use crate::state::AppState;
use crate::store::StoreResponse;

/// Signup form fields. `name` is stored as the user's `full_name`.
#[derive(Debug, Deserialize)]
pub struct AddUserQuery {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<AddUserQuery> for User {
    fn from(q: AddUserQuery) -> Self {
        User {
            id: q.id,
            full_name: q.name,
            last_name: q.last_name,
            address_line1: q.address_line1,
            city: q.city,
            state: q.state,
            pincode: q.pincode,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignPincodeQuery {
    pub pincode: String,
    pub collector_id: String,
}

/// POST /add_user
pub async fn handle_add_user(
    State(state): State<AppState>,
    Query(params): Query<AddUserQuery>,
) -> Result<Json<StoreResponse<User>>, AppError> {
    let user = User::from(params);
    let response = state.store.insert_user(&user).await?;
    info!("Registered user {}", user.id);
    Ok(Json(response))
}

/// POST /add_collector
pub async fn handle_add_collector(
    State(state): State<AppState>,
    Json(collector): Json<Collector>,
) -> Result<Json<StoreResponse<Collector>>, AppError> {
    let response = state.store.insert_collector(&collector).await?;
    info!("Registered collector {}", collector.id);
    Ok(Json(response))
}

/// POST /assign_pincode
pub async fn handle_assign_pincode(
    State(state): State<AppState>,
    Query(params): Query<AssignPincodeQuery>,
) -> Result<Json<StoreResponse<PincodeAssignment>>, AppError> {
    let response = state
        .store
        .assign_pincode_to_collector(&params.pincode, &params.collector_id)
        .await?;
    info!(
        "Assigned pincode {} to collector {}",
        params.pincode, params.collector_id
    );
    Ok(Json(response))
}
