pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pickup::handlers as pickup;
use crate::registry::handlers as registry;
use crate::reports::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Registration
        .route("/add_user", post(registry::handle_add_user))
        .route("/add_collector", post(registry::handle_add_collector))
        .route("/assign_pincode", post(registry::handle_assign_pincode))
        // Pickups
        .route("/trash_upload", post(pickup::handle_trash_upload))
        .route(
            "/get_trash_for_collector/:collector_id",
            get(pickup::handle_get_trash_for_collector),
        )
        .route("/update_status", post(pickup::handle_update_status))
        // Dashboards
        .route(
            "/average_ratings_per_pincode",
            get(reports::handle_average_ratings),
        )
        .route("/collectors_report", get(reports::handle_collectors_report))
        .route("/overall_report", get(reports::handle_overall_report))
        .with_state(state)
}
