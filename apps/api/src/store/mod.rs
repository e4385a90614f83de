//! Data access for the hosted Supabase database.
//!
//! Handlers only ever see the `WasteStore` trait. `SupabaseClient` is the
//! production implementation; persistence and SQL aggregation live in the
//! store, so every method is a single request/response round-trip.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::collector::{Collector, PincodeAssignment};
use crate::models::reports::{CollectorReportRow, DashboardMetrics, PincodeRatingRow};
use crate::models::trash::{AssignedTrashRow, Ratings, TrashUpload};
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod supabase;

pub use supabase::SupabaseClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store rejected the request payload or filters.
    Validation,
    NotFound,
    /// Uniqueness or reference constraint violated.
    Conflict,
    /// Transport failure or a 5xx from the store.
    Unavailable,
    /// The store answered with rows that do not match the expected shape.
    Decode,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Decode, message)
    }

    /// Prefixes the message, keeping the kind.
    pub fn context(self, prefix: &str) -> Self {
        Self {
            kind: self.kind,
            message: format!("{prefix}: {}", self.message),
        }
    }
}

/// Rows returned by a store call, plus the total count when the store sent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse<T> {
    pub data: Vec<T>,
    pub count: Option<u64>,
}

#[async_trait]
pub trait WasteStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<StoreResponse<User>, StoreError>;

    async fn insert_collector(
        &self,
        collector: &Collector,
    ) -> Result<StoreResponse<Collector>, StoreError>;

    /// No check is made that the collector exists.
    async fn assign_pincode_to_collector(
        &self,
        pincode: &str,
        collector_id: &str,
    ) -> Result<StoreResponse<PincodeAssignment>, StoreError>;

    /// Inserts an upload stamped with today's server-local date.
    async fn insert_trash_upload(
        &self,
        user_id: &str,
        ratings: Ratings,
    ) -> Result<StoreResponse<TrashUpload>, StoreError>;

    /// Uploads with status `assigned` allocated to the collector, joined with
    /// the uploading user's address.
    async fn get_assigned_trash_for_collector(
        &self,
        collector_id: &str,
    ) -> Result<Vec<AssignedTrashRow>, StoreError>;

    /// Marks every upload matching `(user_id, date)` as completed and stamps
    /// `collected_at` with the current time. Matching nothing is not an error.
    async fn update_trash_upload_status(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<StoreResponse<TrashUpload>, StoreError>;

    async fn get_average_ratings_per_pincode(
        &self,
    ) -> Result<StoreResponse<PincodeRatingRow>, StoreError>;

    async fn get_collector_daily_report(
        &self,
    ) -> Result<StoreResponse<CollectorReportRow>, StoreError>;

    async fn get_daily_dashboard_metrics(&self) -> Result<DashboardMetrics, StoreError>;
}
