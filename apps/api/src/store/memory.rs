//! In-memory `WasteStore` used by router tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use super::{StoreError, StoreErrorKind, StoreResponse, WasteStore};
use crate::models::collector::{Collector, PincodeAssignment};
use crate::models::reports::{CollectorReportRow, DashboardMetrics, PincodeRatingRow};
use crate::models::trash::{AssignedTrashRow, Ratings, TrashStatus, TrashUpload, UserAddress};
use crate::models::user::User;

#[derive(Default)]
pub(crate) struct Tables {
    users: Vec<User>,
    collectors: Vec<Collector>,
    assignments: Vec<PincodeAssignment>,
    uploads: Vec<TrashUpload>,
}

/// Tables plus canned aggregation results. RPC names listed in `failing`
/// answer with `Unavailable`.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) tables: Mutex<Tables>,
    pub pincode_ratings: Vec<PincodeRatingRow>,
    pub collector_report: Vec<CollectorReportRow>,
    pub dashboard: Option<DashboardMetrics>,
    pub failing: HashSet<&'static str>,
}

impl MemoryStore {
    /// Sets `trash_allocated`, which the store normally does on its own.
    pub fn allocate(&self, user_id: &str, collector_id: &str) {
        let mut tables = self.tables.lock().unwrap();
        for upload in tables.uploads.iter_mut().filter(|u| u.user_id == user_id) {
            upload.trash_allocated = Some(collector_id.to_string());
        }
    }

    pub fn uploads(&self) -> Vec<TrashUpload> {
        self.tables.lock().unwrap().uploads.clone()
    }

    pub fn assignments(&self) -> Vec<PincodeAssignment> {
        self.tables.lock().unwrap().assignments.clone()
    }

    fn check_rpc(&self, name: &'static str) -> Result<(), StoreError> {
        if self.failing.contains(name) {
            return Err(StoreError::new(
                StoreErrorKind::Unavailable,
                format!("{name} timed out"),
            ));
        }
        Ok(())
    }
}

fn rows<T>(data: Vec<T>) -> StoreResponse<T> {
    StoreResponse { data, count: None }
}

fn duplicate(table: &str, id: &str) -> StoreError {
    StoreError::new(
        StoreErrorKind::Conflict,
        format!("duplicate key value violates unique constraint \"{table}_pkey\" ({id})"),
    )
}

#[async_trait]
impl WasteStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<StoreResponse<User>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.id == user.id) {
            return Err(duplicate("users", &user.id));
        }
        tables.users.push(user.clone());
        Ok(rows(vec![user.clone()]))
    }

    async fn insert_collector(
        &self,
        collector: &Collector,
    ) -> Result<StoreResponse<Collector>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.collectors.iter().any(|c| c.id == collector.id) {
            return Err(duplicate("collector", &collector.id));
        }
        tables.collectors.push(collector.clone());
        Ok(rows(vec![collector.clone()]))
    }

    async fn assign_pincode_to_collector(
        &self,
        pincode: &str,
        collector_id: &str,
    ) -> Result<StoreResponse<PincodeAssignment>, StoreError> {
        let assignment = PincodeAssignment {
            pincode: pincode.to_string(),
            collector_id: collector_id.to_string(),
        };
        self.tables.lock().unwrap().assignments.push(assignment.clone());
        Ok(rows(vec![assignment]))
    }

    async fn insert_trash_upload(
        &self,
        user_id: &str,
        ratings: Ratings,
    ) -> Result<StoreResponse<TrashUpload>, StoreError> {
        let date = Local::now().date_naive();
        let mut tables = self.tables.lock().unwrap();
        if tables
            .uploads
            .iter()
            .any(|u| u.user_id == user_id && u.date == date)
        {
            let err = duplicate("trash_uploads", user_id);
            return Err(err.context("Error inserting trash upload"));
        }
        let upload = TrashUpload {
            user_id: user_id.to_string(),
            date,
            rating_wet: ratings.wet,
            rating_recyclable: ratings.recyclable,
            rating_nonrecyclable: ratings.nonrecyclable,
            status: TrashStatus::Assigned,
            collected_at: None,
            trash_allocated: None,
        };
        tables.uploads.push(upload.clone());
        Ok(rows(vec![upload]))
    }

    async fn get_assigned_trash_for_collector(
        &self,
        collector_id: &str,
    ) -> Result<Vec<AssignedTrashRow>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let assigned = tables
            .uploads
            .iter()
            .filter(|u| u.status == TrashStatus::Assigned)
            .filter(|u| u.trash_allocated.as_deref() == Some(collector_id))
            .map(|u| AssignedTrashRow {
                user_id: u.user_id.clone(),
                date: u.date,
                collected_at: u.collected_at.clone(),
                rating_wet: u.rating_wet,
                rating_recyclable: u.rating_recyclable,
                rating_nonrecyclable: u.rating_nonrecyclable,
                users: tables
                    .users
                    .iter()
                    .find(|user| user.id == u.user_id)
                    .map(|user| UserAddress {
                        full_name: user.full_name.clone(),
                        address_line1: user.address_line1.clone(),
                        city: user.city.clone(),
                        state: user.state.clone(),
                        pincode: user.pincode.clone(),
                    }),
            })
            .collect();
        Ok(assigned)
    }

    async fn update_trash_upload_status(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<StoreResponse<TrashUpload>, StoreError> {
        let now = Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.f")
            .to_string();
        let mut tables = self.tables.lock().unwrap();
        let mut updated = Vec::new();
        for upload in tables
            .uploads
            .iter_mut()
            .filter(|u| u.user_id == user_id && u.date == date)
        {
            upload.status = TrashStatus::Completed;
            upload.collected_at = Some(now.clone());
            updated.push(upload.clone());
        }
        Ok(rows(updated))
    }

    async fn get_average_ratings_per_pincode(
        &self,
    ) -> Result<StoreResponse<PincodeRatingRow>, StoreError> {
        self.check_rpc("avg_ratings_by_pincode")?;
        Ok(rows(self.pincode_ratings.clone()))
    }

    async fn get_collector_daily_report(
        &self,
    ) -> Result<StoreResponse<CollectorReportRow>, StoreError> {
        self.check_rpc("collector_daily_report")?;
        Ok(rows(self.collector_report.clone()))
    }

    async fn get_daily_dashboard_metrics(&self) -> Result<DashboardMetrics, StoreError> {
        self.check_rpc("daily_dashboard_metrics")?;
        self.dashboard
            .clone()
            .ok_or_else(|| StoreError::decode("daily_dashboard_metrics returned no rows"))
    }
}
