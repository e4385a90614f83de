//! Supabase client: the only module that talks to the hosted database.
//!
//! Calls go through the PostgREST interface under `/rest/v1/`. Every request
//! carries the project key both as `apikey` and as a bearer token.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::header::{HeaderMap, CONTENT_RANGE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{StoreError, StoreErrorKind, StoreResponse, WasteStore};
use crate::models::collector::{Collector, PincodeAssignment};
use crate::models::reports::{CollectorReportRow, DashboardMetrics, PincodeRatingRow};
use crate::models::trash::{
    AssignedTrashRow, NewTrashUpload, Ratings, TrashStatus, TrashStatusUpdate, TrashUpload,
};
use crate::models::user::User;

const REST_PATH: &str = "rest/v1/";

const USERS_TABLE: &str = "users";
const COLLECTOR_TABLE: &str = "collector";
const PINCODE_ASSIGNMENTS_TABLE: &str = "pincode_assignments";
const TRASH_UPLOADS_TABLE: &str = "trash_uploads";

const AVG_RATINGS_RPC: &str = "avg_ratings_by_pincode";
const COLLECTOR_REPORT_RPC: &str = "collector_daily_report";
const DASHBOARD_METRICS_RPC: &str = "daily_dashboard_metrics";

/// Columns fetched for a collector's pickup list, with the user embedded.
const ASSIGNED_TRASH_SELECT: &str = "user_id,date,collected_at,rating_wet,rating_recyclable,\
rating_nonrecyclable,users(full_name,address_line1,city,state,pincode)";

/// Error body PostgREST sends on failure.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: String,
}

pub struct SupabaseClient {
    client: Client,
    rest_url: Url,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &Url, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client for Supabase")?;
        Ok(Self {
            client,
            rest_url: rest_url(base_url)?,
            api_key,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, StoreError> {
        let url = self.rest_url.join(path).map_err(|e| {
            StoreError::new(
                StoreErrorKind::Validation,
                format!("invalid store path '{path}': {e}"),
            )
        })?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key))
    }

    /// Sends the request and decodes the body into typed rows.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        target: &str,
    ) -> Result<StoreResponse<T>, StoreError> {
        let response = request.send().await.map_err(|e| {
            warn!("Store request to {target} failed: {e}");
            StoreError::new(StoreErrorKind::Unavailable, e.to_string())
        })?;

        let status = response.status();
        let count = content_range_total(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::new(StoreErrorKind::Unavailable, e.to_string()))?;

        if !status.is_success() {
            let err = classify_failure(status.as_u16(), &body);
            warn!("Store call {target} returned {status}: {}", err.message);
            return Err(err);
        }

        let data = decode_rows(&body).map_err(|e| e.context(target))?;
        debug!("Store call {target} returned {} row(s)", data.len());
        Ok(StoreResponse { data, count })
    }

    async fn insert<B, T>(&self, table: &str, row: &B) -> Result<StoreResponse<T>, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&[row]);
        self.execute(request, table).await
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
    ) -> Result<StoreResponse<T>, StoreError> {
        let request = self
            .request(Method::POST, &format!("rpc/{function}"))?
            .json(&serde_json::json!({}));
        self.execute(request, function).await
    }
}

#[async_trait]
impl WasteStore for SupabaseClient {
    async fn insert_user(&self, user: &User) -> Result<StoreResponse<User>, StoreError> {
        self.insert(USERS_TABLE, user).await
    }

    async fn insert_collector(
        &self,
        collector: &Collector,
    ) -> Result<StoreResponse<Collector>, StoreError> {
        self.insert(COLLECTOR_TABLE, collector).await
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
        self.insert(PINCODE_ASSIGNMENTS_TABLE, &assignment).await
    }

    async fn insert_trash_upload(
        &self,
        user_id: &str,
        ratings: Ratings,
    ) -> Result<StoreResponse<TrashUpload>, StoreError> {
        let upload = NewTrashUpload::new(user_id, Local::now().date_naive(), ratings);
        self.insert(TRASH_UPLOADS_TABLE, &upload)
            .await
            .map_err(|e| e.context("Error inserting trash upload"))
    }

    async fn get_assigned_trash_for_collector(
        &self,
        collector_id: &str,
    ) -> Result<Vec<AssignedTrashRow>, StoreError> {
        let status = eq(TrashStatus::Assigned.as_str());
        let allocated = eq(collector_id);
        let request = self.request(Method::GET, TRASH_UPLOADS_TABLE)?.query(&[
            ("select", ASSIGNED_TRASH_SELECT),
            ("status", status.as_str()),
            ("trash_allocated", allocated.as_str()),
        ]);
        let response = self.execute(request, TRASH_UPLOADS_TABLE).await?;
        Ok(response.data)
    }

    async fn update_trash_upload_status(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<StoreResponse<TrashUpload>, StoreError> {
        let user_filter = eq(user_id);
        let date_filter = eq(&date.format("%Y-%m-%d").to_string());
        let request = self
            .request(Method::PATCH, TRASH_UPLOADS_TABLE)?
            .query(&[
                ("user_id", user_filter.as_str()),
                ("date", date_filter.as_str()),
            ])
            .header("Prefer", "return=representation")
            .json(&TrashStatusUpdate::completed_at(Local::now().naive_local()));
        self.execute(request, TRASH_UPLOADS_TABLE).await
    }

    async fn get_average_ratings_per_pincode(
        &self,
    ) -> Result<StoreResponse<PincodeRatingRow>, StoreError> {
        self.rpc(AVG_RATINGS_RPC).await
    }

    async fn get_collector_daily_report(
        &self,
    ) -> Result<StoreResponse<CollectorReportRow>, StoreError> {
        self.rpc(COLLECTOR_REPORT_RPC).await
    }

    async fn get_daily_dashboard_metrics(&self) -> Result<DashboardMetrics, StoreError> {
        let response = self.rpc(DASHBOARD_METRICS_RPC).await?;
        response.data.into_iter().next().ok_or_else(|| {
            StoreError::decode(format!("{DASHBOARD_METRICS_RPC} returned no rows"))
        })
    }
}

/// Normalizes the project URL into the PostgREST base, always ending in `/`
/// so relative joins append instead of replacing the last segment.
fn rest_url(base_url: &Url) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(REST_PATH)
        .with_context(|| format!("Cannot derive REST endpoint from '{base_url}'"))
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Total row count from a `Content-Range: 0-9/42` header, if the store sent one.
fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    let range = headers.get(CONTENT_RANGE)?.to_str().ok()?;
    let (_, total) = range.rsplit_once('/')?;
    total.parse().ok()
}

/// Decodes a success body. PostgREST answers with an array of rows, but a
/// function returning `json` yields a bare object, and `return=minimal`
/// yields an empty body.
fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, StoreError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| StoreError::decode(format!("response is not JSON: {e}")))?;
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| StoreError::decode(format!("unexpected row shape: {e}")))
        })
        .collect()
}

fn classify_failure(status: u16, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<PostgrestError>(body).ok();
    let code = parsed.as_ref().and_then(|e| e.code.as_deref());

    let kind = match (status, code) {
        (_, Some("23505" | "23503")) | (409, _) => StoreErrorKind::Conflict,
        (_, Some("PGRST202" | "42P01")) | (404, _) => StoreErrorKind::NotFound,
        // A rejected key is a deployment problem, not a client one.
        (401 | 403, _) => StoreErrorKind::Unavailable,
        (400..=499, _) => StoreErrorKind::Validation,
        _ => StoreErrorKind::Unavailable,
    };

    let message = match parsed {
        Some(e) => e.message,
        None if body.trim().is_empty() => format!("store returned HTTP {status}"),
        None => body.to_string(),
    };

    StoreError::new(kind, message)
}
