use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle of a trash upload. Moves one way: assigned → completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrashStatus {
    #[default]
    Assigned,
    Completed,
}

impl TrashStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrashStatus::Assigned => "assigned",
            TrashStatus::Completed => "completed",
        }
    }
}

/// The three quality scores a citizen attaches to an upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratings {
    pub wet: f64,
    pub recyclable: f64,
    pub nonrecyclable: f64,
}

/// A `trash_uploads` row, identified by `(user_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashUpload {
    pub user_id: String,
    pub date: NaiveDate,
    pub rating_wet: f64,
    pub rating_recyclable: f64,
    pub rating_nonrecyclable: f64,
    #[serde(default)]
    pub status: TrashStatus,
    #[serde(default)]
    pub collected_at: Option<String>,
    #[serde(default)]
    pub trash_allocated: Option<String>,
}

/// Insert payload. Status is left to the store default (`assigned`).
#[derive(Debug, Clone, Serialize)]
pub struct NewTrashUpload {
    pub user_id: String,
    pub date: NaiveDate,
    pub rating_wet: f64,
    pub rating_recyclable: f64,
    pub rating_nonrecyclable: f64,
}

impl NewTrashUpload {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, ratings: Ratings) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            rating_wet: ratings.wet,
            rating_recyclable: ratings.recyclable,
            rating_nonrecyclable: ratings.nonrecyclable,
        }
    }
}

/// Patch body for marking an upload as collected.
#[derive(Debug, Clone, Serialize)]
pub struct TrashStatusUpdate {
    pub status: TrashStatus,
    pub collected_at: NaiveDateTime,
}

impl TrashStatusUpdate {
    pub fn completed_at(collected_at: NaiveDateTime) -> Self {
        Self {
            status: TrashStatus::Completed,
            collected_at,
        }
    }
}

/// Address fields of the uploading user, embedded in collector queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAddress {
    pub full_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// An upload still waiting for pickup, joined with its user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedTrashRow {
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub collected_at: Option<String>,
    pub rating_wet: f64,
    pub rating_recyclable: f64,
    pub rating_nonrecyclable: f64,
    /// `None` when the referenced user row is gone.
    #[serde(default)]
    pub users: Option<UserAddress>,
}

impl AssignedTrashRow {
    pub fn ratings(&self) -> Ratings {
        Ratings {
            wet: self.rating_wet,
            recyclable: self.rating_recyclable,
            nonrecyclable: self.rating_nonrecyclable,
        }
    }
}
