use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row returned by the `avg_ratings_by_pincode` routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeRatingRow {
    pub pincode: String,
    pub avg_rating_recyclable: Option<f64>,
    pub avg_rating_nonrecyclable: Option<f64>,
    pub avg_rating_wet: Option<f64>,
}

/// Row returned by the `collector_daily_report` routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorReportRow {
    pub first_name: String,
    pub assigned_count: i64,
    pub collected_count: i64,
}

/// Result of the `daily_dashboard_metrics` routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_collected_today: i64,
    pub avg_citizen_rating: Option<f64>,
    /// Best collector(s) of the day, as the routine builds them (a name
    /// list or `{first_name, ...}` objects). Passed through untouched.
    pub top_performer: Value,
    /// Worst-rated area, either a bare pincode or a `{pincode, ...}` object.
    pub lowest_rating_pincode: Value,
}
