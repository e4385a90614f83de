use serde::Serialize;
use serde_json::Value;

use crate::models::reports::{CollectorReportRow, DashboardMetrics, PincodeRatingRow};

/// Combined admin dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallReport {
    pub average_ratings: Vec<AreaRatings>,
    pub daily_report: Vec<CollectorSummary>,
    pub overall_metrics: OverallMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRatings {
    pub area: String,
    pub recycled: Option<f64>,
    pub unrecycled: Option<f64>,
    pub wet: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectorSummary {
    pub name: String,
    pub allocated: i64,
    pub collected: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    pub total_houses: i64,
    pub avg_rating: Option<f64>,
    pub top_collectors: Value,
    pub lowest_area: Value,
}

impl From<PincodeRatingRow> for AreaRatings {
    fn from(row: PincodeRatingRow) -> Self {
        AreaRatings {
            area: row.pincode,
            recycled: row.avg_rating_recyclable,
            unrecycled: row.avg_rating_nonrecyclable,
            wet: row.avg_rating_wet,
        }
    }
}

impl From<CollectorReportRow> for CollectorSummary {
    fn from(row: CollectorReportRow) -> Self {
        CollectorSummary {
            name: row.first_name,
            allocated: row.assigned_count,
            collected: row.collected_count,
        }
    }
}

impl From<DashboardMetrics> for OverallMetrics {
    fn from(m: DashboardMetrics) -> Self {
        OverallMetrics {
            total_houses: m.total_collected_today,
            avg_rating: m.avg_citizen_rating,
            top_collectors: m.top_performer,
            lowest_area: m.lowest_rating_pincode,
        }
    }
}

pub fn build_overall_report(
    ratings: Vec<PincodeRatingRow>,
    collectors: Vec<CollectorReportRow>,
    metrics: DashboardMetrics,
) -> OverallReport {
    OverallReport {
        average_ratings: ratings.into_iter().map(AreaRatings::from).collect(),
        daily_report: collectors.into_iter().map(CollectorSummary::from).collect(),
        overall_metrics: metrics.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overall_report_renames_fields() {
        let report = build_overall_report(
            vec![PincodeRatingRow {
                pincode: "62701".into(),
                avg_rating_recyclable: Some(0.3),
                avg_rating_nonrecyclable: Some(0.1),
                avg_rating_wet: Some(0.8),
            }],
            vec![CollectorReportRow {
                first_name: "Amy".into(),
                assigned_count: 4,
                collected_count: 3,
            }],
            DashboardMetrics {
                total_collected_today: 3,
                avg_citizen_rating: Some(0.4),
                top_performer: json!(["Amy"]),
                lowest_rating_pincode: json!("62701"),
            },
        );

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "average_ratings": [
                    {"area": "62701", "recycled": 0.3, "unrecycled": 0.1, "wet": 0.8}
                ],
                "daily_report": [
                    {"name": "Amy", "allocated": 4, "collected": 3}
                ],
                "overall_metrics": {
                    "totalHouses": 3,
                    "avgRating": 0.4,
                    "topCollectors": ["Amy"],
                    "lowestArea": "62701"
                }
            })
        );
    }

    #[test]
    fn test_quiet_day_keeps_nulls() {
        let report = build_overall_report(
            Vec::new(),
            Vec::new(),
            DashboardMetrics {
                total_collected_today: 0,
                avg_citizen_rating: None,
                top_performer: Value::Null,
                lowest_rating_pincode: Value::Null,
            },
        );
        let body = serde_json::to_value(&report).unwrap();
        assert_eq!(body["average_ratings"], json!([]));
        assert_eq!(body["overall_metrics"]["avgRating"], json!(null));
        assert_eq!(body["overall_metrics"]["topCollectors"], json!(null));
    }
}
