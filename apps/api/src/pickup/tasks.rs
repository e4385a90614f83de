use serde::Serialize;

use crate::models::trash::{AssignedTrashRow, Ratings, UserAddress};
use crate::store::StoreError;

/// Dominant waste category of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WasteType {
    Wet,
    Recyclable,
    #[serde(rename = "Non-Recyclable")]
    NonRecyclable,
}

/// One entry of a collector's pickup list, shaped for the collector dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorTask {
    /// 1-based position in the list. Not a stable identifier: it shifts when
    /// the store returns rows in a different order.
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub last_collection: Option<String>,
    pub waste_type: WasteType,
}

/// Shapes store rows into the pickup list. A row whose user is missing
/// fails the whole list with a decode error.
pub fn shape_assigned_trash(
    rows: Vec<AssignedTrashRow>,
) -> Result<Vec<CollectorTask>, StoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let ratings = row.ratings();
            let user = row.users.ok_or_else(|| {
                StoreError::decode(format!(
                    "upload of {} on {} has no matching user",
                    row.user_id, row.date
                ))
            })?;
            Ok(CollectorTask {
                id: (i + 1).to_string(),
                address: format_address(&user),
                name: user.full_name,
                rating: average_rating(ratings),
                last_collection: collection_date(row.collected_at.as_deref()),
                waste_type: dominant_waste_type(ratings),
            })
        })
        .collect()
}

/// Mean of the three ratings, rounded to 2 decimal places.
pub fn average_rating(ratings: Ratings) -> f64 {
    let mean = (ratings.wet + ratings.recyclable + ratings.nonrecyclable) / 3.0;
    round_to_cents(mean)
}

/// Rounds the exact binary value to 2 decimals, ties to even. `0.075` is
/// stored as `0.07499...` and goes down; `0.125` is an exact tie and goes
/// to `0.12`.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // A value can sit exactly on a thousandths tie only if it is an odd
    // multiple of 1/8.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let lower = (value * 100.0).floor();
        let cents = if lower % 2.0 == 0.0 { lower } else { lower + 1.0 };
        return cents / 100.0;
    }
    // Float formatting rounds the exact decimal expansion.
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Category with the highest rating. Ties go to the earlier category in
/// Wet, Recyclable, Non-Recyclable order.
pub fn dominant_waste_type(ratings: Ratings) -> WasteType {
    let candidates = [
        (WasteType::Recyclable, ratings.recyclable),
        (WasteType::NonRecyclable, ratings.nonrecyclable),
    ];
    let (mut best, mut best_score) = (WasteType::Wet, ratings.wet);
    for (kind, score) in candidates {
        if score > best_score {
            best = kind;
            best_score = score;
        }
    }
    best
}

pub fn format_address(user: &UserAddress) -> String {
    format!(
        "{}, {}, {} - {}",
        user.address_line1, user.city, user.state, user.pincode
    )
}

/// Date part of an ISO timestamp; `None` when unset or blank.
pub fn collection_date(collected_at: Option<&str>) -> Option<String> {
    let collected_at = collected_at.filter(|s| !s.is_empty())?;
    let date = collected_at.split('T').next().unwrap_or(collected_at);
    Some(date.to_string())
}
