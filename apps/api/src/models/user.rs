use serde::{Deserialize, Serialize};

/// A citizen registered through signup. The id is assigned by the citizen's
/// auth provider, not by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}
