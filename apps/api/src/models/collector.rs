use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    pub id: String,
    pub first_name: String,
}

/// Row of `pincode_assignments`. A collector may own many pincodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeAssignment {
    pub pincode: String,
    pub collector_id: String,
}
