//! Wire-level feature record

use serde::{Deserialize, Serialize};

/// A single observation as received on the wire: a product name and a
/// month number. Field names on the wire are fixed by the external
/// interface (`produto`, `mes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "produto")]
    pub product: String,

    #[serde(rename = "mes")]
    pub month: i64,
}
