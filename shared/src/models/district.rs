//! District Model

use serde::{Deserialize, Serialize};

/// District entity, used to filter the restaurant catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
}
