use serde::{Deserialize, Serialize};

/// A resource category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
}
