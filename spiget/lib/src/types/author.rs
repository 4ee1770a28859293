use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An image, usually a user avatar or resource icon.
///
/// `data` holds the base64-encoded image when the API inlines it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icon {
    pub url: String,
    pub data: String,
    pub info: String,
    pub hash: String,
}

/// A SpigotMC member who authored or reviewed a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub icon: Icon,
    /// Linked external accounts, keyed by service (`discord`, `github`, ...).
    /// Often absent.
    pub identities: BTreeMap<String, String>,
}
