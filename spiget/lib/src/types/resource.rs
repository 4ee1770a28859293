use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Author, Category, Icon};

/// A plugin or other downloadable resource listed on SpigotMC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub name: String,
    /// Short tagline.
    pub tag: String,
    pub contributors: String,
    pub likes: u64,
    pub file: ResourceFile,
    pub tested_versions: Vec<String>,
    pub links: BTreeMap<String, String>,
    pub rating: Rating,
    /// Unix seconds.
    pub release_date: i64,
    /// Unix seconds.
    pub update_date: i64,
    pub downloads: u64,
    /// `true` when the download is hosted outside spigotmc.org. Check this
    /// before downloading, the target may not be a jar.
    pub external: bool,
    pub icon: Icon,
    pub premium: bool,
    pub price: f64,
    pub currency: String,
    pub author: Author,
    pub category: Category,
    pub version: Version,
    pub versions: Vec<Version>,
    pub updates: Vec<Update>,
    pub source_code_link: String,
    pub donation_link: String,
}

/// Download metadata of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceFile {
    /// File extension, e.g. `.jar`, or `external`.
    #[serde(rename = "type")]
    pub kind: String,
    pub size: f64,
    pub size_unit: String,
    pub url: String,
    pub external_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rating {
    pub count: u64,
    pub average: f64,
}

/// A released version of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    pub id: u64,
    pub uuid: String,
    pub name: String,
    /// Unix seconds.
    pub release_date: i64,
    pub downloads: u64,
    pub rating: Rating,
}

/// An update post on a resource page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Update {
    pub id: u64,
    /// Id of the resource this update belongs to.
    pub resource: u64,
    pub title: String,
    /// Base64-encoded HTML.
    pub description: String,
    /// Unix seconds.
    pub date: i64,
    pub likes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub author: Author,
    pub rating: Rating,
    /// Base64-encoded review text.
    pub message: String,
    /// Base64-encoded reply from the resource author, if any.
    pub response_message: String,
    /// Version name the review was written for.
    pub version: String,
    /// Unix seconds.
    pub date: i64,
    pub resource: u64,
}
