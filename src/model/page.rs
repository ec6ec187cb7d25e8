use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::block::{Block, Icon};
use super::property::PropertyValue;
use super::tagged::{TaggedUnion, deserialize_tagged};

/// A page as returned by the API.
///
/// For pages inside a database, `properties` is keyed by the database's
/// column names; otherwise it only holds `title`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(deserialize_with = "deserialize_tagged")]
    pub parent: Parent,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Body of a create-page request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPage {
    #[serde(deserialize_with = "deserialize_tagged")]
    pub parent: Parent,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl NewPage {
    /// Starts a page that will become a row of `database_id`.
    pub fn in_database(database_id: impl Into<String>) -> Self {
        Self::under(Parent::DatabaseId(database_id.into()))
    }

    pub fn under(parent: Parent) -> Self {
        Self {
            parent,
            properties: BTreeMap::new(),
            children: Vec::new(),
            icon: None,
        }
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn child(mut self, block: impl Into<Block>) -> Self {
        self.children.push(block.into());
        self
    }
}

/// Where a page or database lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    DatabaseId(String),
    PageId(String),
    BlockId(String),
    /// Top-level page of the workspace; the payload is always `true`.
    Workspace(bool),
}

impl TaggedUnion for Parent {
    const KIND: &'static str = "parent";
    const TAGS: &'static [&'static str] = &["database_id", "page_id", "block_id", "workspace"];
}
