use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::property::PropertySchema;
use super::rich_text::{RichText, leading_text};

/// Database metadata: its title and column schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
}

impl Database {
    /// Content of the first title run; `None` when untitled or empty.
    pub fn name(&self) -> Option<&str> {
        leading_text(&self.title)
    }
}
