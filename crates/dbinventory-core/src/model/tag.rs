//! Tag and tag group models

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a consuming UI should present the tags of a group
///
/// Not enforced by the ledger; stored and exported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Checkbox,
    Select,
    Multiselect,
}

impl SelectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionType::Checkbox => "checkbox",
            SelectionType::Select => "select",
            SelectionType::Multiselect => "multiselect",
        }
    }
}

impl std::fmt::Display for SelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkbox" => Ok(SelectionType::Checkbox),
            "select" => Ok(SelectionType::Select),
            "multiselect" => Ok(SelectionType::Multiselect),
            other => Err(InventoryError::UnknownSelectionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub id: i64,
    pub name: String,
    pub selection_type: SelectionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
}

/// `groups` entry of the import/export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTagGroup {
    pub name: String,

    #[serde(rename = "type")]
    pub selection_type: SelectionType,
}

impl NewTagGroup {
    pub fn new(name: impl Into<String>, selection_type: SelectionType) -> Self {
        Self {
            name: name.into(),
            selection_type,
        }
    }
}

/// `tags` entry of the import/export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,

    /// Name of the owning group
    pub group: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }
}
