//! Product Option Model

use super::RawId;
use crate::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};

/// How an option group is rendered on the product page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Native select box; always has a selected entry
    #[default]
    Select,
    /// Color swatches
    Color,
    /// Radio buttons
    Radio,
    /// Any other button-like rendering
    #[serde(other)]
    Other,
}

/// Photo attached to an option value (e.g. the red variant of a shirt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPhoto {
    pub id: RawId,
    /// File name under the uploads directory
    pub path: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_main: bool,
}

impl OptionPhoto {
    /// Decode a photo payload as stored on the option element
    ///
    /// An empty or whitespace-only payload means "no photos".
    pub fn parse_payload(raw: &str) -> DataResult<Vec<OptionPhoto>> {
        if raw.trim().is_empty() {
            return Ok(vec![]);
        }
        serde_json::from_str(raw).map_err(DataError::PhotoPayload)
    }
}

/// One selectable value of an option group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: RawId,
    /// Display label, e.g. "Red"
    pub value: String,
    #[serde(default)]
    pub photos: Vec<OptionPhoto>,
    /// Pre-selected when the page loads
    #[serde(default)]
    pub is_default: bool,
}

/// A configurable product axis (e.g. "Color")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub display_type: DisplayType,
    /// Selecting a value swaps the product gallery for the value's photos
    #[serde(default)]
    pub has_individual_photos: bool,
    #[serde(default)]
    pub values: Vec<OptionValue>,
}

impl OptionGroup {
    /// Find a value by normalized id
    pub fn value(&self, id: &RawId) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.id.same_as(id))
    }
}

/// Find a group by normalized id
pub fn find_group<'a>(options: &'a [OptionGroup], id: &RawId) -> Option<&'a OptionGroup> {
    options.iter().find(|o| o.id.same_as(id))
}
