use std::path::Path;

use crate::error::Result;
use crate::model::Item;

/// Load an item list from a JSON file holding an array of items.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let json = std::fs::read_to_string(path)?;
    parse_items(&json)
}

pub fn parse_items(json: &str) -> Result<Vec<Item>> {
    Ok(serde_json::from_str(json)?)
}
