//! Scientific extension: DOI and citation on collections.

use serde_json::json;

use crate::Collection;

pub const SCHEMA_URI: &str = "https://stac-extensions.github.io/scientific/v1.0.0/schema.json";

/// Set the DOI and citation on a collection and declare the extension.
pub fn apply(collection: &mut Collection, doi: &str, citation: &str) {
    collection
        .extra_fields
        .insert("sci:doi".to_string(), json!(doi));
    collection
        .extra_fields
        .insert("sci:citation".to_string(), json!(citation));
    collection.add_extension(SCHEMA_URI);
}

pub fn doi(collection: &Collection) -> Option<&str> {
    collection.extra_fields.get("sci:doi")?.as_str()
}

pub fn citation(collection: &Collection) -> Option<&str> {
    collection.extra_fields.get("sci:citation")?.as_str()
}
