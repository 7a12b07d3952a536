//! Embedded JSON schemas

use rust_embed::Embed;
use std::collections::HashMap;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// File name of the request schema
pub const REQUEST_SCHEMA: &str = "request.schema.json";

/// Schemas compiled into the binary, keyed by file name
pub struct SchemaRegistry {
    schemas: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Get a schema by file name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.schemas.get(name).map(String::as_str)
    }

    /// The request file schema
    pub fn request(&self) -> Option<&str> {
        self.get(REQUEST_SCHEMA)
    }

    /// Names of all embedded schemas, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedSchemas::get(filename) {
                if let Ok(text) = std::str::from_utf8(&content.data) {
                    schemas.insert(filename.to_string(), text.to_string());
                }
            }
        }

        Self { schemas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_schema_embedded() {
        let registry = SchemaRegistry::default();
        let schema = registry.request().expect("request schema should be embedded");
        let json: serde_json::Value = serde_json::from_str(schema).unwrap();
        assert_eq!(json["title"], "Estimation Request");
        assert!(registry.names().contains(&REQUEST_SCHEMA));
    }
}
