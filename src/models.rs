#![allow(non_snake_case)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media type whose body schemas take part in the schema closure
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Entries of a path item, keyed by HTTP method (or `parameters`, `summary`, ...)
pub type PathItem = IndexMap<String, Value>;

/// An OpenAPI document as fetched from the remote server.
///
/// Only the fields the slicer reads are modelled; everything below a path
/// item or a schema is kept as raw JSON so it round-trips untouched.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceDocument {
    #[serde(default)]
    pub openapi: Option<String>,
    #[serde(default)]
    pub info: Option<Value>,
    #[serde(default)]
    pub security: Option<Vec<Value>>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Option<SourceComponents>,
}

/// Components of the source document
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceComponents {
    #[serde(default)]
    pub schemas: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub securitySchemes: Option<IndexMap<String, Value>>,
}

impl SourceDocument {
    /// Iterate over every entry of every path item as an operation
    pub fn operations(&self) -> impl Iterator<Item = Operation<'_>> {
        self.paths
            .values()
            .flat_map(|item| item.values().map(Operation::new))
    }

    /// Look up a named schema in `components.schemas`
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.components
            .as_ref()
            .and_then(|c| c.schemas.as_ref())
            .and_then(|schemas| schemas.get(name))
    }
}

/// Borrowed view over one entry of a path item
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    raw: &'a Value,
}

impl<'a> Operation<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    /// String tags attached to the operation. Entries that are not operations
    /// (a `parameters` array, a `summary` string) have none.
    pub fn tags(&self) -> impl Iterator<Item = &'a str> {
        self.raw
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        self.tags().any(|tag| wanted.iter().any(|w| w == tag))
    }

    /// `$ref` strings of the JSON request body schema and of every JSON
    /// response schema, in document order. Inline schemas yield nothing.
    pub fn schema_refs(&self) -> Vec<&'a str> {
        let mut refs = Vec::new();

        if let Some(body) = self.raw.get("requestBody") {
            refs.extend(json_schema_ref(body));
        }

        if let Some(responses) = self.raw.get("responses").and_then(Value::as_object) {
            refs.extend(responses.values().filter_map(json_schema_ref));
        }

        refs
    }
}

/// `content["application/json"].schema.$ref` of a request body or response
fn json_schema_ref(holder: &Value) -> Option<&str> {
    holder
        .get("content")?
        .get(JSON_MEDIA_TYPE)?
        .get("schema")?
        .get("$ref")?
        .as_str()
}

/// Name of the schema a `$ref` points to: everything after the last `/`
pub fn schema_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// The reduced document written as output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilteredDocument {
    pub openapi: String,
    pub info: Value,
    pub security: Vec<Value>,
    pub paths: IndexMap<String, PathItem>,
    pub components: FilteredComponents,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FilteredComponents {
    pub schemas: IndexMap<String, Value>,
    pub securitySchemes: IndexMap<String, Value>,
}
