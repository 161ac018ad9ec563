use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{json, Value};

use crate::models::{schema_name, FilteredComponents, FilteredDocument, Operation, PathItem, SourceDocument};
use crate::selection::Selection;

/// Version written when the source document does not declare one
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";
/// Version used for a rebuilt info block when the source has no info at all
pub const DEFAULT_INFO_VERSION: &str = "1.0.0";
pub const DEFAULT_TITLE: &str = "Filtered API";
pub const DEFAULT_DESCRIPTION: &str = "Subset of the source API";

/// How the `info` block of the output is produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InfoMode {
    /// Copy the source info verbatim, or a placeholder when it is missing
    #[default]
    Preserve,
    /// Build a new info block from caller supplied texts, keeping only the
    /// source version
    Override {
        title: Option<String>,
        description: Option<String>,
    },
}

/// Reduces a source document to the paths of a selection and the schemas
/// those paths reference directly.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    info_mode: InfoMode,
}

impl DocumentFilter {
    pub fn new(info_mode: InfoMode) -> Self {
        Self { info_mode }
    }

    /// Build the filtered document. The selection is expected to have been
    /// validated against `doc` already.
    pub fn filter(&self, doc: &SourceDocument, selection: &Selection) -> FilteredDocument {
        let paths: IndexMap<String, PathItem> = doc
            .paths
            .iter()
            .filter(|(path, item)| Self::path_matches(path, item, selection))
            .map(|(path, item)| (path.clone(), item.clone()))
            .collect();
        debug!("Kept {} of {} paths", paths.len(), doc.paths.len());

        let schemas = Self::collect_schemas(doc, &paths);
        debug!("Collected {} referenced schemas", schemas.len());

        let security_schemes = doc
            .components
            .as_ref()
            .and_then(|c| c.securitySchemes.clone())
            .unwrap_or_default();

        FilteredDocument {
            openapi: doc
                .openapi
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_OPENAPI_VERSION.to_string()),
            info: self.build_info(doc.info.as_ref()),
            security: doc.security.clone().unwrap_or_default(),
            paths,
            components: FilteredComponents {
                schemas,
                securitySchemes: security_schemes,
            },
        }
    }

    /// A tag match on any entry keeps the whole path item, all methods included
    fn path_matches(path: &str, item: &PathItem, selection: &Selection) -> bool {
        match selection {
            Selection::Tags(tags) => item.values().any(|raw| Operation::new(raw).has_any_tag(tags)),
            Selection::Paths(paths) => paths.iter().any(|p| p == path),
        }
    }

    /// One hop only: the copied schemas are not scanned for further refs
    fn collect_schemas(doc: &SourceDocument, paths: &IndexMap<String, PathItem>) -> IndexMap<String, Value> {
        let mut schemas = IndexMap::new();

        for reference in paths
            .values()
            .flat_map(|item| item.values())
            .flat_map(|raw| Operation::new(raw).schema_refs())
        {
            let name = schema_name(reference);
            if schemas.contains_key(name) {
                continue;
            }
            match doc.schema(name) {
                Some(schema) => {
                    schemas.insert(name.to_string(), schema.clone());
                }
                None => warn!("Schema '{}' referenced by '{}' is not defined in the document", name, reference),
            }
        }

        schemas
    }

    fn build_info(&self, source: Option<&Value>) -> Value {
        match &self.info_mode {
            InfoMode::Preserve => source.cloned().unwrap_or_else(|| {
                json!({
                    "title": "Dummy API",
                    "version": DEFAULT_INFO_VERSION,
                    "description": "Dummy description"
                })
            }),
            InfoMode::Override { title, description } => {
                let mut info = serde_json::Map::new();
                info.insert(
                    "title".to_string(),
                    Value::from(title.as_deref().unwrap_or(DEFAULT_TITLE)),
                );
                info.insert(
                    "description".to_string(),
                    Value::from(description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)),
                );
                match source {
                    Some(src) => {
                        if let Some(version) = src.get("version") {
                            info.insert("version".to_string(), version.clone());
                        }
                    }
                    None => {
                        info.insert("version".to_string(), Value::from(DEFAULT_INFO_VERSION));
                    }
                }
                Value::Object(info)
            }
        }
    }
}
