//! Which part of the document to keep, and checking that it exists

use log::debug;
use std::collections::HashSet;

use crate::error::{SelectorKind, SliceError, SliceResult};
use crate::models::SourceDocument;

/// Tags or literal path keys requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Tags(Vec<String>),
    Paths(Vec<String>),
}

impl Selection {
    /// Build a selection from the raw comma separated `--modules` / `--paths`
    /// values. Exactly one of them must yield at least one entry.
    pub fn from_lists(modules: Option<&str>, paths: Option<&str>) -> SliceResult<Self> {
        let tags = modules.map(split_list).filter(|v| !v.is_empty());
        let paths = paths.map(split_list).filter(|v| !v.is_empty());

        match (tags, paths) {
            (Some(_), Some(_)) => Err(SliceError::ConflictingSelection),
            (Some(tags), None) => Ok(Selection::Tags(tags)),
            (None, Some(paths)) => Ok(Selection::Paths(paths)),
            (None, None) => Err(SliceError::NoSelection),
        }
    }

    pub fn kind(&self) -> SelectorKind {
        match self {
            Selection::Tags(_) => SelectorKind::Tag,
            Selection::Paths(_) => SelectorKind::Path,
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Selection::Tags(v) | Selection::Paths(v) => v,
        }
    }

    /// Fail unless every requested selector occurs in the document.
    /// All unknown names are reported at once, in request order.
    pub fn validate(&self, doc: &SourceDocument) -> SliceResult<()> {
        let known: HashSet<&str> = match self {
            Selection::Tags(_) => doc.operations().flat_map(|op| op.tags()).collect(),
            Selection::Paths(_) => doc.paths.keys().map(String::as_str).collect(),
        };
        debug!("Document declares {} distinct {}", known.len(), self.kind());

        let unknown: Vec<String> = self
            .values()
            .iter()
            .filter(|name| !known.contains(name.as_str()))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(SliceError::UnknownSelectors {
                kind: self.kind(),
                names: unknown,
            })
        }
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> SourceDocument {
        serde_json::from_value(json!({
            "paths": {
                "/users": {
                    "parameters": [{ "name": "q", "in": "query" }],
                    "get": { "tags": ["users"] },
                    "post": { "tags": ["users", "admin"] }
                },
                "/orders": { "get": { "tags": ["orders"] } },
                "/health": { "get": {} }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" users, orders ,,"), vec!["users", "orders"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_from_lists() {
        assert_eq!(
            Selection::from_lists(Some("users"), None).unwrap(),
            Selection::Tags(vec!["users".to_string()])
        );
        assert_eq!(
            Selection::from_lists(None, Some("/users,/orders")).unwrap(),
            Selection::Paths(vec!["/users".to_string(), "/orders".to_string()])
        );
        assert!(matches!(
            Selection::from_lists(None, None),
            Err(SliceError::NoSelection)
        ));
        assert!(matches!(
            Selection::from_lists(Some(" , "), None),
            Err(SliceError::NoSelection)
        ));
        assert!(matches!(
            Selection::from_lists(Some("users"), Some("/users")),
            Err(SliceError::ConflictingSelection)
        ));
    }

    #[test]
    fn test_validate_known_tags() {
        let selection = Selection::Tags(vec!["users".to_string(), "admin".to_string()]);
        assert!(selection.validate(&sample()).is_ok());
    }

    #[test]
    fn test_validate_reports_all_unknown_tags() {
        let selection = Selection::Tags(vec![
            "missing".to_string(),
            "users".to_string(),
            "billing".to_string(),
        ]);
        match selection.validate(&sample()) {
            Err(SliceError::UnknownSelectors { kind, names }) => {
                assert_eq!(kind, SelectorKind::Tag);
                assert_eq!(names, vec!["missing", "billing"]);
            }
            other => panic!("expected unknown selectors, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_paths_is_exact() {
        let ok = Selection::Paths(vec!["/orders".to_string()]);
        assert!(ok.validate(&sample()).is_ok());

        let selection = Selection::Paths(vec!["/orders/".to_string(), "/user*".to_string()]);
        match selection.validate(&sample()) {
            Err(SliceError::UnknownSelectors { kind, names }) => {
                assert_eq!(kind, SelectorKind::Path);
                assert_eq!(names, vec!["/orders/", "/user*"]);
            }
            other => panic!("expected unknown selectors, got {:?}", other),
        }
    }

    #[test]
    fn test_path_keys_are_not_tags() {
        let selection = Selection::Tags(vec!["/users".to_string()]);
        assert!(selection.validate(&sample()).is_err());
    }
}
