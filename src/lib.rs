pub mod error;
pub mod fetcher;
pub mod filter;
pub mod models;
pub mod output;
pub mod selection;

use log::debug;

use crate::error::SliceResult;
use crate::filter::DocumentFilter;
use crate::models::{FilteredDocument, SourceDocument};
use crate::selection::Selection;

/// Validate the selection against the document, then filter it.
/// Nothing is filtered when any selector is unknown.
pub fn slice_document(
    doc: &SourceDocument,
    selection: &Selection,
    filter: &DocumentFilter,
) -> SliceResult<FilteredDocument> {
    selection.validate(doc)?;
    debug!("Selection {:?} is valid", selection);
    Ok(filter.filter(doc, selection))
}
