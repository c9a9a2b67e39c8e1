//! Catalog document decoding
//!
//! The document is parsed in two steps so that a bad element is reported
//! with its position: first as an array of arbitrary JSON values, then each
//! value as a [`CatalogEntry`]. Any failure rejects the whole document.

use tracing::debug;

use super::types::CatalogEntry;
use crate::errors::{DecodeError, DecodeResult};

/// Decodes a catalog document into its entries, preserving order
///
/// # Errors
///
/// Returns `DecodeError::Malformed` if the document is not a JSON array and
/// `DecodeError::InvalidEntry` if any element lacks the expected shape.
pub fn decode_catalog(document: &str) -> DecodeResult<Vec<CatalogEntry>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(document).map_err(DecodeError::Malformed)?;

    let entries = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<CatalogEntry>(value)
                .map_err(|source| DecodeError::InvalidEntry { index, source })
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    debug!("Decoded {} catalog entries", entries.len());
    Ok(entries)
}
