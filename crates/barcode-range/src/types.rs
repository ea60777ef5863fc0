//! Response payload types for a successful range allocation.
//!
//! With the `serde` feature enabled these serialize with the camelCase field
//! names clients expect (`requestId`, `barcodeRanges`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric block bounded by two zero-padded decimal strings.
///
/// `start` always ends in `01` and `end` always ends in `00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarcodeRange {
    pub start: String,
    pub end: String,
}

/// One allocated block: a two-letter prefix and its numeric range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarcodeRangeEntry {
    pub prefix: String,
    pub ranges: BarcodeRange,
}

/// Body of a successful allocation response.
///
/// `request_id` echoes the caller's validated `requestId` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BarcodeRangeResponse {
    pub request_id: String,
    pub barcode_ranges: Vec<BarcodeRangeEntry>,
}

impl BarcodeRangeResponse {
    /// Builds a response carrying a single allocated entry.
    pub fn single(request_id: impl Into<String>, entry: BarcodeRangeEntry) -> Self {
        Self {
            request_id: request_id.into(),
            barcode_ranges: vec![entry],
        }
    }
}
