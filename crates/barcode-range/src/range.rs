//! Randomized barcode prefix and range generation.
//!
//! [`RangeGenerator`] turns independent draws from a [`RandSource`] into the
//! fixed textual shapes of an allocation: a two-letter uppercase prefix and
//! a `{start, end}` pair of zero-padded decimal strings.
//!
//! ## Range construction
//!
//! 1. Draw `m` in `[0, 1_000_000)` and form `start` as `m` padded to 6 digits
//!    followed by the literal `01`.
//! 2. Draw `offset` in `[100, 5_100)`.
//! 3. `end = floor((start + offset) / 100) * 100`, padded to 8 digits.
//!
//! Because `start = m * 100 + 1` and `offset >= 100`, the floored end is at
//! least `(m + 1) * 100`, so `end > start` always holds. `end` may grow to 9
//! digits near the top of the space; padding never truncates.

use crate::{BarcodeRange, BarcodeRangeEntry, RandSource};

/// Alphabet for prefix letters.
pub const PREFIX_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Exclusive upper bound of the random middle part of `start`.
pub const START_MIDDLE_BOUND: u32 = 1_000_000;

/// Literal suffix appended to the 6-digit middle part of `start`.
pub const START_SUFFIX: &str = "01";

/// Inclusive lower bound of the random offset added to `start`.
pub const OFFSET_MIN: u32 = 100;

/// Exclusive upper bound of the random offset added to `start`.
pub const OFFSET_MAX: u32 = 5_100;

/// `end` is floored to a multiple of this value.
pub const END_ROUNDING: u32 = 100;

/// Minimum width of the formatted `start`/`end` strings.
pub const RANGE_WIDTH: usize = 8;

/// Generates barcode prefixes and ranges from an injected random source.
///
/// The generator holds no state besides its source: every call is an
/// independent set of draws, so there is no uniqueness guarantee across
/// calls.
///
/// # Example
/// ```
/// use barcode_range::{RandSource, RangeGenerator};
///
/// struct Lowest;
/// impl RandSource for Lowest {
///     fn rand_range(&self, low: u32, _high: u32) -> u32 {
///         low
///     }
/// }
///
/// let generator = RangeGenerator::new(Lowest);
/// assert_eq!(generator.prefix(), "AA");
///
/// let range = generator.range();
/// assert_eq!(range.start, "00000001");
/// assert_eq!(range.end, "00000100");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeGenerator<R> {
    rng: R,
}

impl<R: RandSource> RangeGenerator<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns two independently drawn uppercase letters. Repeats are allowed.
    pub fn prefix(&self) -> String {
        let mut prefix = String::with_capacity(2);
        for _ in 0..2 {
            let index = self.rng.rand_range(0, PREFIX_ALPHABET.len() as u32) as usize;
            prefix.push(char::from(PREFIX_ALPHABET[index]));
        }
        prefix
    }

    /// Returns a fresh `{start, end}` range.
    ///
    /// Draw order is the start middle first, then the offset.
    pub fn range(&self) -> BarcodeRange {
        let middle = self.rng.rand_range(0, START_MIDDLE_BOUND);
        let start = format!("{middle:06}{START_SUFFIX}");

        // `middle` < 10^6, so the 8-digit start always fits in a u32.
        let start_int = middle * 100 + 1;
        let offset = self.rng.rand_range(OFFSET_MIN, OFFSET_MAX);
        let end_int = (start_int + offset) / END_ROUNDING * END_ROUNDING;
        let end = format!("{end_int:0width$}", width = RANGE_WIDTH);

        #[cfg(feature = "tracing")]
        tracing::trace!(%start, %end, offset, "generated barcode range");

        BarcodeRange { start, end }
    }

    /// Returns a full entry. The prefix is drawn before the range.
    pub fn barcode_range(&self) -> BarcodeRangeEntry {
        let prefix = self.prefix();
        let ranges = self.range();
        BarcodeRangeEntry { prefix, ranges }
    }
}
