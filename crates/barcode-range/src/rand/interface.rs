/// A trait for random sources that return bounded random integers.
///
/// This abstraction allows you to plug in a real random source or a scripted
/// random source in tests, so the exact formatting of generated prefixes and
/// ranges can be asserted without relying on true randomness.
///
/// # Example
/// ```
/// use barcode_range::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand_range(&self, low: u32, _high: u32) -> u32 {
///         low
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand_range(100, 5_100), 100);
/// ```
pub trait RandSource {
    /// Returns a uniformly distributed integer in `[low, high)`.
    ///
    /// Callers guarantee `low < high`.
    fn rand_range(&self, low: u32, high: u32) -> u32;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn rand_range(&self, low: u32, high: u32) -> u32 {
        (**self).rand_range(low, high)
    }
}
