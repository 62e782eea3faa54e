use std::ops::RangeInclusive;

use crate::error::CodecError;

/// Uniform interface over one compression backend.
///
/// Each `Codec` implementation:
/// - Is identified by a stable display `name()`, which also names its report
///   artifact (`<name>.csv`).
/// - Declares the inclusive integer range of levels its backend accepts.
/// - Creates any encoder/decoder context inside `compress`/`decompress`, so a
///   single call measures the full per-level cost.
/// - Borrows the payload and never keeps a reference to it after returning.
pub trait Codec: Send + Sync {
    /// Human-readable codec name used in tables, CSV file names, and logs.
    fn name(&self) -> &'static str;

    /// Valid level domain, iterated in ascending order by the sweep runner.
    fn levels(&self) -> RangeInclusive<i32>;

    /// Compress `raw` at `level`.
    ///
    /// Fails with [`CodecError::InvalidLevel`] when `level` is outside
    /// [`levels`](Codec::levels), or with a backend error if the library
    /// rejects the input.
    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError>;

    /// Decompress a blob produced by [`compress`](Codec::compress).
    ///
    /// Fails on malformed or truncated input.
    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Reject levels outside the declared domain.
    fn check_level(&self, level: i32) -> Result<(), CodecError> {
        let domain = self.levels();
        if domain.contains(&level) {
            Ok(())
        } else {
            Err(CodecError::InvalidLevel {
                level,
                min: *domain.start(),
                max: *domain.end(),
            })
        }
    }
}
