use std::ops::RangeInclusive;

use cbench_core::{Codec, CodecError};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};

/// LZ4 block with a little-endian size prefix.
///
/// lz4_flex has no effort setting, so the domain is the single level 0. Not in
/// the default set; select it by name.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "LZ4"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        0..=0
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        Ok(compress_prepend_size(raw))
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        decompress_size_prepended(compressed).map_err(CodecError::decompress)
    }
}
