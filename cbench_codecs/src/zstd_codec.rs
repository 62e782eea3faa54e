use std::ops::RangeInclusive;

use cbench_core::{Codec, CodecError};

/// Zstandard, one frame per payload.
///
/// `zstd::bulk::compress` builds a fresh compression context on every call,
/// so context setup is part of each level's measured time.
pub struct ZstdCodec;

impl Codec for ZstdCodec {
    fn name(&self) -> &'static str {
        "Zstandard"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        1..=22
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        zstd::bulk::compress(raw, level).map_err(CodecError::compress)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        // decode_all streams the frame into a growing Vec; the content size
        // in the frame header is not consulted.
        zstd::decode_all(compressed).map_err(CodecError::decompress)
    }
}
