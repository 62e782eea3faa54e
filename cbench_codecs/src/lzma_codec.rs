use std::io::{Read, Write};
use std::ops::RangeInclusive;

use cbench_core::{Codec, CodecError};
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

/// LZMA2 in an `.xz` container, levels being liblzma presets.
pub struct LzmaCodec;

impl Codec for LzmaCodec {
    fn name(&self) -> &'static str {
        "LZMA"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        0..=9
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        let mut encoder = XzEncoder::new(Vec::new(), level as u32);
        encoder.write_all(raw)?;
        Ok(encoder.finish()?)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut raw = Vec::new();
        XzDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(CodecError::decompress)?;
        Ok(raw)
    }
}
