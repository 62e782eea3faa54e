use std::io::{Read, Write};
use std::ops::RangeInclusive;

use cbench_core::{Codec, CodecError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

/// DEFLATE in a gzip member.
///
/// Level 0 emits stored blocks, so its output is never smaller than the input.
pub struct GzipCodec;

impl Codec for GzipCodec {
    fn name(&self) -> &'static str {
        "Gzip"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        0..=9
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level as u32));
        encoder.write_all(raw)?;
        Ok(encoder.finish()?)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut raw = Vec::new();
        GzDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(CodecError::decompress)?;
        Ok(raw)
    }
}
