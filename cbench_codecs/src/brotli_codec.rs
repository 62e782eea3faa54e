use std::ops::RangeInclusive;

use brotli::enc::BrotliEncoderParams;
use cbench_core::{Codec, CodecError};

/// Window size (log2) used at every quality. 22 is the library default.
const LGWIN: i32 = 22;

/// Raw Brotli stream. Levels are Brotli qualities.
pub struct BrotliCodec;

impl Codec for BrotliCodec {
    fn name(&self) -> &'static str {
        "Brotli"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        0..=11
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        let params = BrotliEncoderParams {
            quality: level,
            lgwin: LGWIN,
            ..Default::default()
        };
        let mut input = raw;
        let mut compressed = Vec::new();
        brotli::BrotliCompress(&mut input, &mut compressed, &params)
            .map_err(CodecError::compress)?;
        Ok(compressed)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut input = compressed;
        let mut raw = Vec::new();
        brotli::BrotliDecompress(&mut input, &mut raw).map_err(CodecError::decompress)?;
        Ok(raw)
    }
}
