use std::io::{Read, Write};
use std::ops::RangeInclusive;

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;
use cbench_core::{Codec, CodecError};

/// bzip2 stream. The level selects the block size (100 KB × level).
pub struct Bzip2Codec;

impl Codec for Bzip2Codec {
    fn name(&self) -> &'static str {
        "BZ2"
    }

    fn levels(&self) -> RangeInclusive<i32> {
        1..=9
    }

    fn compress(&self, raw: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.check_level(level)?;
        let mut encoder = BzEncoder::new(Vec::new(), Compression::new(level as u32));
        encoder.write_all(raw)?;
        Ok(encoder.finish()?)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut raw = Vec::new();
        BzDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(CodecError::decompress)?;
        Ok(raw)
    }
}
