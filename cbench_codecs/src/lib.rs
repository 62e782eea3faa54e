mod brotli_codec;
mod bzip2_codec;
mod gzip_codec;
mod lz4_codec;
mod lzma_codec;
mod zstd_codec;

pub use brotli_codec::BrotliCodec;
pub use bzip2_codec::Bzip2Codec;
pub use gzip_codec::GzipCodec;
pub use lz4_codec::Lz4Codec;
pub use lzma_codec::LzmaCodec;
pub use zstd_codec::ZstdCodec;

use std::sync::Arc;

use cbench_core::Codec;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown codec '{name}'. Valid options: {}", valid_names().join(", "))]
pub struct UnknownCodec {
    pub name: String,
}

/// The benchmark's standard line-up, in run order.
pub fn default_codecs() -> Vec<Arc<dyn Codec>> {
    vec![
        Arc::new(LzmaCodec),
        Arc::new(GzipCodec),
        Arc::new(Bzip2Codec),
        Arc::new(ZstdCodec),
        Arc::new(BrotliCodec),
    ]
}

/// Every bundled codec: the default line-up followed by opt-in extras.
pub fn all_codecs() -> Vec<Arc<dyn Codec>> {
    let mut codecs = default_codecs();
    codecs.push(Arc::new(Lz4Codec));
    codecs
}

fn valid_names() -> Vec<&'static str> {
    all_codecs().iter().map(|c| c.name()).collect()
}

/// Resolve a codec from its display name or a common alias, ignoring case.
pub fn codec_by_name(name: &str) -> Result<Arc<dyn Codec>, UnknownCodec> {
    let codec: Arc<dyn Codec> = match name.to_ascii_lowercase().as_str() {
        "lzma" | "xz" => Arc::new(LzmaCodec),
        "gzip" | "gz" | "deflate" | "zlib" => Arc::new(GzipCodec),
        "bz2" | "bzip2" => Arc::new(Bzip2Codec),
        "zstandard" | "zstd" | "zst" => Arc::new(ZstdCodec),
        "brotli" | "br" => Arc::new(BrotliCodec),
        "lz4" => Arc::new(Lz4Codec),
        _ => {
            return Err(UnknownCodec {
                name: name.to_string(),
            })
        }
    };
    Ok(codec)
}
