/// Round-trip and contract tests for every bundled codec adapter.
///
/// Every codec must give back the exact payload at every level in its domain,
/// the empty payload included, and must reject out-of-domain levels and
/// malformed input with a `CodecError` rather than panicking.

use cbench_codecs::{
    all_codecs, codec_by_name, default_codecs, BrotliCodec, Bzip2Codec, GzipCodec, Lz4Codec,
    LzmaCodec, ZstdCodec,
};
use cbench_core::{Codec, CodecError};
use proptest::prelude::*;

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Newline-separated paths, shaped like a file-list payload.
fn path_listing(entries: usize) -> Vec<u8> {
    (0..entries)
        .flat_map(|i| format!("/data/logs/2024-01-{:02}/node-{}/part-{:05}.log\n", i % 28 + 1, i % 7, i).into_bytes())
        .collect()
}

fn assert_roundtrip_all_levels(codec: &dyn Codec, payload: &[u8]) {
    for level in codec.levels() {
        let compressed = codec
            .compress(payload, level)
            .unwrap_or_else(|e| panic!("{} level {level} compress: {e}", codec.name()));
        let restored = codec
            .decompress(&compressed)
            .unwrap_or_else(|e| panic!("{} level {level} decompress: {e}", codec.name()));
        assert_eq!(
            restored,
            payload,
            "{} level {level} should round-trip byte-exact",
            codec.name()
        );
    }
}

// ── round-trip law ─────────────────────────────────────────────────────────

#[test]
fn test_every_level_roundtrips_structured_payload() {
    let payload = path_listing(400);
    for codec in all_codecs() {
        assert_roundtrip_all_levels(codec.as_ref(), &payload);
    }
}

#[test]
fn test_every_level_roundtrips_incompressible_payload() {
    let payload = pseudo_random_bytes(16 * 1024, 0xDEAD_BEEF);
    for codec in all_codecs() {
        assert_roundtrip_all_levels(codec.as_ref(), &payload);
    }
}

/// Empty input still produces a frame, and decodes back to nothing.
#[test]
fn test_empty_payload_every_level() {
    for codec in all_codecs() {
        for level in codec.levels() {
            let compressed = codec.compress(&[], level).unwrap();
            assert!(
                !compressed.is_empty(),
                "{} level {level} should emit a non-empty frame for empty input",
                codec.name()
            );
            assert!(codec.decompress(&compressed).unwrap().is_empty());
        }
    }
}

#[test]
fn test_gzip_level_zero_stores_raw() {
    let payload = vec![b'A'; 1000];
    let compressed = GzipCodec.compress(&payload, 0).unwrap();
    assert!(
        compressed.len() >= payload.len(),
        "stored deflate blocks cannot be smaller than the input: {}",
        compressed.len()
    );
    assert_eq!(GzipCodec.decompress(&compressed).unwrap(), payload);

    let best = GzipCodec.compress(&payload, 9).unwrap();
    assert!(best.len() < 100, "level 9 should collapse a run of 'A': {}", best.len());
}

#[test]
fn test_compression_is_deterministic() {
    let payload = path_listing(100);
    for codec in all_codecs() {
        let level = *codec.levels().end();
        assert_eq!(
            codec.compress(&payload, level).unwrap(),
            codec.compress(&payload, level).unwrap(),
            "{} should be deterministic",
            codec.name()
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_roundtrip_lowest_and_middle_level(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        for codec in all_codecs() {
            let domain = codec.levels();
            let mid = (*domain.start() + *domain.end()) / 2;
            for level in [*domain.start(), mid] {
                let compressed = codec.compress(&data, level).unwrap();
                prop_assert_eq!(codec.decompress(&compressed).unwrap(), data.clone());
            }
        }
    }
}

// ── level domains ──────────────────────────────────────────────────────────

#[test]
fn test_level_domains_match_backends() {
    assert_eq!(LzmaCodec.levels(), 0..=9);
    assert_eq!(GzipCodec.levels(), 0..=9);
    assert_eq!(Bzip2Codec.levels(), 1..=9);
    assert_eq!(ZstdCodec.levels(), 1..=22);
    assert_eq!(BrotliCodec.levels(), 0..=11);
    assert_eq!(Lz4Codec.levels(), 0..=0);
}

#[test]
fn test_out_of_domain_level_rejected() {
    let payload = b"level checks happen before the backend is touched";
    for codec in all_codecs() {
        let domain = codec.levels();
        for level in [*domain.start() - 1, *domain.end() + 1] {
            let err = codec.compress(payload, level).unwrap_err();
            match err {
                CodecError::InvalidLevel { level: got, min, max } => {
                    assert_eq!(got, level);
                    assert_eq!((min, max), (*domain.start(), *domain.end()));
                }
                other => panic!("{}: expected InvalidLevel, got {other}", codec.name()),
            }
        }
    }
}

// ── malformed input ────────────────────────────────────────────────────────

fn assert_decompress_error(codec: &dyn Codec, input: &[u8], what: &str) {
    match codec.decompress(input) {
        Err(CodecError::Decompress { .. }) => {}
        Err(other) => panic!("{}: {what} gave {other}, expected a decompress error", codec.name()),
        Ok(out) => panic!("{}: {what} decoded to {} bytes", codec.name(), out.len()),
    }
}

#[test]
fn test_garbage_input_rejected() {
    let garbage = b"this is certainly not a compressed stream of any kind";
    for codec in all_codecs() {
        assert_decompress_error(codec.as_ref(), garbage, "garbage input");
    }
}

#[test]
fn test_empty_input_rejected() {
    for codec in all_codecs() {
        assert_decompress_error(codec.as_ref(), &[], "empty input");
    }
}

#[test]
fn test_truncated_stream_rejected() {
    let payload = pseudo_random_bytes(4096, 7);
    for codec in all_codecs() {
        let level = *codec.levels().start();
        let compressed = codec.compress(&payload, level).unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert_decompress_error(codec.as_ref(), truncated, "truncated stream");
    }
}

// ── registry ───────────────────────────────────────────────────────────────

#[test]
fn test_default_lineup_order() {
    let names: Vec<&str> = default_codecs().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["LZMA", "Gzip", "BZ2", "Zstandard", "Brotli"]);
    assert_eq!(all_codecs().last().unwrap().name(), "LZ4");
}

#[test]
fn test_codec_by_name_accepts_aliases() {
    assert_eq!(codec_by_name("zstd").unwrap().name(), "Zstandard");
    assert_eq!(codec_by_name("ZSTANDARD").unwrap().name(), "Zstandard");
    assert_eq!(codec_by_name("xz").unwrap().name(), "LZMA");
    assert_eq!(codec_by_name("gz").unwrap().name(), "Gzip");
    assert_eq!(codec_by_name("bzip2").unwrap().name(), "BZ2");
    assert_eq!(codec_by_name("br").unwrap().name(), "Brotli");
    assert_eq!(codec_by_name("lz4").unwrap().name(), "LZ4");
}

#[test]
fn test_codec_by_name_unknown_lists_options() {
    let Err(err) = codec_by_name("snappy") else {
        panic!("snappy should not resolve to a codec");
    };
    let err = err.to_string();
    assert!(err.contains("unknown codec 'snappy'"), "got: {err}");
    assert!(err.contains("Zstandard"), "got: {err}");
}
