use std::ops::RangeInclusive;
use std::time::Instant;

use parking_lot::Mutex;

use crate::codec::Codec;
use crate::error::{CodecError, SweepError};
use crate::record::{Measurement, RunResult};

/// Serialises timed regions across concurrent sweeps.
///
/// Each level's compress, decompress and comparison run while holding the
/// gate, so two codecs never have timed regions in flight at once. Sweeps
/// sharing one gate may still overlap their untimed work.
#[derive(Debug, Default)]
pub struct TimingGate(Mutex<()>);

impl TimingGate {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sweep `codec` across its full level domain.
pub fn run_sweep(codec: &dyn Codec, payload: &[u8]) -> Result<RunResult, SweepError> {
    run_sweep_levels(codec, payload, codec.levels())
}

/// Sweep `codec` across `levels`, which may narrow or replace the codec's own
/// domain. Levels outside the domain fail with [`CodecError::InvalidLevel`].
///
/// For each level, in ascending order:
/// 1. time `compress` alone
/// 2. time `decompress` of exactly those bytes
/// 3. require the output to equal `payload` byte for byte
///
/// The first failure ends the sweep; records gathered so far are dropped with
/// it, so a caller never sees a partial sweep.
pub fn run_sweep_levels(
    codec: &dyn Codec,
    payload: &[u8],
    levels: RangeInclusive<i32>,
) -> Result<RunResult, SweepError> {
    run_sweep_gated(codec, payload, levels, &TimingGate::new())
}

/// [`run_sweep_levels`] with every level's timed region held under `gate`.
pub fn run_sweep_gated(
    codec: &dyn Codec,
    payload: &[u8],
    levels: RangeInclusive<i32>,
    gate: &TimingGate,
) -> Result<RunResult, SweepError> {
    let name = codec.name();
    let mut result = RunResult::new(name);
    tracing::info!(
        codec = name,
        first = *levels.start(),
        last = *levels.end(),
        payload_len = payload.len(),
        "starting sweep"
    );

    for level in levels {
        let measurement = {
            let _held = gate.0.lock();
            measure_level(codec, payload, level)
        }
        .map_err(|err| {
            tracing::error!(codec = name, level, error = %err, "sweep aborted");
            err
        })?;
        tracing::debug!(
            codec = name,
            level,
            compress_secs = measurement.compress_time.as_secs_f64(),
            compressed_size = measurement.compressed_size,
            decompress_secs = measurement.decompress_time.as_secs_f64(),
            "level measured"
        );
        result.records.push(measurement);
    }

    tracing::info!(codec = name, levels = result.len(), "sweep finished");
    Ok(result)
}

fn measure_level(codec: &dyn Codec, payload: &[u8], level: i32) -> Result<Measurement, SweepError> {
    let codec_failure = |source: CodecError| SweepError::Codec {
        codec: codec.name().to_string(),
        level,
        source,
    };

    let t0 = Instant::now();
    let compressed = codec.compress(payload, level).map_err(codec_failure)?;
    let compress_time = t0.elapsed();

    let t1 = Instant::now();
    let restored = codec.decompress(&compressed).map_err(codec_failure)?;
    let decompress_time = t1.elapsed();

    if restored != payload {
        return Err(SweepError::RoundTripMismatch {
            codec: codec.name().to_string(),
            level,
            expected_len: payload.len(),
            actual_len: restored.len(),
            first_difference: first_difference(payload, &restored),
        });
    }

    Ok(Measurement {
        level,
        compress_time,
        compressed_size: compressed.len() as u64,
        decompress_time,
    })
}

/// Index of the first differing byte. A strict prefix differs at the shorter
/// length; identical slices yield `None`.
fn first_difference(expected: &[u8], actual: &[u8]) -> Option<usize> {
    expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))
}
