use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64;

use crate::aggregate::combine;
use crate::codec::Codec;
use crate::config::HarnessConfig;
use crate::error::{ReportError, SweepError};
use crate::record::{CombinedResult, RunResult};
use crate::report::{csv_path, render_table, write_csv_file};
use crate::sweep::{run_sweep_gated, TimingGate};

/// Report name of the cross-codec table and CSV artifact.
pub const COMBINED_REPORT_NAME: &str = "Combined";

/// Runs every registered codec over one payload and reports the results.
///
/// Codecs are swept in registration order. With
/// [`HarnessConfig::parallel`] set, sweeps run concurrently but results are
/// still returned and reported in registration order. Timed regions from
/// different codecs never overlap in either mode.
pub struct Harness {
    codecs: Vec<Arc<dyn Codec>>,
    config: HarnessConfig,
    timing: TimingGate,
}

/// Per-codec outcomes of one harness run, in registration order.
#[derive(Debug)]
pub struct HarnessOutcome {
    pub runs: Vec<Result<RunResult, SweepError>>,
}

impl HarnessOutcome {
    pub fn successes(&self) -> impl Iterator<Item = &RunResult> {
        self.runs.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SweepError> {
        self.runs.iter().filter_map(|r| r.as_ref().err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// All successful sweeps, concatenated in registration order.
    pub fn combined(&self) -> CombinedResult {
        combine(self.successes())
    }
}

/// What [`Harness::report`] produced.
#[derive(Debug, Default)]
pub struct ReportSummary {
    /// CSV files written, per-codec first and `Combined.csv` last.
    pub artifacts: Vec<PathBuf>,
    /// Leftover `<codec>.csv` files from earlier runs, removed because this
    /// run's sweep for that codec failed.
    pub removed_stale: Vec<PathBuf>,
    pub failed_sweeps: usize,
}

impl Harness {
    pub fn new(codecs: Vec<Arc<dyn Codec>>, config: HarnessConfig) -> Self {
        Self {
            codecs,
            config,
            timing: TimingGate::new(),
        }
    }

    /// Sweep every codec over `payload`.
    ///
    /// A failed sweep is recorded in its slot and does not stop the others.
    pub fn run(&self, payload: &[u8]) -> HarnessOutcome {
        tracing::info!(
            payload_len = payload.len(),
            fingerprint = %format!("{:016x}", xxh3_64(payload)),
            codecs = self.codecs.len(),
            parallel = self.config.parallel,
            "starting harness run"
        );

        let sweep = |codec: &Arc<dyn Codec>| {
            let levels = self.config.levels_for(codec.as_ref());
            run_sweep_gated(codec.as_ref(), payload, levels, &self.timing)
        };

        // rayon's indexed collect keeps registration order whatever the
        // completion order. The shared gate keeps timed regions exclusive.
        let runs: Vec<_> = if self.config.parallel {
            self.codecs.par_iter().map(sweep).collect()
        } else {
            self.codecs.iter().map(sweep).collect()
        };

        let outcome = HarnessOutcome { runs };
        let failed = outcome.failures().count();
        if failed > 0 {
            tracing::warn!(failed, "harness run finished with failed sweeps");
        } else {
            tracing::info!("harness run finished");
        }
        outcome
    }

    /// Print every successful per-codec table, a line per failed sweep, and
    /// the combined table to `out`. When CSV output is enabled, also write
    /// `<codec>.csv` for each successful sweep and `Combined.csv`, and
    /// delete any `<codec>.csv` left over for a codec whose sweep failed.
    ///
    /// Stops at the first write error; files already written are left intact.
    pub fn report<W: Write>(
        &self,
        outcome: &HarnessOutcome,
        out: &mut W,
    ) -> Result<ReportSummary, ReportError> {
        let mut summary = ReportSummary::default();

        for run in &outcome.runs {
            match run {
                Ok(result) => {
                    out.write_all(render_table(&result.codec, &result.records).as_bytes())
                        .map_err(ReportError::Output)?;
                    if self.config.write_csv {
                        let path =
                            write_csv_file(&self.config.output_dir, &result.codec, &result.records)?;
                        summary.artifacts.push(path);
                    }
                }
                Err(err) => {
                    summary.failed_sweeps += 1;
                    writeln!(out, "sweep failed: {err}\n").map_err(ReportError::Output)?;
                    if self.config.write_csv {
                        let stale = csv_path(&self.config.output_dir, err.codec());
                        match fs::remove_file(&stale) {
                            Ok(()) => {
                                tracing::warn!(path = %stale.display(), "removed stale csv report");
                                summary.removed_stale.push(stale);
                            }
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                            Err(source) => return Err(ReportError::Io { path: stale, source }),
                        }
                    }
                }
            }
        }

        let combined = outcome.combined();
        out.write_all(render_table(COMBINED_REPORT_NAME, &combined.records).as_bytes())
            .map_err(ReportError::Output)?;
        if self.config.write_csv {
            let path =
                write_csv_file(&self.config.output_dir, COMBINED_REPORT_NAME, &combined.records)?;
            summary.artifacts.push(path);
        }
        out.flush().map_err(ReportError::Output)?;

        Ok(summary)
    }
}
