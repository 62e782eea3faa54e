pub mod aggregate;
pub mod codec;
pub mod config;
pub mod error;
pub mod harness;
pub mod record;
pub mod report;
pub mod sweep;

pub use aggregate::combine;
pub use codec::Codec;
pub use config::HarnessConfig;
pub use error::{CodecError, ReportError, SweepError};
pub use harness::{Harness, HarnessOutcome, ReportSummary, COMBINED_REPORT_NAME};
pub use record::{Cell, CombinedRecord, CombinedResult, Measurement, RunResult, Tabular};
pub use report::{csv_bytes, render_table, write_csv, write_csv_file};
pub use sweep::{run_sweep, run_sweep_gated, run_sweep_levels, TimingGate};
