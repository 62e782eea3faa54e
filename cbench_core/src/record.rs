use std::time::Duration;

/// Timing and size of one (codec, level) round-trip.
///
/// Built by the sweep runner only after both timed calls succeed and the
/// decompressed bytes match the payload exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub level: i32,
    pub compress_time: Duration,
    pub compressed_size: u64,
    pub decompress_time: Duration,
}

/// All measurements for one codec, in ascending level order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub codec: String,
    pub records: Vec<Measurement>,
}

impl RunResult {
    pub fn new(codec: impl Into<String>) -> Self {
        Self {
            codec: codec.into(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A measurement stamped with the codec that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRecord {
    pub codec: String,
    pub measurement: Measurement,
}

/// Every codec's records, concatenated in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedResult {
    pub records: Vec<CombinedRecord>,
}

impl CombinedResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Row rendering ──────────────────────────────────────────────────────────

/// One typed table/CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Seconds(f64),
}

impl Cell {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }
}

/// A record that the reporter can lay out as a row.
pub trait Tabular {
    /// Column headers in field declaration order.
    fn headers() -> &'static [&'static str];

    /// Cells in the same order as [`headers`](Tabular::headers).
    fn cells(&self) -> Vec<Cell>;
}

pub const LEVEL_HEADER: &str = "Compression Level";
pub const COMPRESS_TIME_HEADER: &str = "Time (seconds)";
pub const SIZE_HEADER: &str = "Compressed Size (bytes)";
pub const DECOMPRESS_TIME_HEADER: &str = "Decompress Time (seconds)";
pub const ALGORITHM_HEADER: &str = "Algorithm";

impl Tabular for Measurement {
    fn headers() -> &'static [&'static str] {
        &[
            LEVEL_HEADER,
            COMPRESS_TIME_HEADER,
            SIZE_HEADER,
            DECOMPRESS_TIME_HEADER,
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(i64::from(self.level)),
            Cell::Seconds(self.compress_time.as_secs_f64()),
            Cell::Integer(self.compressed_size as i64),
            Cell::Seconds(self.decompress_time.as_secs_f64()),
        ]
    }
}

impl Tabular for CombinedRecord {
    fn headers() -> &'static [&'static str] {
        &[
            ALGORITHM_HEADER,
            LEVEL_HEADER,
            COMPRESS_TIME_HEADER,
            SIZE_HEADER,
            DECOMPRESS_TIME_HEADER,
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(5);
        cells.push(Cell::Text(self.codec.clone()));
        cells.extend(self.measurement.cells());
        cells
    }
}
