use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::codec::Codec;

/// Configuration for a harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory receiving `<codec>.csv` and `Combined.csv`. Default: `.`
    pub output_dir: PathBuf,
    /// Write CSV artifacts alongside the tables. Default: true.
    pub write_csv: bool,
    /// Run codec sweeps on a rayon pool, one codec per task. Default: false.
    pub parallel: bool,
    /// Caller-supplied level ranges, keyed by codec name (case-insensitive).
    pub level_overrides: Vec<(String, RangeInclusive<i32>)>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            write_csv: true,
            parallel: false,
            level_overrides: Vec::new(),
        }
    }
}

impl HarnessConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_csv(mut self, enabled: bool) -> Self {
        self.write_csv = enabled;
        self
    }

    #[must_use]
    pub const fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sweep only `levels` for the codec called `codec`. A later override for
    /// the same codec replaces an earlier one.
    #[must_use]
    pub fn with_levels(mut self, codec: impl Into<String>, levels: RangeInclusive<i32>) -> Self {
        let codec = codec.into();
        self.level_overrides
            .retain(|(name, _)| !name.eq_ignore_ascii_case(&codec));
        self.level_overrides.push((codec, levels));
        self
    }

    /// Levels to sweep for `codec`: its override if one was set, otherwise
    /// the codec's own domain.
    pub fn levels_for(&self, codec: &dyn Codec) -> RangeInclusive<i32> {
        self.level_overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(codec.name()))
            .map(|(_, levels)| levels.clone())
            .unwrap_or_else(|| codec.levels())
    }
}
