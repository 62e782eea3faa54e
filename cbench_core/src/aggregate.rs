use crate::record::{CombinedRecord, CombinedResult, RunResult};

/// Concatenate per-codec results in the order given, stamping each record
/// with its codec name. Nothing is sorted, filtered, or deduplicated.
pub fn combine<'a, I>(runs: I) -> CombinedResult
where
    I: IntoIterator<Item = &'a RunResult>,
{
    let records = runs
        .into_iter()
        .flat_map(|run| {
            run.records.iter().map(move |m| CombinedRecord {
                codec: run.codec.clone(),
                measurement: *m,
            })
        })
        .collect();
    CombinedResult { records }
}
