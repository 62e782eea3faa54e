use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::record::{Cell, Tabular};

/// Fractional digits shown for seconds in the human-readable table.
pub const TABLE_SECONDS_PRECISION: usize = 6;

/// Gap between table columns.
const COLUMN_GAP: &str = "  ";

fn table_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Integer(n) => n.to_string(),
        Cell::Seconds(s) => format!("{s:.prec$}", prec = TABLE_SECONDS_PRECISION),
    }
}

/// Plain decimal: shortest form that round-trips, never exponent notation.
fn csv_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Integer(n) => n.to_string(),
        Cell::Seconds(s) => s.to_string(),
    }
}

/// Render `rows` as an aligned text table.
///
/// Layout:
/// ```text
/// <name>
/// <header>  <header>  ...
/// --------  --------
/// <cell>    <cell>
///
/// ```
/// Text columns are left-aligned and numeric columns right-aligned. An empty
/// `rows` still yields the title, header, and rule.
pub fn render_table<R: Tabular>(name: &str, rows: &[R]) -> String {
    let headers = R::headers();
    let body: Vec<Vec<Cell>> = rows.iter().map(Tabular::cells).collect();
    let text: Vec<Vec<String>> = body
        .iter()
        .map(|cells| cells.iter().map(table_text).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &text {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    // Header-only tables have no cells to judge by and stay left-aligned.
    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| !body.is_empty() && body.iter().all(|cells| cells[col].is_numeric()))
        .collect();

    let mut out = String::new();
    out.push_str(name);
    out.push('\n');

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| align(h, widths[col], numeric[col]))
        .collect();
    push_line(&mut out, &header_line);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule);

    for row in &text {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| align(cell, widths[col], numeric[col]))
            .collect();
        push_line(&mut out, &line);
    }

    out.push('\n');
    out
}

fn align(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

fn push_line(out: &mut String, columns: &[String]) {
    let line = columns.join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Write the header row once, then one row per record.
pub fn write_csv<R: Tabular, W: Write>(writer: W, rows: &[R]) -> Result<(), ReportError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(R::headers())?;
    for row in rows {
        csv.write_record(row.cells().iter().map(csv_text))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// CSV content for `rows` as bytes.
pub fn csv_bytes<R: Tabular>(rows: &[R]) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    Ok(buf)
}

/// Path of the CSV artifact for report `name` inside `dir`.
pub(crate) fn csv_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.csv"))
}

/// Write `<dir>/<name>.csv`, replacing any existing file.
pub fn write_csv_file<R: Tabular>(
    dir: &Path,
    name: &str,
    rows: &[R],
) -> Result<PathBuf, ReportError> {
    let path = csv_path(dir, name);
    let file = File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, rows)?;
    out.flush().map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote csv report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::record::{CombinedRecord, Measurement};

    fn m(level: i32, size: u64) -> Measurement {
        Measurement {
            level,
            compress_time: Duration::from_micros(1500),
            compressed_size: size,
            decompress_time: Duration::from_nanos(250),
        }
    }

    #[test]
    fn table_has_title_header_rule_rows_and_blank_line() {
        let table = render_table("Gzip", &[m(0, 1023), m(9, 42)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Gzip");
        assert!(lines[1].starts_with("Compression Level  Time (seconds)"));
        assert!(lines[2].starts_with("-----------------  --------------"));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "");
        assert!(table.ends_with("\n\n"));
        assert!(lines[3].contains("0.001500"));
        assert!(lines[3].contains("1023"));
        assert!(lines[4].contains("0.000000"));
    }

    #[test]
    fn numeric_columns_are_right_aligned() {
        let table = render_table("Zstandard", &[m(1, 5), m(22, 123456)]);
        let lines: Vec<&str> = table.lines().collect();
        let level_width = "Compression Level".len();
        assert_eq!(&lines[3][..level_width], format!("{:>level_width$}", 1));
        assert_eq!(&lines[4][..level_width], format!("{:>level_width$}", 22));
    }

    #[test]
    fn combined_table_leads_with_left_aligned_algorithm() {
        let rows = vec![
            CombinedRecord { codec: "BZ2".into(), measurement: m(1, 10) },
            CombinedRecord { codec: "Zstandard".into(), measurement: m(1, 9) },
        ];
        let table = render_table("Combined", &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].starts_with("Algorithm  Compression Level"));
        assert!(lines[3].starts_with("BZ2        "));
        assert!(lines[4].starts_with("Zstandard  "));
    }

    #[test]
    fn empty_rows_render_header_only() {
        let table = render_table::<Measurement>("LZMA", &[]);
        assert_eq!(table.lines().count(), 4);
        assert!(table.starts_with("LZMA\nCompression Level"));
        let csv = csv_bytes::<Measurement>(&[]).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Compression Level,Time (seconds),Compressed Size (bytes),Decompress Time (seconds)\n"
        );
    }

    #[test]
    fn csv_uses_plain_decimals() {
        let csv = String::from_utf8(csv_bytes(&[m(3, 1_000_000_000)]).unwrap()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "3,0.0015,1000000000,0.00000025");
        assert!(!row.contains('e'));
    }

    #[test]
    fn csv_quotes_names_that_need_it() {
        let rows = vec![CombinedRecord { codec: "a,b".into(), measurement: m(0, 1) }];
        let csv = String::from_utf8(csv_bytes(&rows).unwrap()).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"a,b\",0,"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let rows = [m(1, 100), m(2, 90), m(3, 80)];
        assert_eq!(render_table("X", &rows), render_table("X", &rows));
        assert_eq!(csv_bytes(&rows).unwrap(), csv_bytes(&rows).unwrap());
    }
}
