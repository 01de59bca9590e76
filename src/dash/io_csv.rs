// Primitives for reading CSV files.

use crate::dash::{io_common::RawTable, *};

pub fn read_csv_table(path: &str) -> DashResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("read_csv_table: {:?} headers: {:?}", path, headers);

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is on the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        rows.push((lineno, line.iter().map(|s| s.to_string()).collect()));
    }
    Ok(RawTable {
        path: path.to_string(),
        headers,
        rows,
    })
}
