use std::path::{Path, PathBuf};

use crate::dash::*;

/// A table as read from a file, before typing.
/// Each row carries its line number in the file (the header is line 1).
#[derive(PartialEq, Debug, Clone)]
pub struct RawTable {
    pub path: String,
    pub headers: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

impl RawTable {
    pub fn column_index(&self, column: &str) -> DashResult<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .context(MissingColumnSnafu {
                column,
                path: self.path.as_str(),
            })
    }
}

pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

fn cell<'a>(row: &'a [String], idx: usize, lineno: usize, column: &str) -> DashResult<&'a str> {
    row.get(idx)
        .map(|s| s.trim())
        .context(MissingCellSnafu { lineno, column })
}

/// Years may come out of spreadsheets as floating point numbers.
pub fn parse_year(content: &str, lineno: usize) -> DashResult<Year> {
    if let Ok(y) = content.parse::<Year>() {
        return Ok(y);
    }
    match content.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < (Year::MAX as f64) => Ok(f as Year),
        _ => InvalidNumberSnafu {
            lineno,
            column: YEAR_COLUMN,
            content,
        }
        .fail(),
    }
}

/// An empty cell, or one of the usual markers of missing values, is `None`.
pub fn parse_value(content: &str, lineno: usize, column: &str) -> DashResult<Option<f64>> {
    match content {
        "" | "NA" | "N/A" | "NaN" | "nan" | "null" => Ok(None),
        s => match s.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Some(x)),
            _ => InvalidNumberSnafu {
                lineno,
                column,
                content,
            }
            .fail(),
        },
    }
}

/// Loads the rows of the MPI table into the builder.
///
/// Rows with an empty MPI cell are skipped with a warning: the country then
/// has no data for that year.
pub fn add_mpi_rows(raw: &RawTable, builder: &mut DatasetBuilder) -> DashResult<()> {
    let country_idx = raw.column_index(COUNTRY_COLUMN)?;
    let year_idx = raw.column_index(YEAR_COLUMN)?;
    let mpi_idx = raw.column_index(MPI_COLUMN)?;
    let mut skipped = 0;
    for (lineno, row) in raw.rows.iter() {
        let lineno = *lineno;
        let country = cell(row, country_idx, lineno, COUNTRY_COLUMN)?;
        let year = parse_year(cell(row, year_idx, lineno, YEAR_COLUMN)?, lineno)?;
        match parse_value(cell(row, mpi_idx, lineno, MPI_COLUMN)?, lineno, MPI_COLUMN)? {
            Some(mpi) => builder.add_mpi(country, year, mpi),
            None => {
                warn!(
                    "add_mpi_rows: line {}: no MPI for {:?} {}, skipping",
                    lineno, country, year
                );
                skipped += 1;
            }
        }
    }
    debug!(
        "add_mpi_rows: {}: {} rows, {} without MPI",
        simplify_file_name(&raw.path),
        raw.rows.len(),
        skipped
    );
    Ok(())
}

/// The indicator columns: everything except the key columns, in file order.
pub fn indicator_names(raw: &RawTable) -> Vec<String> {
    raw.headers
        .iter()
        .filter(|h| h.as_str() != COUNTRY_COLUMN && h.as_str() != YEAR_COLUMN)
        .cloned()
        .collect()
}

/// Loads the rows of the detailed table into the builder.
/// The builder must have been given `indicator_names(raw)`.
pub fn add_indicator_rows(raw: &RawTable, builder: &mut DatasetBuilder) -> DashResult<()> {
    let country_idx = raw.column_index(COUNTRY_COLUMN)?;
    let year_idx = raw.column_index(YEAR_COLUMN)?;
    let indicator_idxs: Vec<(usize, String)> = indicator_names(raw)
        .into_iter()
        .map(|name| raw.column_index(&name).map(|idx| (idx, name)))
        .collect::<DashResult<Vec<_>>>()?;
    for (lineno, row) in raw.rows.iter() {
        let lineno = *lineno;
        let country = cell(row, country_idx, lineno, COUNTRY_COLUMN)?;
        let year = parse_year(cell(row, year_idx, lineno, YEAR_COLUMN)?, lineno)?;
        let mut values: Vec<Option<f64>> = Vec::with_capacity(indicator_idxs.len());
        for (idx, name) in indicator_idxs.iter() {
            // Short lines are padded with empty cells.
            let content = row.get(*idx).map(|s| s.trim()).unwrap_or("");
            values.push(parse_value(content, lineno, name)?);
        }
        builder
            .add_indicators(country, year, &values)
            .context(RenderSnafu {})?;
    }
    debug!(
        "add_indicator_rows: {}: {} rows, {} indicators",
        simplify_file_name(&raw.path),
        raw.rows.len(),
        indicator_idxs.len()
    );
    Ok(())
}
