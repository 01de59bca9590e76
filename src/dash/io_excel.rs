use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::dash::{io_common::RawTable, *};

/// Reads a worksheet of an Excel workbook: the named one, or the first one.
/// The first row holds the column names.
pub fn read_excel_table(path: &str, worksheet: Option<&str>) -> DashResult<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    let headers: Vec<String> = header
        .iter()
        .map(|c| read_cell(c, 1))
        .collect::<DashResult<Vec<String>>>()?;
    debug!("read_excel_table: {:?} headers: {:?}", path, headers);

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells = row
            .iter()
            .map(|c| read_cell(c, lineno))
            .collect::<DashResult<Vec<String>>>()?;
        // Formatted sheets often end with rows that only have empty cells.
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push((lineno, cells));
    }
    Ok(RawTable {
        path: path.to_string(),
        headers,
        rows,
    })
}

fn read_cell(cell: &DataType, lineno: usize) -> DashResult<String> {
    match cell {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Empty => Ok(String::new()),
        _ => Err(DashError::ExcelWrongCellType {
            lineno: lineno as u64,
            content: format!("{:?}", cell),
        }),
    }
}
