use serde::Serialize;

use crate::config::*;

/// The exact content of a row, usable as a hash key.
///
/// Numeric cells are compared bit for bit, with the two zeros folded together.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct RowSignature {
    country: String,
    year: Year,
    cells: Vec<Option<u64>>,
}

fn cell_bits(cell: Option<f64>) -> Option<u64> {
    cell.map(|x| if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() })
}

/// A row keyed by (country, year) with named numeric columns.
pub trait Row: Clone {
    fn country(&self) -> &str;
    fn year(&self) -> Year;
    /// The content of a numeric column.
    /// `None` if the row has no such column, `Some(None)` for an empty cell.
    fn field(&self, name: &str) -> Option<Option<f64>>;
    fn signature(&self) -> RowSignature;
}

impl Row for MpiRow {
    fn country(&self) -> &str {
        &self.country
    }

    fn year(&self) -> Year {
        self.year
    }

    fn field(&self, name: &str) -> Option<Option<f64>> {
        match name {
            MPI_COLUMN => Some(Some(self.mpi)),
            YEAR_COLUMN => Some(Some(self.year as f64)),
            _ => None,
        }
    }

    fn signature(&self) -> RowSignature {
        RowSignature {
            country: self.country.clone(),
            year: self.year,
            cells: vec![cell_bits(Some(self.mpi))],
        }
    }
}

impl IndicatorRow {
    pub fn value(&self, indicator: &str) -> Option<f64> {
        self.field(indicator).flatten()
    }
}

impl Row for IndicatorRow {
    fn country(&self) -> &str {
        &self.country
    }

    fn year(&self) -> Year {
        self.year
    }

    fn field(&self, name: &str) -> Option<Option<f64>> {
        if name == YEAR_COLUMN {
            return Some(Some(self.year as f64));
        }
        self.values
            .iter()
            .find(|(indicator, _)| indicator == name)
            .map(|(_, v)| *v)
    }

    fn signature(&self) -> RowSignature {
        RowSignature {
            country: self.country.clone(),
            year: self.year,
            cells: self.values.iter().map(|(_, v)| cell_bits(*v)).collect(),
        }
    }
}

/// An ordered collection of rows.
///
/// Tables are never modified in place: every operation returns a new table.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(rows: Vec<R>) -> Table<R> {
        Table { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Table {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator_row(values: &[(&str, Option<f64>)]) -> IndicatorRow {
        IndicatorRow {
            country: "Chad".to_string(),
            year: 2019,
            values: values.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn fields_distinguish_missing_columns_from_empty_cells() {
        let row = indicator_row(&[("Schooling", Some(0.4)), ("Sanitation", None)]);
        assert_eq!(row.field("Schooling"), Some(Some(0.4)));
        assert_eq!(row.field("Sanitation"), Some(None));
        assert_eq!(row.field("Electricity"), None);
        assert_eq!(row.field(YEAR_COLUMN), Some(Some(2019.0)));
        assert_eq!(row.value("Sanitation"), None);
    }

    #[test]
    fn signatures_fold_zeros() {
        let a = MpiRow {
            country: "Chad".to_string(),
            year: 2019,
            mpi: 0.0,
        };
        let b = MpiRow { mpi: -0.0, ..a.clone() };
        assert_eq!(a.signature(), b.signature());
        let c = MpiRow { mpi: 0.1, ..a.clone() };
        assert_ne!(a.signature(), c.signature());
    }
}
