use log::{debug, info, warn};
use std::collections::HashSet;

pub use crate::config::*;
use crate::filter::exclude_years;
use crate::table::Table;

/// The two tables of the dashboard, after the join.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub mpi: Table<MpiRow>,
    pub detailed: Table<IndicatorRow>,
    /// The indicator columns of the detailed table, in file order.
    pub indicators: Vec<String>,
}

/// What happened to the rows of the detailed table during the join.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct JoinReport {
    pub matched: usize,
    /// Detailed rows whose (country, year) has no MPI row. They are dropped.
    pub unmatched: Vec<(String, Year)>,
    /// MPI rows without indicators.
    pub without_indicators: usize,
}

/// A builder for assembling a dataset row by row.
///
/// ```
/// use mpi_index::builder::DatasetBuilder;
/// use mpi_index::DashboardSettings;
/// # use mpi_index::IndexError;
///
/// let mut builder = DatasetBuilder::new(&DashboardSettings::default())
///     .indicators(&["Schooling".to_string()]);
///
/// builder.add_mpi("Chad", 2020, 0.52);
/// builder.add_indicators("Chad", 2020, &[Some(0.3)])?;
///
/// let (dataset, report) = builder.build();
/// assert_eq!(dataset.mpi.len(), 1);
/// assert!(report.unmatched.is_empty());
/// # Ok::<(), IndexError>(())
/// ```
pub struct DatasetBuilder {
    excluded_years: Vec<Year>,
    indicators: Vec<String>,
    mpi_rows: Vec<MpiRow>,
    detailed_rows: Vec<IndicatorRow>,
}

impl DatasetBuilder {
    pub fn new(settings: &DashboardSettings) -> DatasetBuilder {
        DatasetBuilder {
            excluded_years: settings.excluded_years.clone(),
            indicators: Vec::new(),
            mpi_rows: Vec::new(),
            detailed_rows: Vec::new(),
        }
    }

    pub fn indicators(self, names: &[String]) -> DatasetBuilder {
        DatasetBuilder {
            indicators: names.to_vec(),
            ..self
        }
    }

    pub fn add_mpi(&mut self, country: &str, year: Year, mpi: f64) {
        self.mpi_rows.push(MpiRow {
            country: country.to_string(),
            year,
            mpi,
        });
    }

    /// Adds the indicators of a country for one year.
    ///
    /// values: one cell per indicator, in the order given to `indicators`.
    pub fn add_indicators(
        &mut self,
        country: &str,
        year: Year,
        values: &[Option<f64>],
    ) -> Result<(), IndexError> {
        if values.len() != self.indicators.len() {
            return Err(IndexError::IndicatorCountMismatch {
                expected: self.indicators.len(),
                found: values.len(),
            });
        }
        self.detailed_rows.push(IndicatorRow {
            country: country.to_string(),
            year,
            values: self
                .indicators
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect(),
        });
        Ok(())
    }

    /// Drops the excluded years and joins the detailed rows on the MPI rows by
    /// (country, year).
    pub fn build(self) -> (Dataset, JoinReport) {
        let mpi = exclude_years(&Table::new(self.mpi_rows), &self.excluded_years);
        let detailed = exclude_years(&Table::new(self.detailed_rows), &self.excluded_years);
        info!(
            "build: {} MPI rows and {} detailed rows after excluding {:?}",
            mpi.len(),
            detailed.len(),
            self.excluded_years
        );

        let mpi_keys: HashSet<(&str, Year)> =
            mpi.iter().map(|r| (r.country.as_str(), r.year)).collect();
        let mut report = JoinReport::default();
        let mut joined: Vec<IndicatorRow> = Vec::new();
        for row in detailed.into_rows() {
            if mpi_keys.contains(&(row.country.as_str(), row.year)) {
                report.matched += 1;
                joined.push(row);
            } else {
                debug!("build: no MPI row for {:?} {}", row.country, row.year);
                report.unmatched.push((row.country, row.year));
            }
        }

        let detailed_keys: HashSet<(&str, Year)> = joined
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        report.without_indicators = mpi_keys.difference(&detailed_keys).count();

        if !report.unmatched.is_empty() {
            warn!(
                "build: dropped {} detailed rows without a matching MPI row",
                report.unmatched.len()
            );
        }

        let dataset = Dataset {
            mpi,
            detailed: Table::new(joined),
            indicators: self.indicators,
        };
        (dataset, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DatasetBuilder {
        DatasetBuilder::new(&DashboardSettings::default())
            .indicators(&["Schooling".to_string(), "Sanitation".to_string()])
    }

    #[test]
    fn rows_are_joined_by_country_and_year() {
        let mut b = builder();
        b.add_mpi("Chad", 2020, 0.5);
        b.add_mpi("Mali", 2020, 0.4);
        b.add_mpi("Mali", 2021, 0.3);
        // Out of order on purpose: the join does not depend on positions.
        b.add_indicators("Mali", 2020, &[Some(1.0), None]).unwrap();
        b.add_indicators("Chad", 2020, &[Some(2.0), Some(3.0)])
            .unwrap();
        b.add_indicators("Chda", 2020, &[Some(9.0), Some(9.0)])
            .unwrap();
        let (dataset, report) = b.build();
        assert_eq!(report.matched, 2);
        assert_eq!(report.unmatched, vec![("Chda".to_string(), 2020)]);
        assert_eq!(report.without_indicators, 1);
        assert_eq!(dataset.detailed.len(), 2);
        assert_eq!(dataset.detailed.rows()[0].country, "Mali");
        assert_eq!(dataset.detailed.rows()[1].value("Sanitation"), Some(3.0));
    }

    #[test]
    fn excluded_years_are_dropped_from_both_tables() {
        let mut b = builder();
        b.add_mpi("Chad", 2022, 0.5);
        b.add_mpi("Chad", 2023, 0.5);
        b.add_indicators("Chad", 2023, &[None, None]).unwrap();
        let (dataset, report) = b.build();
        assert_eq!(dataset.mpi.len(), 1);
        assert!(dataset.detailed.is_empty());
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn indicator_count_must_match() {
        let mut b = builder();
        assert_eq!(
            b.add_indicators("Chad", 2020, &[Some(1.0)]),
            Err(IndexError::IndicatorCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
