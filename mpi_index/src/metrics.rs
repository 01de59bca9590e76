use crate::aggregate::{rank_country, sum_field};
use crate::config::*;
use crate::filter::{filter_by_country, filter_by_year};
use crate::table::Table;

/// Formats an integer with commas between groups of three digits.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// The summed MPI of a year, rounded to an integer (halves to even).
///
/// An empty `country` means all the countries.
pub fn build_facts(
    mpi: &Table<MpiRow>,
    year: Year,
    country: Option<&str>,
) -> Result<MetricView, IndexError> {
    let mut table = filter_by_year(mpi, year);
    if let Some(c) = country.filter(|c| !c.is_empty()) {
        table = filter_by_country(&table, c);
    }
    let total = sum_field(&table, MPI_COLUMN)?;
    Ok(MetricView {
        title: MPI_COLUMN.to_string(),
        value: format_thousands(total.round_ties_even() as i64),
    })
}

/// The rank of the country among all the countries of the year.
pub fn build_rank(
    mpi: &Table<MpiRow>,
    year: Year,
    country: &str,
) -> Result<MetricView, IndexError> {
    let table = filter_by_year(mpi, year);
    let rank = rank_country(&table, country)?;
    Ok(MetricView {
        title: "Country Rank".to_string(),
        value: rank.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: Year, mpi: f64) -> MpiRow {
        MpiRow {
            country: country.to_string(),
            year,
            mpi,
        }
    }

    fn sample() -> Table<MpiRow> {
        Table::new(vec![
            row("Chad", 2020, 1200.4),
            row("Mali", 2020, 800.0),
            row("Mali", 2020, 800.0),
            row("Chad", 2021, 5.0),
        ])
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-45678), "-45,678");
    }

    #[test]
    fn facts_for_the_year_and_for_one_country() {
        let t = sample();
        assert_eq!(build_facts(&t, 2020, None).unwrap().value, "2,000");
        assert_eq!(build_facts(&t, 2020, Some("")).unwrap().value, "2,000");
        assert_eq!(build_facts(&t, 2020, Some("Mali")).unwrap().value, "800");
        assert_eq!(build_facts(&t, 2019, None).unwrap().value, "0");
    }

    #[test]
    fn facts_round_halves_to_even() {
        let single = |mpi: f64| Table::new(vec![row("Chad", 2020, mpi)]);
        assert_eq!(build_facts(&single(2.5), 2020, None).unwrap().value, "2");
        assert_eq!(build_facts(&single(3.5), 2020, None).unwrap().value, "4");
        assert_eq!(build_facts(&single(0.5), 2020, None).unwrap().value, "0");
        assert_eq!(build_facts(&single(1500.5), 2020, None).unwrap().value, "1,500");
    }

    #[test]
    fn rank_is_displayed_over_the_total() {
        let t = sample();
        let m = build_rank(&t, 2020, "Mali").unwrap();
        assert_eq!(m.title, "Country Rank");
        assert_eq!(m.value, "2/3");
        assert_eq!(
            build_rank(&t, 2021, "Mali"),
            Err(IndexError::CountryNotRanked("Mali".to_string()))
        );
    }
}
