use log::debug;

use crate::aggregate::median_by_year;
use crate::config::*;
use crate::filter::{filter_by_country, years};
use crate::table::{Row, Table};

/// The trajectory of one indicator for a country, against the median of all
/// the countries for the same year.
///
/// Both series are ordered by year and skip the empty cells. The y axis
/// starts at zero.
pub fn build_chart(
    detailed: &Table<IndicatorRow>,
    country: &str,
    indicator: &str,
) -> Result<ChartView, IndexError> {
    let country_rows = filter_by_country(detailed, country);
    let mut country_points: Vec<(Year, f64)> = Vec::new();
    for row in country_rows.iter() {
        match row.field(indicator) {
            Some(Some(x)) => country_points.push((row.year, x)),
            Some(None) => {}
            None => return Err(IndexError::UnknownField(indicator.to_string())),
        }
    }
    country_points.sort_by_key(|p| p.0);

    let median_points: Vec<(Year, f64)> = median_by_year(detailed, indicator)?
        .into_iter()
        .collect();
    debug!(
        "build_chart: {} / {}: {} points, {} median points",
        country,
        indicator,
        country_points.len(),
        median_points.len()
    );

    let y_max = country_points
        .iter()
        .chain(median_points.iter())
        .map(|p| p.1)
        .fold(0.0, f64::max);

    let all_years = years(detailed);
    let title = match (all_years.first(), all_years.last()) {
        (Some(first), Some(last)) => format!("{} - {} ({}-{})", country, indicator, first, last),
        _ => format!("{} - {}", country, indicator),
    };

    Ok(ChartView {
        title,
        x_label: YEAR_COLUMN.to_string(),
        y_label: indicator.to_string(),
        country: ChartSeries {
            label: format!("{} {}", country, indicator),
            points: country_points,
        },
        median: ChartSeries {
            label: format!("World Median {}", indicator),
            points: median_points,
        },
        y_min: 0.0,
        y_max: if y_max > 0.0 { y_max } else { 1.0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: Year, schooling: Option<f64>) -> IndicatorRow {
        IndicatorRow {
            country: country.to_string(),
            year,
            values: vec![("Schooling".to_string(), schooling)],
        }
    }

    #[test]
    fn country_against_world_median() {
        let t = Table::new(vec![
            row("Chad", 2021, Some(5.0)),
            row("Chad", 2020, Some(4.0)),
            row("Mali", 2020, Some(2.0)),
            row("Mali", 2021, Some(1.0)),
            row("Togo", 2020, Some(3.0)),
            row("Togo", 2021, None),
            row("Togo", 2022, Some(9.0)),
        ]);
        let chart = build_chart(&t, "Chad", "Schooling").unwrap();
        assert_eq!(chart.title, "Chad - Schooling (2020-2022)");
        assert_eq!(chart.country.label, "Chad Schooling");
        assert_eq!(chart.country.points, vec![(2020, 4.0), (2021, 5.0)]);
        assert_eq!(chart.median.label, "World Median Schooling");
        assert_eq!(
            chart.median.points,
            vec![(2020, 3.0), (2021, 3.0), (2022, 9.0)]
        );
        assert_eq!(chart.y_min, 0.0);
        assert_eq!(chart.y_max, 9.0);
    }

    #[test]
    fn unknown_indicator_fails() {
        let t = Table::new(vec![row("Chad", 2020, Some(1.0))]);
        assert_eq!(
            build_chart(&t, "Chad", "Electricity"),
            Err(IndexError::UnknownField("Electricity".to_string()))
        );
    }

    #[test]
    fn flat_zero_series_keep_a_visible_axis() {
        let t = Table::new(vec![row("Chad", 2020, Some(0.0))]);
        let chart = build_chart(&t, "Chad", "Schooling").unwrap();
        assert_eq!((chart.y_min, chart.y_max), (0.0, 1.0));
    }
}
