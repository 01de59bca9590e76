use log::{info, warn};

use crate::builder::Dataset;
use crate::chart::build_chart;
use crate::choropleth::build_map_view;
use crate::config::*;
use crate::filter::{countries, filter_by_year, years};
use crate::metrics::{build_facts, build_rank};

/// The requested year, or the most recent one.
pub fn resolve_year(years: &[Year], requested: Option<Year>) -> Result<Year, IndexError> {
    match requested {
        Some(y) if years.contains(&y) => Ok(y),
        Some(y) => Err(IndexError::UnknownYear(y)),
        None => years.last().copied().ok_or(IndexError::EmptyDataset),
    }
}

/// The clicked country, then the requested country, then the first one.
/// Names that are not in `countries` are ignored.
pub fn resolve_country(
    countries: &[String],
    clicked: &str,
    requested: Option<&str>,
) -> Result<String, IndexError> {
    let candidate = [Some(clicked), requested]
        .into_iter()
        .flatten()
        .find(|c| countries.iter().any(|x| x == c));
    match candidate {
        Some(c) => Ok(c.to_string()),
        None => countries.first().cloned().ok_or(IndexError::EmptyDataset),
    }
}

pub fn resolve_indicator(
    indicators: &[String],
    requested: Option<&str>,
) -> Result<String, IndexError> {
    let first = indicators.first().ok_or(IndexError::NoIndicators)?;
    match requested {
        Some(name) if indicators.iter().any(|x| x == name) => Ok(name.to_string()),
        Some(name) => {
            warn!(
                "resolve_indicator: unknown indicator {:?}, using {:?}",
                name, first
            );
            Ok(first.clone())
        }
        None => Ok(first.clone()),
    }
}

/// Computes all the views of one page.
///
/// Arguments:
/// * `dataset` the joined tables
/// * `regions` the names of the boundary regions. If not provided, the map
/// has one region per country with data.
/// * `selection` the year, country and indicator picked by the user
/// * `event` the last click on the map
pub fn render_dashboard(
    dataset: &Dataset,
    regions: Option<&[String]>,
    selection: &Selection,
    event: &MapEvent,
    settings: &DashboardSettings,
) -> Result<DashboardView, IndexError> {
    let all_years = years(&dataset.mpi);
    let year = resolve_year(&all_years, selection.year)?;
    info!("render_dashboard: year {}", year);

    let year_table = filter_by_year(&dataset.mpi, year);
    let map = build_map_view(&year_table, year, regions, settings, event)?;

    let all_countries = countries(&dataset.mpi);
    let country = resolve_country(&all_countries, &map.clicked, selection.country.as_deref())?;
    info!("render_dashboard: country {:?}", country);

    let facts = build_facts(&dataset.mpi, year, Some(&country))?;
    let rank = build_rank(&dataset.mpi, year, &country)?;

    let indicator = resolve_indicator(&dataset.indicators, selection.indicator.as_deref())?;
    let chart = build_chart(&dataset.detailed, &country, &indicator)?;

    Ok(DashboardView {
        title: settings.title.clone(),
        subtitle: settings.subtitle.clone(),
        year,
        years: all_years,
        country,
        countries: all_countries,
        indicator,
        indicators: dataset.indicators.clone(),
        map,
        facts,
        rank,
        chart,
    })
}
