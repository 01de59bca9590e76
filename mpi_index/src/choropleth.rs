use log::{debug, warn};
use std::collections::HashMap;

use crate::config::*;
use crate::filter::countries;
use crate::table::Table;

/// Square root transform applied before shading, which spreads out the many
/// small values of the index.
pub fn sqrt_scale(mpi: f64) -> f64 {
    mpi.max(0.0).sqrt()
}

/// A linear scale split into equal-width buckets, one per color.
#[derive(PartialEq, Debug, Clone)]
pub struct ColorScale {
    min: f64,
    max: f64,
    colors: Vec<String>,
}

impl ColorScale {
    pub fn linear(min: f64, max: f64, colors: &[String]) -> Result<ColorScale, IndexError> {
        if colors.is_empty() || !min.is_finite() || !max.is_finite() || min > max {
            return Err(IndexError::InvalidColorScale);
        }
        Ok(ColorScale {
            min,
            max,
            colors: colors.to_vec(),
        })
    }

    /// The bucket of a value. Values outside of the range go to the first or
    /// last bucket, and a flat range puts everything in the first bucket.
    pub fn bucket(&self, value: f64) -> usize {
        let n = self.colors.len();
        if self.max <= self.min {
            return 0;
        }
        let t = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        ((t * n as f64) as usize).min(n - 1)
    }

    pub fn color(&self, value: f64) -> &str {
        &self.colors[self.bucket(value)]
    }

    /// The bucket edges, from `min` to `max`.
    pub fn thresholds(&self) -> Vec<f64> {
        let n = self.colors.len();
        (0..=n)
            .map(|i| self.min + (self.max - self.min) * (i as f64) / (n as f64))
            .collect()
    }
}

/// Halves round to the even neighbour.
pub fn tooltip(mpi: f64) -> String {
    format!("MPI: {}", mpi.round_ties_even() as i64)
}

/// Shades the regions of the map for one year.
///
/// `year_table` must already be restricted to `year`. The regions are matched
/// by exact name. Without boundaries, one region is produced per country of
/// the table. Regions without data get the "no data" color and an empty
/// tooltip.
pub fn build_map_view(
    year_table: &Table<MpiRow>,
    year: Year,
    regions: Option<&[String]>,
    settings: &DashboardSettings,
    event: &MapEvent,
) -> Result<MapView, IndexError> {
    let mut values: HashMap<&str, f64> = HashMap::new();
    for row in year_table.iter() {
        values.entry(row.country.as_str()).or_insert(row.mpi);
    }

    let scale = if year_table.is_empty() {
        warn!("build_map_view: no data for year {}", year);
        None
    } else {
        let transformed: Vec<f64> = year_table.iter().map(|r| sqrt_scale(r.mpi)).collect();
        let lo = transformed.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = transformed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(ColorScale::linear(lo, hi, &settings.colors)?)
    };

    let legend = if year_table.is_empty() {
        None
    } else {
        let lo = year_table.iter().map(|r| r.mpi).fold(f64::INFINITY, f64::min);
        let hi = year_table
            .iter()
            .map(|r| r.mpi)
            .fold(f64::NEG_INFINITY, f64::max);
        // The scale works on square roots; the edges are shown in MPI units.
        let thresholds: Vec<f64> = scale
            .as_ref()
            .map(|s| s.thresholds().iter().map(|t| t * t).collect())
            .unwrap_or_default();
        Some(Legend {
            caption: "MPI Values".to_string(),
            min: lo,
            max: hi,
            colors: settings.colors.clone(),
            thresholds,
        })
    };

    let names: Vec<String> = match regions {
        Some(r) => r.to_vec(),
        None => countries(year_table),
    };

    let mut unmatched = 0;
    let shaded: Vec<ShadedRegion> = names
        .into_iter()
        .map(|name| match (values.get(name.as_str()), scale.as_ref()) {
            (Some(mpi), Some(s)) => ShadedRegion {
                color: s.color(sqrt_scale(*mpi)).to_string(),
                tooltip: tooltip(*mpi),
                mpi: Some(*mpi),
                name,
            },
            _ => {
                unmatched += 1;
                ShadedRegion {
                    name,
                    mpi: None,
                    color: settings.no_data_color.clone(),
                    tooltip: String::new(),
                }
            }
        })
        .collect();
    debug!(
        "build_map_view: year {}: {} regions, {} without data",
        year,
        shaded.len(),
        unmatched
    );

    let clicked = match event {
        MapEvent::Clicked(name) => name.clone(),
        MapEvent::NoClick => String::new(),
    };

    Ok(MapView {
        year,
        regions: shaded,
        legend,
        clicked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, mpi: f64) -> MpiRow {
        MpiRow {
            country: country.to_string(),
            year: 2020,
            mpi,
        }
    }

    fn colors() -> Vec<String> {
        YL_GN.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn buckets_split_the_range_evenly() {
        let s = ColorScale::linear(0.0, 1.0, &colors()).unwrap();
        assert_eq!(s.bucket(0.0), 0);
        assert_eq!(s.bucket(0.19), 0);
        assert_eq!(s.bucket(0.21), 1);
        assert_eq!(s.bucket(0.5), 2);
        assert_eq!(s.bucket(0.99), 4);
        assert_eq!(s.bucket(1.0), 4);
        assert_eq!(s.bucket(7.0), 4);
        assert_eq!(s.bucket(-1.0), 0);
        assert_eq!(s.color(1.0), "#006837");
        let edges = s.thresholds();
        assert_eq!(edges.len(), 6);
        assert_eq!((edges[0], edges[5]), (0.0, 1.0));
    }

    #[test]
    fn flat_range_uses_first_bucket() {
        let s = ColorScale::linear(0.5, 0.5, &colors()).unwrap();
        assert_eq!(s.bucket(0.5), 0);
    }

    #[test]
    fn invalid_scales_are_rejected() {
        assert!(ColorScale::linear(1.0, 0.0, &colors()).is_err());
        assert!(ColorScale::linear(0.0, 1.0, &[]).is_err());
        assert!(ColorScale::linear(f64::NAN, 1.0, &colors()).is_err());
    }

    #[test]
    fn regions_are_shaded_on_the_square_root() {
        let t = Table::new(vec![row("Chad", 0.0), row("Niger", 1.0), row("Mali", 0.25)]);
        let regions = vec![
            "Chad".to_string(),
            "Mali".to_string(),
            "Niger".to_string(),
            "Greenland".to_string(),
        ];
        let settings = DashboardSettings::default();
        let view =
            build_map_view(&t, 2020, Some(regions.as_slice()), &settings, &MapEvent::NoClick).unwrap();
        let colors: Vec<&str> = view.regions.iter().map(|r| r.color.as_str()).collect();
        // sqrt(0.25) = 0.5 lands in the middle bucket.
        assert_eq!(colors, vec!["#ffffcc", "#78c679", "#006837", "black"]);
        assert_eq!(view.regions[3].tooltip, "");
        assert_eq!(view.regions[3].mpi, None);
        assert_eq!(view.regions[1].tooltip, "MPI: 0");
        let legend = view.legend.unwrap();
        assert_eq!((legend.min, legend.max), (0.0, 1.0));
        assert_eq!(legend.thresholds.len(), 6);
        assert_eq!(legend.thresholds[0], 0.0);
        assert_eq!(legend.thresholds[5], 1.0);
        // sqrt-spaced edges: 0.2 on the scale is 0.04 in MPI units.
        assert!((legend.thresholds[1] - 0.04).abs() < 1e-12);
        assert_eq!(view.clicked, "");
    }

    #[test]
    fn tooltips_round_halves_to_even() {
        assert_eq!(tooltip(0.5), "MPI: 0");
        assert_eq!(tooltip(1.5), "MPI: 2");
        assert_eq!(tooltip(2.5), "MPI: 2");
        assert_eq!(tooltip(2.51), "MPI: 3");
        assert_eq!(tooltip(0.55), "MPI: 1");
    }

    #[test]
    fn regions_default_to_the_countries_of_the_year() {
        let t = Table::new(vec![row("Niger", 30.0), row("Chad", 12.6)]);
        let view = build_map_view(
            &t,
            2020,
            None,
            &DashboardSettings::default(),
            &MapEvent::Clicked("Chad".to_string()),
        )
        .unwrap();
        let names: Vec<&str> = view.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Chad", "Niger"]);
        assert_eq!(view.regions[0].tooltip, "MPI: 13");
        assert_eq!(view.clicked, "Chad");
    }

    #[test]
    fn empty_year_has_no_legend() {
        let t: Table<MpiRow> = Table::new(vec![]);
        let regions = vec!["Chad".to_string()];
        let view = build_map_view(
            &t,
            2020,
            Some(regions.as_slice()),
            &DashboardSettings::default(),
            &MapEvent::NoClick,
        )
        .unwrap();
        assert_eq!(view.legend, None);
        assert_eq!(view.regions[0].color, NO_DATA_COLOR);
    }
}
