// ********* Input data structures ***********

use serde::Serialize;
use std::error::Error;
use std::fmt::Display;

pub type Year = i32;

pub const COUNTRY_COLUMN: &str = "Country Name";
pub const YEAR_COLUMN: &str = "Year";
pub const MPI_COLUMN: &str = "MPI";

/// One row of the MPI table, keyed by (country, year).
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct MpiRow {
    pub country: String,
    pub year: Year,
    pub mpi: f64,
}

/// One row of the detailed table.
///
/// The indicator columns are kept in file order. An empty cell is `None`.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct IndicatorRow {
    pub country: String,
    pub year: Year,
    pub values: Vec<(String, Option<f64>)>,
}

/// The choices made by the user for one render.
///
/// Every field is optional: the dashboard falls back to the most recent year,
/// the first country in alphabetical order and the first indicator.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Selection {
    pub year: Option<Year>,
    pub country: Option<String>,
    pub indicator: Option<String>,
}

/// What happened on the map before this render.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub enum MapEvent {
    #[default]
    NoClick,
    /// The name of the region that was clicked, as found in the boundaries.
    Clicked(String),
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub struct CountryRank {
    pub rank: usize,
    pub total: usize,
}

impl Display for CountryRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.rank, self.total)
    }
}

/// A boundary region after the MPI values of the year have been joined on it.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct ShadedRegion {
    pub name: String,
    pub mpi: Option<f64>,
    pub color: String,
    pub tooltip: String,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct Legend {
    pub caption: String,
    pub min: f64,
    pub max: f64,
    pub colors: Vec<String>,
    /// The bucket edges, one more than the colors.
    pub thresholds: Vec<f64>,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct MapView {
    pub year: Year,
    pub regions: Vec<ShadedRegion>,
    /// No legend is produced when the year has no data.
    pub legend: Option<Legend>,
    /// The last clicked region, empty if none.
    pub clicked: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct MetricView {
    pub title: String,
    pub value: String,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(Year, f64)>,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct ChartView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub country: ChartSeries,
    pub median: ChartSeries,
    pub y_min: f64,
    pub y_max: f64,
}

/// Everything needed to draw one page of the dashboard.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub subtitle: String,
    pub year: Year,
    pub years: Vec<Year>,
    pub country: String,
    pub countries: Vec<String>,
    pub indicator: String,
    pub indicators: Vec<String>,
    pub map: MapView,
    pub facts: MetricView,
    pub rank: MetricView,
    pub chart: ChartView,
}

/// Errors that prevent a view from being computed.
#[derive(PartialEq, Debug, Clone)]
pub enum IndexError {
    /// The rows do not have a numeric column with this name.
    UnknownField(String),
    /// The country has no row in the table being ranked.
    CountryNotRanked(String),
    UnknownYear(Year),
    EmptyDataset,
    NoIndicators,
    InvalidColorScale,
    IndicatorCountMismatch { expected: usize, found: usize },
}

impl Error for IndexError {}

impl Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::UnknownField(name) => write!(f, "unknown field {:?}", name),
            IndexError::CountryNotRanked(name) => {
                write!(f, "country {:?} has no data for the selected year", name)
            }
            IndexError::UnknownYear(year) => write!(f, "no data for year {}", year),
            IndexError::EmptyDataset => write!(f, "the dataset is empty"),
            IndexError::NoIndicators => write!(f, "the detailed table has no indicator column"),
            IndexError::InvalidColorScale => write!(f, "invalid color scale"),
            IndexError::IndicatorCountMismatch { expected, found } => write!(
                f,
                "expected {} indicator values, found {}",
                expected, found
            ),
        }
    }
}

// ********* Configuration **********

pub const DEFAULT_TITLE: &str = "Multi-Dimensional Poverty Index";
pub const DEFAULT_SUBTITLE: &str = "SAP Sustainability & Multidimensional Poverty Index Challenge";

/// The "YlGn" shades, from the lowest to the highest bucket.
pub const YL_GN: [&str; 5] = ["#ffffcc", "#c2e699", "#78c679", "#31a354", "#006837"];

pub const NO_DATA_COLOR: &str = "black";

/// The last year of the published dataset is incomplete.
pub const DEFAULT_EXCLUDED_YEARS: [Year; 1] = [2023];

#[derive(PartialEq, Debug, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    pub excluded_years: Vec<Year>,
    pub colors: Vec<String>,
    pub no_data_color: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            excluded_years: DEFAULT_EXCLUDED_YEARS.to_vec(),
            colors: YL_GN.iter().map(|c| c.to_string()).collect(),
            no_data_color: NO_DATA_COLOR.to_string(),
        }
    }
}
