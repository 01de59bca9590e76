use log::{debug, info, warn};

use mpi_index::builder::DatasetBuilder;
use mpi_index::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_geojson;
mod render_html;

use crate::dash::config_reader::*;
use crate::dash::io_common::{
    add_indicator_rows, add_mpi_rows, indicator_names, resolve_path, RawTable,
};
use crate::dash::io_geojson::{read_boundaries, Boundary};

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Line {lineno}: could not read the line"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno}: missing cell for column {column}"))]
    MissingCell { lineno: usize, column: String },
    #[snafu(display("Missing column {column} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Line {lineno}: could not read {content:?} as a number in column {column}"))]
    InvalidNumber {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet or no header in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Missing worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Line {lineno}: unexpected cell {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Provider not implemented: {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Error parsing GeoJSON file {path}"))]
    ParsingGeoJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid geometry for region {name}"))]
    InvalidGeometry { name: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Render failed: {source}"))]
    Render { source: IndexError },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No {what} given: pass it on the command line or in the configuration file"))]
    MissingInput { what: String },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type DashResult<T> = Result<T, DashError>;

/// Default name of the page when only an output directory is configured.
const PAGE_FILE_NAME: &str = "mpi_dashboard.html";

/// Everything that one invocation asks for.
///
/// The file paths given here take precedence over the ones of the
/// configuration file.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RenderRequest {
    pub config: Option<String>,
    pub mpi: Option<String>,
    pub detailed: Option<String>,
    pub boundaries: Option<String>,
    pub selection: Selection,
    pub event: MapEvent,
    /// File path, "stdout" or empty.
    pub out: Option<String>,
    /// File path, "stdout" or empty.
    pub summary: Option<String>,
    pub reference: Option<String>,
}

fn read_table(source: &TableSource) -> DashResult<RawTable> {
    info!("Attempting to read table {:?}", source.file_path);
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_table(&source.file_path),
        "xlsx" | "excel" => {
            io_excel::read_excel_table(&source.file_path, source.worksheet_name.as_deref())
        }
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// Reads both tables and joins them.
pub fn load_dataset(
    mpi_source: &TableSource,
    detailed_source: &TableSource,
    settings: &DashboardSettings,
) -> DashResult<(Dataset, JoinReport)> {
    let mpi_raw = read_table(mpi_source)?;
    let detailed_raw = read_table(detailed_source)?;
    let names = indicator_names(&detailed_raw);
    if names.is_empty() {
        whatever!(
            "The detailed table {} has no indicator column",
            detailed_source.file_path
        )
    }
    let mut builder = DatasetBuilder::new(settings).indicators(&names);
    add_mpi_rows(&mpi_raw, &mut builder)?;
    add_indicator_rows(&detailed_raw, &mut builder)?;
    let (dataset, report) = builder.build();
    info!(
        "load_dataset: {} MPI rows, {} detailed rows, {} indicators",
        dataset.mpi.len(),
        dataset.detailed.len(),
        dataset.indicators.len()
    );
    if !report.unmatched.is_empty() {
        warn!(
            "load_dataset: {} detailed rows have no MPI row: {:?}",
            report.unmatched.len(),
            report.unmatched
        );
    }
    Ok((dataset, report))
}

fn build_summary_js(view: &DashboardView, report: &JoinReport) -> JSValue {
    let regions: Vec<JSValue> = view
        .map
        .regions
        .iter()
        .map(|r| json!({"name": r.name, "mpi": r.mpi, "color": r.color, "tooltip": r.tooltip}))
        .collect();
    // Bucket edges are not part of the summary.
    let legend: Option<JSValue> = view.map.legend.as_ref().map(|l| {
        json!({"caption": l.caption, "min": l.min, "max": l.max, "colors": l.colors})
    });
    json!({
        "config": {
            "title": view.title,
            "subtitle": view.subtitle
        },
        "selection": {
            "year": view.year,
            "country": view.country,
            "indicator": view.indicator
        },
        "join": {
            "matched": report.matched,
            "unmatched": report.unmatched.len(),
            "withoutIndicators": report.without_indicators
        },
        "map": {
            "regions": regions,
            "legend": legend
        },
        "metrics": {
            "facts": view.facts.value,
            "rank": view.rank.value
        },
        "chart": {
            "title": view.chart.title,
            "country": view.chart.country.points,
            "median": view.chart.median.points
        }
    })
}

fn write_output(dest: &str, contents: &str) -> DashResult<()> {
    match dest {
        "" => {}
        "stdout" => println!("{}", contents),
        path => {
            fs::write(path, contents).context(WritingOutputSnafu { path })?;
            info!("Wrote {}", path);
        }
    }
    Ok(())
}

/// Renders one page of the dashboard and returns its view.
pub fn run_dashboard(req: &RenderRequest) -> DashResult<DashboardView> {
    let config = match &req.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let root_p: &Path = match &req.config {
        Some(p) => Path::new(p.as_str())
            .parent()
            .context(MissingParentDirSnafu {})?,
        None => Path::new("."),
    };

    let settings = match &config {
        Some(c) => c.settings()?,
        None => DashboardSettings::default(),
    };
    debug!("run_dashboard: settings: {:?}", settings);

    let mpi_source = match (&req.mpi, &config) {
        (Some(p), _) => TableSource::from_path(p),
        (None, Some(c)) => c.data_sources.mpi.resolved(root_p),
        (None, None) => return MissingInputSnafu { what: "MPI table" }.fail(),
    };
    let detailed_source = match (&req.detailed, &config) {
        (Some(p), _) => TableSource::from_path(p),
        (None, Some(c)) => c.data_sources.detailed.resolved(root_p),
        (None, None) => {
            return MissingInputSnafu {
                what: "detailed table",
            }
            .fail()
        }
    };
    let boundaries_path: Option<String> = match (&req.boundaries, &config) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(c)) => c
            .data_sources
            .boundaries
            .as_ref()
            .map(|b| resolve_path(root_p, b)),
        (None, None) => None,
    };

    let (dataset, report) = load_dataset(&mpi_source, &detailed_source, &settings)?;

    let boundaries: Option<Vec<Boundary>> = match &boundaries_path {
        Some(p) => Some(read_boundaries(p)?),
        None => None,
    };
    let region_names: Option<Vec<String>> = boundaries
        .as_ref()
        .map(|bs| bs.iter().map(|b| b.name.clone()).collect());

    let view = render_dashboard(
        &dataset,
        region_names.as_deref(),
        &req.selection,
        &req.event,
        &settings,
    )
    .context(RenderSnafu {})?;
    info!(
        "run_dashboard: year {}, country {:?}, indicator {:?}",
        view.year, view.country, view.indicator
    );

    let out_path: Option<String> = match (&req.out, &config) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(c)) => c.output_directory().map(|dir| {
            let dir = resolve_path(root_p, &dir);
            resolve_path(Path::new(&dir), PAGE_FILE_NAME)
        }),
        (None, None) => None,
    };
    match &out_path {
        Some(p) => {
            let page = render_html::render_page(&view, boundaries.as_deref());
            write_output(p, &page)?;
        }
        None => info!("run_dashboard: no output requested for the page"),
    }

    let result_js = build_summary_js(&view, &report);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {
        path: "<summary>",
    })?;
    if let Some(p) = &req.summary {
        write_output(p, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &req.reference {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
            .context(ParsingJsonSnafu { path: summary_p })?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(view)
}

/// Prints an error with its backtrace, if there is one.
pub fn report_error(e: &DashError) {
    eprintln!("An error occured: {}", e);
    if let Some(bt) = ErrorCompat::backtrace(e) {
        eprintln!("trace: {}", bt);
    }
}

#[cfg(test)]
pub(crate) fn test_dir() -> String {
    option_env!("MPIDASH_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"))
        .to_string()
}

#[cfg(test)]
fn run_dashboard_test(test_name: &str, req: RenderRequest) -> DashResult<DashboardView> {
    let _ = env_logger::builder().is_test(true).try_init();
    info!("Running test {}", test_name);
    let res = run_dashboard(&req);
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        report_error(e);
    }
    res
}

/// Runs the configuration of a test directory against its expected summary.
#[cfg(test)]
fn test_wrapper(test_name: &str, selection: Selection, event: MapEvent) -> DashboardView {
    let dir = format!("{}/{}", test_dir(), test_name);
    let req = RenderRequest {
        config: Some(format!("{}/{}_config.json", dir, test_name)),
        selection,
        event,
        out: Some(String::new()),
        reference: Some(format!("{}/{}_expected_summary.json", dir, test_name)),
        ..RenderRequest::default()
    };
    run_dashboard_test(test_name, req).unwrap()
}
