use clap::Parser;

/// This is a dashboard generator for the Multi-Dimensional Poverty Index.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the data sources and the output settings.
    /// Relative paths in this file are resolved against its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The MPI table (csv or xlsx). Overrides the MPI source of the --config file.
    #[clap(long, value_parser)]
    pub mpi: Option<String>,

    /// (file path) The detailed table of indicators (csv or xlsx). Overrides the detailed source
    /// of the --config file.
    #[clap(long, value_parser)]
    pub detailed: Option<String>,

    /// (file path, optional) The GeoJSON boundaries of the countries, keyed by `properties.name`.
    /// Without boundaries, the map is rendered as a shaded list of countries.
    #[clap(long, value_parser)]
    pub boundaries: Option<String>,

    /// (default: the most recent year) The year to display.
    #[clap(short, long, value_parser)]
    pub year: Option<i32>,

    /// (default: the first country in alphabetical order) The country selected in the selector.
    #[clap(long, value_parser)]
    pub country: Option<String>,

    /// (optional) The name of the region clicked on the map. It takes precedence over --country
    /// when it has data.
    #[clap(long, value_parser)]
    pub clicked: Option<String>,

    /// (default: the first indicator) The indicator to chart.
    #[clap(long, value_parser)]
    pub indicator: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the HTML page. Setting this option overrides
    /// the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the render will be written in
    /// JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, mpidash will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
