/*!
Filtering, aggregation and view models for dashboards of the
Multi-Dimensional Poverty Index (MPI).

The crate works on two in-memory tables keyed by (country, year):
the MPI table and the detailed table of indicators. It does no I/O: the
tables are assembled with a [`builder::DatasetBuilder`] and every page is
computed from scratch by [`render_dashboard`] from an explicit
[`Selection`] and [`MapEvent`].

See the [`manual`] for the details of each view.
*/

mod aggregate;
pub mod builder;
mod chart;
mod choropleth;
mod config;
mod dashboard;
mod filter;
pub mod manual;
mod metrics;
mod table;

pub use crate::aggregate::{
    dedup, median, median_by_group, median_by_year, rank_country, sum_field, GroupBy, GroupKey,
};
pub use crate::builder::{Dataset, JoinReport};
pub use crate::chart::build_chart;
pub use crate::choropleth::{build_map_view, sqrt_scale, tooltip, ColorScale};
pub use crate::config::*;
pub use crate::dashboard::{render_dashboard, resolve_country, resolve_indicator, resolve_year};
pub use crate::filter::{countries, exclude_years, filter_by_country, filter_by_year, years};
pub use crate::metrics::{build_facts, build_rank, format_thousands};
pub use crate::table::{Row, RowSignature, Table};
