use clap::Parser;
use log::{debug, LevelFilter};

use mpi_index::{MapEvent, Selection};

mod args;
mod dash;

use crate::args::Args;
use crate::dash::{report_error, run_dashboard, RenderRequest};

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    let req = RenderRequest {
        config: args.config.clone(),
        mpi: args.mpi.clone(),
        detailed: args.detailed.clone(),
        boundaries: args.boundaries.clone(),
        selection: Selection {
            year: args.year,
            country: args.country.clone(),
            indicator: args.indicator.clone(),
        },
        event: match &args.clicked {
            Some(name) if !name.is_empty() => MapEvent::Clicked(name.clone()),
            _ => MapEvent::NoClick,
        },
        out: args.out.clone(),
        summary: args.summary.clone(),
        reference: args.reference,
    };

    if let Err(e) = run_dashboard(&req) {
        report_error(&e);
        std::process::exit(1);
    }
}
