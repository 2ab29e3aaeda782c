#![forbid(unsafe_code)]

//! folio demo binary entry point.

use folio_demo::{app, cli, logging};

fn main() {
    logging::init();
    let opts = cli::Opts::parse();
    if let Err(e) = app::run(&opts) {
        tracing::error!(error = %e, "render failed");
        eprintln!("folio-demo: {e}");
        std::process::exit(1);
    }
}
