use clap::Parser;
use router_tabs::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    // Routes log::info!() etc. to the debug log file; RUST_LOG also mirrors to stderr.
    // --log-level takes precedence over RUST_LOG.
    router_tabs::debug::init_log_bridge(cli.log_level);

    log::info!("Starting router-tabs {}", router_tabs::VERSION);

    if let Err(e) = cli::run(cli) {
        eprintln!("router-tabs: error: {e:#}");
        std::process::exit(1);
    }
}
