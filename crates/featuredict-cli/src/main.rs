//! featuredict: find OpenStreetMap presets from the terminal
//!
//! Usage examples
//! --------------
//!
//! - Which preset describes these tags?
//!   $ featuredict --presets data/presets tags shop=bakery
//!   $ featuredict --presets data/presets --brands data/brands tags shop=bakery name=Ditsch -c DE
//!
//! - Search by name or term, in German with unlocalized fallback
//!   $ featuredict --presets data/presets term Bäck -l de -n 10
//!
//! - Look up by id
//!   $ featuredict --presets data/presets id amenity/bank --json
//!
//! - Index statistics
//!   $ featuredict --presets data/presets stats -l de
//!
//! Logging goes to stderr. `RUST_LOG` overrides the level chosen with `-v`.
use clap::Parser;
use featuredict_cli::args::CliArgs;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let stdout = std::io::stdout();
    featuredict_cli::run(args, &mut stdout.lock())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
