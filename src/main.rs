//! Factory Planner - Command Line Interface
//!
//! Prints the facilities needed to produce an item at a given rate.
//! Run with `--help` to see all available options.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use factory_planner::{
    data::{load_tables, COSTS_FILE, THROUGHPUT_FILE},
    display::display_results,
    logging,
    resolver::{compute_resource_requirements, ResolveOptions, DEFAULT_MAX_DEPTH},
};

/// Command-line arguments for the planner.
#[derive(Parser, Debug)]
#[command(name = "factory-planner")]
#[command(author, version, about = "Compute the facilities needed to sustain a production rate", long_about = None)]
struct Args {
    /// Product to build, e.g. "Electronic Circuit" (case-insensitive)
    product: String,

    /// Units of the product created per second
    rate: f64,

    /// Directory holding outputs.csv and costs.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the throughput table (overrides --data-dir)
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// Path to the recipe table (overrides --data-dir)
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Round each branch separately instead of pooling shared intermediates
    #[arg(long, default_value = "false")]
    unpooled: bool,

    /// Maximum recipe nesting before giving up (0 disables the check)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            pool: !self.unpooled,
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let outputs = args
        .outputs
        .clone()
        .unwrap_or_else(|| args.data_dir.join(THROUGHPUT_FILE));
    let costs = args
        .costs
        .clone()
        .unwrap_or_else(|| args.data_dir.join(COSTS_FILE));

    let (throughputs, recipes) = load_tables(&outputs, &costs).with_context(|| {
        format!(
            "failed to load tables from {} and {}",
            outputs.display(),
            costs.display()
        )
    })?;

    let resources = compute_resource_requirements(
        &args.product,
        args.rate,
        &throughputs,
        &recipes,
        &args.resolve_options(),
    )
    .with_context(|| format!("failed to resolve '{}'", args.product))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
    } else {
        display_results(&args.product, args.rate, &resources);
    }

    Ok(())
}
