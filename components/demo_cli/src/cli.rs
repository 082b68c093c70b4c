//! Command-line argument definitions.

use clap::Parser;

/// Command-line arguments for the eventide binary.
#[derive(Parser, Debug)]
#[command(
    name = "eventide",
    version,
    about = "Run the Eventide execution-order demonstrations"
)]
pub struct Cli {
    /// Demonstration to run
    #[arg(short, long)]
    pub demo: Option<String>,

    /// Run every demonstration in sequence
    #[arg(short, long)]
    pub all: bool,

    /// List available demonstrations
    #[arg(short, long)]
    pub list: bool,

    /// File read by the file demonstration
    #[arg(long, default_value = "Cargo.toml")]
    pub file: String,

    /// URL fetched by the network demonstrations
    #[arg(
        long,
        default_value = "https://mdn.github.io/learning-area/javascript/apis/fetching-data/can-store/products.json"
    )]
    pub url: String,
}
