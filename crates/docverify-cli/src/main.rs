//! docverify CLI - verify documents against a verification endpoint.

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{normalize, schema, verify};

#[derive(Parser)]
#[command(name = "docverify")]
#[command(about = "Document verification CLI")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a document by its identifier
    Verify {
        /// Document identifier
        id: String,
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<String>,
        /// Verification endpoint (overrides the config file)
        #[arg(long)]
        endpoint: Option<String>,
        /// Query parameter carrying the identifier
        #[arg(long)]
        id_param: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a raw document offline and show its resolved fields
    Normalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<String>,
    },
    /// Show the merged field schema
    Schema {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Verify {
            id,
            config,
            endpoint,
            id_param,
            json,
        } => verify::run(id, config, endpoint, id_param, json),
        Commands::Normalize { input, config } => normalize::run(input, config),
        Commands::Schema { config } => schema::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
