pub mod types;
pub mod config;
pub mod data;
pub mod layout;
pub mod palette;
pub mod render;
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the demand map layer from aggregated records
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Aggregated demand records (.json or .csv)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE", default_value = "layer.json")]
        output: PathBuf,
    },
    /// Serve the computed layout over HTTP
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Aggregated demand records (.json or .csv)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config, input, output } => {
            println!("Generating map layer with config: {:?}", config);
            let app_config = config::AppConfig::load_or_default(config)?;

            // 1. Load Records
            let records = data::load_records(input)?;

            // 2. Lay Out Points
            let table = layout::CoordinateTable::from_config(&app_config);
            let points = layout::layout(&records, &table);
            println!("Placed {} points", points.len());

            // 3. Build Markers + Legend
            let palette = palette::Palette::from_config(&app_config.palette);
            let layer = render::build_layer(&app_config, &points, &palette);

            // 4. Write Layer
            render::write_layer(output, &layer)?;

            println!("Generation complete!");
        }
        Commands::Serve { config, input } => {
            println!("Serving map layout with config: {:?}", config);
            let app_config = config::AppConfig::load_or_default(config)?;

            let records = data::load_records(input)?;

            // The layout is computed once up front; the API serves the
            // same immutable layer for every request.
            let table = layout::CoordinateTable::from_config(&app_config);
            let points = layout::layout(&records, &table);
            println!("Placed {} points", points.len());

            let palette = palette::Palette::from_config(&app_config.palette);
            let layer = render::build_layer(&app_config, &points, &palette);

            server::start_server(app_config, layer).await?;
        }
    }

    Ok(())
}
