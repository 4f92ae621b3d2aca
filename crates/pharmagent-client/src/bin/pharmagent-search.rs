//! Pharmagent search CLI: submits the search form once and prints the results area.
//!
//! Run with: cargo run -p pharmagent-client -- --molecule Metformin --disease oncology

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pharmagent_client::{ResultsArea, SearchForm, SubmitEvent, SubmitHandler};
use pharmagent_common::Config;

#[derive(Debug, Parser)]
#[command(name = "pharmagent-search", version, about = "Search molecules against a Pharmagent server")]
struct Args {
    /// Molecule name, sent as-is
    #[arg(short, long)]
    molecule: String,

    /// Disease area, sent as-is
    #[arg(short, long, default_value = "")]
    disease: String,

    /// Server origin; defaults to the configured client base URL
    #[arg(long, env = "PHARMAGENT_BASE_URL")]
    base_url: Option<String>,

    /// Print the results area as HTML instead of plain text
    #[arg(long)]
    html: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pharmagent_client=info,warn")),
        )
        .init();

    let base_url = args.base_url.unwrap_or(config.client.base_url);
    let handler = SubmitHandler::new(&base_url)?;

    let mut event = SubmitEvent::new();
    let form = SearchForm::new(args.molecule, args.disease);
    let mut area = ResultsArea::new();

    // The error line is already in the results area; only the exit code differs.
    let outcome = handler.handle(&mut event, &form, &mut area).await;

    if args.html {
        println!("{}", area.to_html()?);
    } else {
        println!("{}", area.text());
    }

    Ok(if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
