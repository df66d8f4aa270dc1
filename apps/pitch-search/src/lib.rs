pub mod render;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use pitch_service::{ControllerConfig, Providers, QueryController, SharedCatalog};

#[derive(Debug, Parser)]
#[command(
	version = pitch_cli::VERSION,
	rename_all = "kebab",
	styles = pitch_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// JSON array of venues served by the local source.
	#[arg(long, value_name = "FILE")]
	pub catalog: Option<PathBuf>,
	#[arg(long, value_name = "MS", value_parser = pitch_cli::parse_positive_millis)]
	pub debounce_ms: Option<u64>,
	/// Runs a single query, prints the settled state as JSON and exits.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = pitch_config::load(&args.config)?;
	init_tracing(&config)?;
	let catalog = load_catalog(args.catalog.as_deref())?;
	let providers = Providers::from_config(&config, catalog.clone())?;
	let mut cfg = ControllerConfig::from_search(&config.search);

	if let Some(debounce_ms) = args.debounce_ms {
		cfg.debounce = Duration::from_millis(debounce_ms);
	}

	tracing::info!(
		venues = catalog.len(),
		remote = config.remote.api_base.as_deref().unwrap_or("<unset>"),
		debounce = ?cfg.debounce,
		"Search controller ready."
	);

	let controller = QueryController::new(providers, cfg);

	match args.query {
		Some(text) => run_once(controller, &text).await,
		None => run_interactive(controller).await,
	}
}

async fn run_once(mut controller: QueryController, text: &str) -> color_eyre::Result<()> {
	controller.set_query(text);
	controller.search_now();
	controller.settle().await;

	println!("{}", serde_json::to_string_pretty(&controller.state())?);

	Ok(())
}

/// Each stdin line replaces the query text. `:clear` empties it, `:now` skips the debounce.
async fn run_interactive(controller: QueryController) -> color_eyre::Result<()> {
	let handle = controller.spawn();
	let mut updates = handle.subscribe();
	let mut lines = BufReader::new(io::stdin()).lines();

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else {
					break;
				};
				let sent = if line.trim() == ":clear" {
					handle.clear()
				} else if line.trim() == ":now" {
					handle.search_now()
				} else {
					handle.set_query(line)
				};

				if !sent {
					return Err(eyre::eyre!("Search controller stopped unexpectedly."));
				}
			},
			changed = updates.changed() => {
				if changed.is_err() {
					break;
				}

				let state = updates.borrow_and_update().clone();

				if let Some(frame) = render::render(&state) {
					println!("{frame}");
				}
			},
		}
	}

	handle.shutdown().await;

	Ok(())
}

fn load_catalog(path: Option<&std::path::Path>) -> color_eyre::Result<SharedCatalog> {
	let Some(path) = path else {
		return Ok(SharedCatalog::default());
	};
	let raw = std::fs::read_to_string(path)?;

	Ok(SharedCatalog::from_json(&raw)?)
}

fn init_tracing(config: &pitch_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	Ok(())
}
