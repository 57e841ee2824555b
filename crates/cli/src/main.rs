//! selko command line front end.
//!
//! - `selko check [FILE]` analyzes a file (or stdin) once and prints the
//!   resulting highlights and metrics.
//! - `selko watch` appends stdin lines to a live document as user edits and
//!   lets the sync engine debounce, analyze and annotate it.

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use selko_client::{AnnotationClient, HttpAnnotationClient, HttpClientConfig};
use selko_config::Config;
use selko_primitives::{Document, EditOrigin, MetricsSnapshot};
use selko_sync::{SharedDocument, SyncConfig, SyncController, reconcile, to_delta};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "selko", version)]
#[command(about = "Highlight passive voice, adverbs and difficult sentences")]
struct Args {
	/// Config file (defaults to the user config directory)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Analysis service endpoint
	#[arg(long, value_name = "URL", global = true)]
	endpoint: Option<String>,

	/// More logging (-v debug, -vv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Analyze a file once
	Check {
		/// Input file; stdin when omitted
		file: Option<PathBuf>,
	},
	/// Annotate stdin incrementally, line by line
	Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let mut config = Config::resolve(args.config.as_deref()).context("loading configuration")?;
	if let Some(endpoint) = args.endpoint {
		config.service.endpoint = endpoint;
		config.validate().context("--endpoint")?;
	}

	init_tracing(&config, args.verbose)?;

	let client = HttpAnnotationClient::new(
		HttpClientConfig::new(config.endpoint()?.as_str())?.with_timeout(config.timeout()),
	)?;
	info!(endpoint = %client.endpoint(), "selko.start");

	match args.command {
		Command::Check { file } => check(&client, file).await,
		Command::Watch => watch(client, &config).await,
	}
}

fn init_tracing(config: &Config, verbose: u8) -> anyhow::Result<()> {
	let directive = match verbose {
		0 => config.log.filter.as_str(),
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(directive))
		.with_context(|| format!("invalid log filter {directive:?}"))?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
	Ok(())
}

async fn check(client: &impl AnnotationClient, file: Option<PathBuf>) -> anyhow::Result<()> {
	let text = match file {
		Some(path) => tokio::fs::read_to_string(&path)
			.await
			.with_context(|| format!("reading {}", path.display()))?,
		None => {
			let mut buf = String::new();
			tokio::io::stdin().read_to_string(&mut buf).await.context("reading stdin")?;
			buf
		}
	};

	let analysis = client.fetch_annotations(&text).await?;
	let mut doc = Document::from_text(&text);
	let delta = to_delta(&reconcile(&analysis.annotations, doc.len_chars()));
	doc.apply(&delta)?;

	for line in render::highlights(&doc) {
		println!("{line}");
	}
	println!("{}", render::metrics(&analysis.metrics));
	Ok(())
}

async fn watch(client: HttpAnnotationClient, config: &Config) -> anyhow::Result<()> {
	let doc = SharedDocument::default();
	let events = doc.subscribe();
	let sink = Arc::new(|m: &MetricsSnapshot| println!("{}", render::metrics(m)));
	let handle = SyncController::new(
		Arc::new(client),
		doc.clone(),
		sink,
		SyncConfig {
			debounce: config.debounce(),
		},
	)
	.spawn(events);

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut sent = 0;
	loop {
		tokio::select! {
			line = lines.next_line() => match line.context("reading stdin")? {
				Some(line) => {
					doc.append(&format!("{line}\n"), EditOrigin::User)?;
					sent += 1;
				}
				None => break,
			},
			_ = tokio::signal::ctrl_c() => {
				info!("selko.interrupted");
				sent = 0;
				break;
			}
		}
	}

	// Let the last cycle finish before tearing down.
	if sent > 0 {
		let mut status = handle.subscribe_status();
		status
			.wait_for(|s| s.stats.edits >= sent && s.phase.is_quiescent())
			.await
			.context("sync session ended early")?;
	}

	let stats = handle.shutdown().await;
	info!(
		applied = stats.applied,
		stale = stats.stale,
		cancelled = stats.cancelled,
		failed = stats.failed,
		"selko.done"
	);
	for line in doc.with(render::highlights) {
		println!("{line}");
	}
	Ok(())
}
