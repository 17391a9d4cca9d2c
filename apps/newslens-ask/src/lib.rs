use std::{
	io::{self, Write},
	sync::Arc,
};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use newslens_cli::ConfigArgs;
use newslens_service::{Error, NewsService, SearchRequest, SearchResponse};
use newslens_storage::graph::Neo4jStore;

const EXIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Parser)]
#[command(
	version = newslens_cli::VERSION,
	rename_all = "kebab",
	styles = newslens_cli::styles(),
	about = "Ask questions about the news graph from a terminal.",
)]
pub struct Args {
	#[command(flatten)]
	pub config: ConfigArgs,
	/// Answer a single question and exit.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
	/// Print the raw response as JSON instead of formatted text.
	#[arg(long)]
	pub json: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = newslens_config::load(&args.config.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

	let service = build_service(config).await?;

	if let Some(query) = args.query {
		return ask(&service, &query, args.json).await;
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	loop {
		print!("질문> ");
		io::stdout().flush()?;

		let Some(line) = lines.next_line().await? else {
			break;
		};
		let line = line.trim();

		if line.is_empty() {
			continue;
		}
		if is_exit(line) {
			break;
		}
		// Keep the loop alive after a failed question.
		if let Err(err) = ask(&service, line, args.json).await {
			eprintln!("{err}");
		}
	}

	Ok(())
}

async fn build_service(config: newslens_config::Config) -> color_eyre::Result<NewsService> {
	let store = Neo4jStore::connect(&config.storage.neo4j).await?;
	let schema = match store.schema().await {
		Ok(schema) => schema.render(),
		Err(err) => {
			tracing::warn!(error = %err, "Failed to read graph schema.");

			String::new()
		},
	};

	Ok(NewsService::new(config, Arc::new(store), schema))
}

async fn ask(service: &NewsService, query: &str, json: bool) -> color_eyre::Result<()> {
	match service.search(SearchRequest { query: query.to_string() }).await {
		Ok(response) if json => println!("{}", serde_json::to_string_pretty(&response)?),
		Ok(response) => print!("{}", render(&response)),
		Err(Error::SynthesisUnavailable { .. }) => println!("Search failed, try again."),
		Err(err) => return Err(err.into()),
	}

	Ok(())
}

pub fn is_exit(line: &str) -> bool {
	EXIT_WORDS.contains(&line.trim().to_lowercase().as_str())
}

/// Formats a response for the terminal: sections with `[id]` markers, then the source list.
pub fn render(response: &SearchResponse) -> String {
	let mut out = String::new();

	for section in &response.sections {
		out.push_str(&format!("\n## {}\n{}", section.title, section.content));

		if !section.source_ids.is_empty() {
			let ids: Vec<String> = section.source_ids.iter().map(|id| format!("[{id}]")).collect();

			out.push(' ');
			out.push_str(&ids.join(""));
		}

		out.push('\n');
	}

	if !response.sources.is_empty() {
		out.push_str("\n출처:\n");

		for source in &response.sources {
			out.push_str(&format!(
				"[{}] {} {} ({}, {}, {})\n",
				source.id, source.icon, source.title, source.short_name, source.category, source.date
			));

			if !source.url.is_empty() {
				out.push_str(&format!("    {}\n", source.url));
			}
			if !source.summary.is_empty() {
				out.push_str(&format!("    {}\n", source.summary));
			}
		}
	}

	out
}
