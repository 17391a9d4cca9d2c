use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = newslens_ask::Args::parse();

	newslens_ask::run(args).await
}
