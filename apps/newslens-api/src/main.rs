use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = newslens_api::Args::parse();

	newslens_api::run(args).await
}
