use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = pitch_search::Args::parse();
	pitch_search::run(args).await
}
