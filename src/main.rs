use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = plexhue::cli::Cli::parse();
    let exit_code = plexhue::run(cli).await;
    std::process::exit(exit_code);
}
