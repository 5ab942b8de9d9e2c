pub mod api;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod server;
pub mod snapshot;
pub mod webhook;

use cli::output::print_error;
use error::AppError;
use tracing_subscriber::EnvFilter;

pub async fn run(cli_args: cli::Cli) -> i32 {
    init_tracing(cli_args.debug);

    let result = dispatch(cli_args).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

/// Logs go to stderr so command output on stdout stays parseable.
/// `RUST_LOG` overrides the level picked from the debug flag.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "plexhue=debug,tower_http=debug"
    } else {
        "plexhue=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(cli_args: cli::Cli) -> Result<(), AppError> {
    match cli_args.command {
        cli::Commands::Serve(args) => cli::serve::handle(&cli_args.bridge, &args).await,
        cli::Commands::Pair { attempts } => cli::pair::handle(&cli_args.bridge, attempts).await,
        cli::Commands::Scene(cmd) => cli::scene::handle(&cmd, &cli_args.bridge).await,
    }
}
