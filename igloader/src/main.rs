use clap::Parser;
use igloader::cli::{parse_exit_code, run, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "igloader=info,igloader_core=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help goes to stdout, usage errors to stderr.
            let _ = e.print();
            std::process::exit(parse_exit_code(e.kind()));
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("CLI arguments parsed, invoking run");

    match run(cli).await {
        Ok(_) => {
            println!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
