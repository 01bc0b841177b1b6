#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout carries the JSON lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = snapdock_harness::run_from_env() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
