#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use clap::Parser;
use snapdock_runtime::WindowConfig;

use crate::replay::{ReplayError, ReplayOptions, replay_to_writer};
use crate::script::ReplayScript;

#[derive(Debug, Parser)]
#[command(
    name = "snapdock-harness",
    about = "Replay a scripted snapdock window session and print JSON lines",
    version
)]
pub struct Cli {
    /// Replay script (JSON).
    pub script: PathBuf,

    /// Override the script's window config with a TOML file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit one record per animation tick.
    #[arg(long)]
    pub frames: bool,
}

pub fn run_from_env() -> Result<(), ReplayError> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<(), ReplayError> {
    let mut script = ReplayScript::from_path(&cli.script)?;
    if let Some(path) = &cli.config {
        script.config = WindowConfig::from_toml_file(path)?;
    }
    let options = ReplayOptions {
        emit_frames: cli.frames,
    };
    replay_to_writer(&script, options, io::stdout().lock())?;
    Ok(())
}
