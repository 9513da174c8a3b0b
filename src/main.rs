use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use stagekit::replay::{self, Script};
use stagekit::{init_logging, Config, SettingsPersistence, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "stagekit")]
#[command(about = "Replay recorded canvas and timeline gestures headlessly")]
struct Cli {
    /// Gesture script (JSON)
    script: PathBuf,

    /// Configuration file (.toml or .json); defaults to the user config
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match SettingsPersistence::default_path() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!("{}; using default configuration", err);
                return Ok(Config::default());
            }
        },
    };
    let settings = SettingsPersistence::load_or_default(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Ok(settings.config().clone())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!("stagekit {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;
    let script = Script::load(&cli.script)?;
    let output = replay::run(&script, &config)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
