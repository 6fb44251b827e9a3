use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::commands::Command;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(
    name = "docdepot",
    about = "Upload documents to a local depot and browse their history"
)]
pub struct Cli {
    /// Directory holding `uploads/` and `history.json`
    #[arg(long, env = "DOCDEPOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Where downloaded documents are written
    #[arg(long, env = "DOCDEPOT_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "DOCDEPOT_LOG_FILE")]
    pub log_file: Option<String>,

    /// Run a single operation instead of the interactive UI
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("docdepot").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }
}

/// Effective locations: flags and environment first, then the config file,
/// then built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            download_dir: cli
                .download_dir
                .clone()
                .or(file.download_dir)
                .or_else(dirs::download_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
