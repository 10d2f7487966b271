use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// API the hosted board talks to when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://todolistrp.onrender.com";

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Terminal to-do board for the tarefas REST API")]
pub struct Cli {
    /// Base URL of the tarefas API
    #[arg(long, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Run without the trash tab (for APIs without /tarefas/excluidas)
    #[arg(long, env = "TASKBOARD_NO_TRASH")]
    pub no_trash: bool,

    /// Write logs to this file
    #[arg(long, env = "TASKBOARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported API URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Validated settings for one run of the board.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub supports_trash: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let api_url = Url::parse(&cli.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: cli.api_url.clone(),
            source,
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_url.scheme().to_string()));
        }
        Ok(Config {
            api_url,
            supports_trash: !cli.no_trash,
        })
    }
}
