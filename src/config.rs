//! Layered configuration.
//!
//! Precedence, lowest to highest: built-in defaults, optional YAML file
//! (`--config` / `CONFIG_FILE`, falling back to `./config.yaml` when
//! present), `CHATSHELL_`-prefixed environment variables (`__` separates
//! nesting, e.g. `CHATSHELL_SERVER__PORT=8000`), then explicit CLI flags.

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Host to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the upstream chat backend
    #[arg(long = "upstream-url", env = "UPSTREAM_BASE_URL")]
    pub upstream_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the external chat backend, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Title shown in the page and the widget header.
    pub title: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", "http://127.0.0.1:5000")?
            .set_default("ui.title", "Chat")?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if std::path::Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml"));
        }

        builder = builder.add_source(
            Environment::with_prefix("CHATSHELL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(upstream) = cli.upstream_url {
            builder = builder.set_override("upstream.base_url", upstream)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        Url::parse(&cfg.upstream.base_url).map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid upstream.base_url `{}`: {e}",
                cfg.upstream.base_url
            ))
        })?;

        Ok(cfg)
    }
}
