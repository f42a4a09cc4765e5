//! Server configuration
//!
//! Settings come from an optional YAML file; every field has a default so
//! an empty (or absent) file yields a working server. The file chooses the
//! interface through `server.host`; the port always comes from the command
//! line.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "cgilite")]
#[command(about = "Minimal HTTP/1.0 server for static files and CGI-like programs")]
#[command(version)]
pub struct Cli {
    /// TCP port to listen on (1024-65535)
    #[arg(value_parser = clap::value_parser!(u16).range(1024..))]
    pub port: u16,

    /// Path to a YAML configuration file
    #[arg(short, long, env = "HTTPD_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub cgi: CgiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, combined with `port` into the listen address
    pub host: String,
    /// Overwritten by the command-line port in [`Config::load`]
    pub port: u16,
    /// Pending-connection queue depth passed to `listen(2)`
    pub backlog: u32,
    /// Upper bound on connections handled at the same time
    pub max_connections: usize,
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CgiConfig {
    pub root: PathBuf,
    /// Bytes of program output kept; the rest is discarded
    pub capture_limit: usize,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backlog: 10,
            max_connections: 256,
            read_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port`, with IPv6 literals bracketed.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Default for CgiConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./cgi-like"),
            capture_limit: 1024,
            timeout_secs: 30,
        }
    }
}

impl CgiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Builds the effective configuration from parsed arguments.
    ///
    /// The file (if any) is read first, then the port from the command line
    /// replaces `server.port`. `server.host` from the file is kept.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let cfg = cfg.with_port(cli.port);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.server.max_connections > 0,
            "server.max_connections must be at least 1"
        );
        anyhow::ensure!(self.cgi.capture_limit > 0, "cgi.capture_limit must be at least 1");
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct, treat it as all-defaults
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}
