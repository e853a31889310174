//! Command-line and environment configuration for the server binary.

use std::path::PathBuf;

use clap::Parser;
use murmur::BoardConfig;
use murmur_core::KeyPaths;

/// A minimal anonymous discussion board.
#[derive(Debug, Clone, Parser)]
#[command(name = "murmur", version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "MURMUR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "MURMUR_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file
    #[arg(long, env = "MURMUR_DATABASE", default_value = "murmur.db")]
    pub database: PathBuf,

    /// Author digest key file, created on first start
    #[arg(long, env = "MURMUR_AUTHOR_KEY", default_value = "author.key")]
    pub author_key: PathBuf,

    /// Ticket key file, created on first start
    #[arg(long, env = "MURMUR_TICKET_KEY", default_value = "ticket.key")]
    pub ticket_key: PathBuf,

    /// Directory served under /assets
    #[arg(long, env = "MURMUR_ASSETS_DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Site name shown in the header
    #[arg(long, env = "MURMUR_SITE_NAME")]
    pub site_name: Option<String>,

    /// Slogan shown under the site name
    #[arg(long, env = "MURMUR_SLOGAN")]
    pub slogan: Option<String>,
}

impl Cli {
    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Key file locations.
    pub fn key_paths(&self) -> KeyPaths {
        KeyPaths::new(&self.author_key, &self.ticket_key)
    }

    /// Board configuration, with defaults for anything not given.
    pub fn board_config(&self) -> BoardConfig {
        let defaults = BoardConfig::default();
        BoardConfig {
            site_name: self.site_name.clone().unwrap_or(defaults.site_name),
            slogan: self.slogan.clone().unwrap_or(defaults.slogan),
        }
    }
}
