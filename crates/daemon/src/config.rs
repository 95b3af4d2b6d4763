use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use filemgr_runtime::{default_config_path, default_socket_path};

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    // Unix domain socket path
    pub socket_path: PathBuf,
    // Plugin configuration, re-read for every action
    pub config_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(name = "filemgr-daemon", about = "File manager agent daemon")]
pub struct Cli {
    /// Path to Unix domain socket (optional override)
    #[arg(long)]
    pub socket_path: Option<PathBuf>,

    /// Plugin configuration file (optional override)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append log lines to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl DaemonConfig {
    pub fn from_args(args: &Cli) -> Result<Self> {
        let socket_path = args.socket_path.clone().unwrap_or_else(default_socket_path);
        let config_path = args.config.clone().unwrap_or_else(default_config_path);

        Ok(Self {
            socket_path,
            config_path,
            log_file: args.log_file.clone(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let args = Cli::parse();
        Self::from_args(&args)
    }
}
