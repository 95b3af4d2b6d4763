use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use filemgr_agent::Agent;
use filemgr_protocol::codec::{read_message, write_message};
use filemgr_protocol::{AgentRequest, Reply};
use filemgr_runtime::{default_config_path, default_socket_path};
use log::debug;

#[derive(Debug, Args)]
pub struct TransportOptions {
    /// Path to the daemon's Unix domain socket
    #[arg(long, global = true)]
    pub socket_path: Option<PathBuf>,

    /// Run the action in-process instead of through the daemon
    #[arg(long, global = true)]
    pub local: bool,

    /// Plugin configuration file used with --local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl TransportOptions {
    pub fn send(&self, request: &AgentRequest) -> anyhow::Result<Reply> {
        if self.local {
            let config = self.config.clone().unwrap_or_else(default_config_path);
            debug!("Running {} locally with config {}", request.action(), config.display());
            return Ok(Agent::local(config).handle(request));
        }

        let socket_path = self.socket_path.clone().unwrap_or_else(default_socket_path);

        let mut stream = UnixStream::connect(&socket_path).with_context(|| {
            format!(
                "failed to connect to filemgr daemon at {}",
                socket_path.display()
            )
        })?;

        write_message(&mut stream, request)?;
        let reply: Reply = read_message(&mut stream)?;
        Ok(reply)
    }
}
