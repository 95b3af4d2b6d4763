use std::sync::Arc;

mod config;
mod rpc;

use config::DaemonConfig;
use filemgr_agent::Agent;
use filemgr_runtime::logging;

use log::info;

fn main() -> anyhow::Result<()> {
    let config = DaemonConfig::from_env()?;

    match &config.log_file {
        Some(path) => logging::init_with_file(path)?,
        None => {
            logging::init().ok();
        }
    }

    info!(
        "Starting filemgr daemon: socket={}, config={}",
        config.socket_path.display(),
        config.config_path.display(),
    );

    let agent = Arc::new(Agent::local(&config.config_path));
    rpc::run_rpc_server(&config.socket_path, agent)
}
