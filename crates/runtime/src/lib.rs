mod config;
pub mod logging;
mod pluginconf;

pub use config::{
    CONFIG_ENV, PROGRAM_LOG_LEVEL, PROGRAM_NAME, default_config_path, default_socket_path,
    filemgr_dir,
};
pub use pluginconf::{ConfigFile, ConfigSource, PluginConfig};

pub use logging::init;
