use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "filemgr";
pub const PROGRAM_LOG_LEVEL: &str = "FILEMGR_LOG_LEVEL";
/// Overrides the plugin configuration file location.
pub const CONFIG_ENV: &str = "FILEMGR_CONFIG";

const SOCKET_FILE_NAME: &str = "agent.sock";
const CONFIG_FILE_NAME: &str = "agent.cfg";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var) {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Per-user runtime directory holding the daemon socket.
pub fn filemgr_dir() -> PathBuf {
    xdg_or_home("XDG_CACHE_HOME", ".cache").join(PROGRAM_NAME)
}

pub fn default_socket_path() -> PathBuf {
    filemgr_dir().join(SOCKET_FILE_NAME)
}

/// `$FILEMGR_CONFIG`, else `<config dir>/filemgr/agent.cfg`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }

    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME")
        && !dir.is_empty()
    {
        return PathBuf::from(dir).join(PROGRAM_NAME).join(CONFIG_FILE_NAME);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROGRAM_NAME)
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
