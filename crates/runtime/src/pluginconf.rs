use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

/// Prefix of plugin settings in the agent configuration file.
const PLUGIN_PREFIX: &str = "plugin.";

/// Plugin settings, keyed without the `plugin.` prefix.
///
/// The file format is one `plugin.<key> = <value>` per line; blank lines,
/// `#` comments and non-plugin settings are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    values: HashMap<String, String>,
}

impl PluginConfig {
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!("[config] ignoring line {}: no '='", lineno + 1);
                continue;
            };

            if let Some(name) = key.trim().strip_prefix(PLUGIN_PREFIX) {
                values.insert(name.to_owned(), value.trim().to_owned());
            }
        }

        Self { values }
    }

    /// Read and parse `path`. A missing file is an empty configuration.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Where actions read their configuration from, once per call.
pub trait ConfigSource: Send + Sync {
    fn snapshot(&self) -> PluginConfig;
}

impl ConfigSource for PluginConfig {
    fn snapshot(&self) -> PluginConfig {
        self.clone()
    }
}

/// A configuration file re-read on every snapshot.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for ConfigFile {
    fn snapshot(&self) -> PluginConfig {
        match PluginConfig::load(&self.path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to read plugin config at {}: {e}",
                    self.path.display()
                );
                PluginConfig::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "pluginconf_tests.rs"]
mod tests;
