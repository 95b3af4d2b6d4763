use filemgr_runtime::PluginConfig;

/// Plugin option naming the default target of touch/remove/status.
pub const TOUCH_FILE_KEY: &str = "filemgr.touch_file";

/// Target used when neither the request nor the configuration names one.
pub const DEFAULT_TOUCH_FILE: &str = "/var/run/mcollective.plugin.filemgr.touch";

/// Pick the effective target path.
///
/// An explicit, non-empty argument wins; then the configured
/// `filemgr.touch_file`; then [`DEFAULT_TOUCH_FILE`].
pub fn resolve(explicit: Option<&str>, config: &PluginConfig) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .or_else(|| config.get(TOUCH_FILE_KEY).filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_TOUCH_FILE)
        .to_owned()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
