use super::*;
use tempfile::tempdir;

#[test]
fn parse_keeps_only_plugin_settings() {
    let text = "\
# agent settings
libdir = /usr/libexec/mcollective
plugin.filemgr.touch_file = /tmp/foo2

  plugin.other.key=value with spaces  
garbage line
";

    let config = PluginConfig::parse(text);

    assert_eq!(config.len(), 2);
    assert_eq!(config.get("filemgr.touch_file"), Some("/tmp/foo2"));
    assert_eq!(config.get("other.key"), Some("value with spaces"));
    assert_eq!(config.get("libdir"), None);
}

#[test]
fn later_settings_override_earlier_ones() {
    let config = PluginConfig::parse("plugin.a = 1\nplugin.a = 2\n");
    assert_eq!(config.get("a"), Some("2"));
}

#[test]
fn value_may_contain_equals_sign() {
    let config = PluginConfig::parse("plugin.opts = a=b\n");
    assert_eq!(config.get("opts"), Some("a=b"));
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().expect("create temp dir");
    let config = PluginConfig::load(&dir.path().join("absent.cfg")).expect("load");
    assert!(config.is_empty());
}

#[test]
fn config_file_is_reread_on_every_snapshot() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("agent.cfg");
    let source = ConfigFile::new(&path);

    assert_eq!(source.snapshot().get("filemgr.touch_file"), None);

    fs::write(&path, "plugin.filemgr.touch_file = /tmp/first\n").expect("write config");
    assert_eq!(
        source.snapshot().get("filemgr.touch_file"),
        Some("/tmp/first")
    );

    fs::write(&path, "plugin.filemgr.touch_file = /tmp/second\n").expect("rewrite config");
    assert_eq!(
        source.snapshot().get("filemgr.touch_file"),
        Some("/tmp/second")
    );
}

#[test]
fn unreadable_config_path_falls_back_to_empty() {
    let dir = tempdir().expect("create temp dir");
    // A directory cannot be read as a file.
    let source = ConfigFile::new(dir.path());
    assert!(source.snapshot().is_empty());
}
