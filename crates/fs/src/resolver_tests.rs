use super::*;

fn config_with(touch_file: Option<&str>) -> PluginConfig {
    let mut config = PluginConfig::default();
    if let Some(v) = touch_file {
        config.set(TOUCH_FILE_KEY, v);
    }
    config
}

#[test]
fn resolve_follows_precedence() {
    let cases: &[(Option<&str>, Option<&str>, &str)] = &[
        (Some("/tmp/foo"), None, "/tmp/foo"),
        (Some("/tmp/foo"), Some("/tmp/foo2"), "/tmp/foo"),
        (None, Some("/tmp/foo2"), "/tmp/foo2"),
        (Some(""), Some("/tmp/foo2"), "/tmp/foo2"),
        (None, None, DEFAULT_TOUCH_FILE),
        (Some(""), None, DEFAULT_TOUCH_FILE),
        (None, Some(""), DEFAULT_TOUCH_FILE),
    ];

    for (explicit, configured, expected) in cases {
        let config = config_with(*configured);
        assert_eq!(
            resolve(*explicit, &config),
            *expected,
            "explicit={:?} configured={:?}",
            explicit,
            configured
        );
    }
}

#[test]
fn fallback_is_the_mcollective_touch_file() {
    assert_eq!(
        resolve(None, &PluginConfig::default()),
        "/var/run/mcollective.plugin.filemgr.touch"
    );
}
