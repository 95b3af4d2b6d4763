use super::*;
use serial_test::serial;

#[test]
#[serial]
fn config_env_overrides_default_location() {
    unsafe { std::env::set_var(CONFIG_ENV, "/etc/filemgr/custom.cfg") };
    assert_eq!(default_config_path(), PathBuf::from("/etc/filemgr/custom.cfg"));
    unsafe { std::env::remove_var(CONFIG_ENV) };
}

#[test]
#[serial]
fn xdg_config_home_is_used_when_no_override() {
    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::set_var("XDG_CONFIG_HOME", "/xdg/config");
    }

    assert_eq!(
        default_config_path(),
        PathBuf::from("/xdg/config/filemgr/agent.cfg")
    );

    unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
}

#[test]
#[serial]
fn socket_lives_under_cache_dir() {
    unsafe { std::env::set_var("XDG_CACHE_HOME", "/xdg/cache") };
    assert_eq!(
        default_socket_path(),
        PathBuf::from("/xdg/cache/filemgr/agent.sock")
    );
    unsafe { std::env::remove_var("XDG_CACHE_HOME") };
}
