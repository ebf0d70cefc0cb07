// src/infra/paths.rs — Config path management
//
// All paths respect the TASKDECK_HOME environment variable for isolation.
// When unset, config lives under ~/.taskdeck/.

use std::path::PathBuf;

/// Returns the TASKDECK_HOME override, if set.
fn taskdeck_home() -> Option<PathBuf> {
    std::env::var_os("TASKDECK_HOME").map(PathBuf::from)
}

/// Configuration directory: $TASKDECK_HOME/ or ~/.taskdeck/
pub fn config_dir() -> PathBuf {
    if let Some(home) = taskdeck_home() {
        return home;
    }
    dirs_home().join(".taskdeck")
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
