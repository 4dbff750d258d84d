//! Module for searching for onetouchd config files

use std::path::PathBuf;

use crate::constants::{PREFIX, SYSTEM_CONFIG_DIR};

/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/usr/share/onetouchd";
/// Name of the config file in each search directory
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Returns the base path for configuration data
pub fn get_base_path() -> PathBuf {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix(PREFIX) else {
        log::warn!("Unable to determine config base path. Using fallback path.");
        return PathBuf::from(FALLBACK_BASE_PATH);
    };

    // Get the data directories in preference order
    let data_dirs = base_dirs.get_data_dirs();
    for dir in data_dirs {
        if dir.exists() {
            return dir;
        }
    }

    log::warn!("Config base path not found. Using fallback path.");
    PathBuf::from(FALLBACK_BASE_PATH)
}

/// Returns the list of config file candidates in load order.
/// E.g. ["/etc/onetouchd/config.yaml", "/usr/share/onetouchd/config.yaml"]
pub fn get_config_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(SYSTEM_CONFIG_DIR).join(CONFIG_FILE_NAME),
        get_base_path().join(CONFIG_FILE_NAME),
        PathBuf::from("./rootfs/usr/share/onetouchd").join(CONFIG_FILE_NAME),
    ]
}

/// Returns the first config file that exists
pub fn find_config_file() -> Option<PathBuf> {
    get_config_paths().into_iter().find(|path| {
        log::trace!("Checking {path:?} for config");
        path.is_file()
    })
}
