// src/infra/paths.rs — Config and data locations
//
// SYNAPSE_HOME, when set, holds both config and data. Otherwise config lives
// in ~/.synapse/ and data in the platform data dir (XDG_DATA_HOME/synapse).

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn synapse_home() -> Option<PathBuf> {
    std::env::var_os("SYNAPSE_HOME").map(PathBuf::from)
}

/// Home directory, falling back to the working directory when the platform
/// cannot report one (e.g. minimal containers).
pub fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $SYNAPSE_HOME/ or ~/.synapse/
pub fn config_dir() -> PathBuf {
    if let Some(home) = synapse_home() {
        return home;
    }
    dirs_home().join(".synapse")
}

/// Data directory: $SYNAPSE_HOME/data/ or ~/.local/share/synapse/
pub fn data_dir() -> PathBuf {
    if let Some(home) = synapse_home() {
        return home.join("data");
    }
    ProjectDirs::from("", "", "synapse")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().join("data"))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default database path (SYNAPSE_DB_PATH overrides).
pub fn db_path() -> PathBuf {
    if let Some(p) = std::env::var_os("SYNAPSE_DB_PATH") {
        return PathBuf::from(p);
    }
    data_dir().join("synapse.db")
}
