//! Platform locations for the client's files.
//!
//! Everything lives under one data directory, `complexapp` inside the
//! platform data dir (`~/.local/share/complexapp` on Linux). When the platform
//! reports none, the current directory is used.

use std::path::{Path, PathBuf};

/// Directory name below the platform data dir.
const APP_DIR: &str = "complexapp";

/// Returns the data directory.
///
/// # Examples
///
/// ```
/// use complexapp::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("complexapp"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default session file inside `data_dir`.
#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

/// Default configuration file inside `data_dir`.
#[must_use]
pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Default trace file inside `data_dir`.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join("complexapp-otlp.json")
}

/// Expands a leading `~` to the home directory.
///
/// # Examples
///
/// ```
/// use complexapp::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_the_data_dir() {
        let dir = Path::new("/data/complexapp");

        assert_eq!(session_file(dir), Path::new("/data/complexapp/session.json"));
        assert_eq!(config_file(dir), Path::new("/data/complexapp/config.toml"));
        assert_eq!(trace_file(dir), Path::new("/data/complexapp/complexapp-otlp.json"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/notes"), home.join("notes"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("relative/x"), PathBuf::from("relative/x"));
    }
}
