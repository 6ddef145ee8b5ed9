//! XDG Base Directory paths for accreditor.
//!
//! The server and CLI resolve the same locations on every platform so a
//! database created by `accreditor serve` is found again by `accreditor list`.

use std::path::PathBuf;

const APP_DIR: &str = "accreditor";

/// Get the accreditor config directory.
///
/// Returns `$XDG_CONFIG_HOME/accreditor` if set, otherwise `~/.config/accreditor`.
///
/// # Examples
///
/// ```
/// use accreditor_paths::config_dir;
///
/// let config = config_dir().join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the accreditor data directory.
///
/// Returns `$XDG_DATA_HOME/accreditor` if set, otherwise `~/.local/share/accreditor`.
/// The evaluation database lives here unless configured otherwise.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Default location of the SQLite evaluation database.
pub fn default_database_path() -> PathBuf {
    data_dir().join("accreditor.db")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        PathBuf::from(base).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_relative).join(APP_DIR)
    } else {
        PathBuf::from(home_relative).join(APP_DIR)
    }
}
