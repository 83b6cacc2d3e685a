//! Script (`do.it`) discovery and loading.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in each directory.
pub const SCRIPT_NAME: &str = "do.it";

/// Error message when no script is found.
pub const NO_SCRIPT_ERROR: &str =
    "Error: No do.it file found. Create ./do.it or pass --file <PATH>.";

thread_local! {
    static CUSTOM_SCRIPT_PATH: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Set a custom script path (file or directory) for the current thread
pub fn set_custom_script_path(path: Option<PathBuf>) {
    CUSTOM_SCRIPT_PATH.with(|p| {
        *p.borrow_mut() = path;
    });
}

fn get_custom_script_path() -> Option<PathBuf> {
    CUSTOM_SCRIPT_PATH.with(|p| p.borrow().clone())
}

/// Get the user's home directory in a cross-platform way.
#[must_use]
pub fn get_home_dir() -> Option<PathBuf> {
    // Unix-like systems
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home));
    }

    // Windows
    if let Some(userprofile) = std::env::var_os("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }

    // Older Windows
    if let (Some(homedrive), Some(homepath)) =
        (std::env::var_os("HOMEDRIVE"), std::env::var_os("HOMEPATH"))
    {
        let mut path = PathBuf::from(homedrive);
        path.push(homepath);
        return Some(path);
    }

    None
}

/// Resolve an explicit `--file` argument: a file, or a directory holding
/// `do.it`.
#[must_use]
pub fn resolve_path(path: &Path) -> Option<PathBuf> {
    let script_path = if path.is_dir() {
        path.join(SCRIPT_NAME)
    } else {
        path.to_path_buf()
    };
    script_path.is_file().then_some(script_path)
}

/// Look for `do.it` in `start` and its parents, stopping after `home` or
/// the filesystem root.
#[must_use]
pub fn search_upwards(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut current_dir = start;
    loop {
        let script_path = current_dir.join(SCRIPT_NAME);
        if script_path.is_file() {
            return Some(script_path);
        }

        if home.is_some_and(|home| current_dir == home) {
            return None;
        }

        current_dir = current_dir.parent()?;
    }
}

/// Find the script: the custom path if set, otherwise search upwards from
/// the current directory.
#[must_use]
pub fn find_script_path() -> Option<PathBuf> {
    if let Some(custom_path) = get_custom_script_path() {
        return resolve_path(&custom_path);
    }

    let current_dir = std::env::current_dir().ok()?;
    let home_dir = get_home_dir();
    search_upwards(&current_dir, home_dir.as_deref())
}

/// Find and read the script. An empty file still counts as found.
#[must_use]
pub fn load_script() -> Option<(PathBuf, String)> {
    let path = find_script_path()?;
    match fs::read_to_string(&path) {
        Ok(content) => Some((path, content)),
        Err(e) => {
            log::warn!("cannot read {}: {e}", path.display());
            None
        }
    }
}
