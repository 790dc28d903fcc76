//! Resolves the per-user `.riskscope` directory tree.
//!
//! Config and logs live under one root in the OS config directory. Setting
//! `RISKSCOPE_CONFIG_HOME` relocates the root, which keeps tests and portable
//! installs away from the real user profile.

use std::{fs, io, path::PathBuf};

use directories::BaseDirs;
use thiserror::Error;

pub const APP_DIR_NAME: &str = ".riskscope";
const CONFIG_HOME_VAR: &str = "RISKSCOPE_CONFIG_HOME";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("no config directory available for this user")]
    NoBaseDir,
    #[error("creating {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// The `.riskscope` root, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(base_dir()?.join(APP_DIR_NAME))
}

/// The log directory under the root, created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn base_dir() -> Result<PathBuf, AppDirError> {
    if let Some(test_base) = test_override::get() {
        return Ok(test_base);
    }
    if let Some(home) = std::env::var_os(CONFIG_HOME_VAR) {
        return Ok(PathBuf::from(home));
    }
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(AppDirError::NoBaseDir)
}

#[cfg(not(test))]
mod test_override {
    use std::path::PathBuf;

    pub(super) fn get() -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod test_override {
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
    };

    static BASE: Mutex<Option<PathBuf>> = Mutex::new(None);

    pub(super) fn get() -> Option<PathBuf> {
        BASE.lock().expect("test base mutex poisoned").clone()
    }

    /// Redirects the base directory until dropped.
    pub(super) struct BaseGuard;

    impl BaseGuard {
        pub(super) fn set(path: &Path) -> Self {
            *BASE.lock().expect("test base mutex poisoned") = Some(path.to_path_buf());
            Self
        }
    }

    impl Drop for BaseGuard {
        fn drop(&mut self) {
            *BASE.lock().expect("test base mutex poisoned") = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_override::BaseGuard;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn app_root_lives_under_override_base() {
        let base = tempdir().unwrap();
        let _guard = BaseGuard::set(base.path());
        let root = app_root_dir().unwrap();
        assert_eq!(root, base.path().join(APP_DIR_NAME));
        assert!(root.is_dir());
    }

    #[test]
    fn logs_dir_is_created_inside_root() {
        let base = tempdir().unwrap();
        let _guard = BaseGuard::set(base.path());
        let logs = logs_dir().unwrap();
        assert_eq!(logs, base.path().join(APP_DIR_NAME).join("logs"));
        assert!(logs.is_dir());
    }
}
