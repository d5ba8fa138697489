use std::env as stdenv;
use std::io;
use std::path::PathBuf;

/// The interpreter's view of the process environment.
///
/// Only the working directory is tracked explicitly; everything else (HOME,
/// PATH, the variables inherited by children) is read straight from the
/// process environment, so external commands inherit it without copying.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Absolute path of the current working directory. Kept in sync with the
    /// real process working directory by the `cd` builtin.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current working directory.
    ///
    /// Fails when the working directory cannot be retrieved, which is the
    /// one place that failure can surface.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            current_dir: stdenv::current_dir()?,
        })
    }

    /// Value of the `HOME` environment variable, if set.
    pub fn home(&self) -> Option<PathBuf> {
        stdenv::var_os("HOME").map(PathBuf::from)
    }

    /// Value of the `PATH` environment variable, if set.
    pub fn search_paths(&self) -> Option<std::ffi::OsString> {
        stdenv::var_os("PATH")
    }
}
