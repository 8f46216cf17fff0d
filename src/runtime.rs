//! Java runtime discovery and version probing
//!
//! The resolved runtime travels through the pipeline as a value; the process
//! environment is never mutated to make a particular JVM "current".

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use normpath::PathExt;

use crate::error::{LaunchError, Result};

/// Oldest Java major version ktlint runs on
const MIN_SUPPORTED_MAJOR: u32 = 8;
/// Majors at or above this lock down java.base reflection and need it opened
const ADD_OPENS_MAJOR: u32 = 17;

/// Installation-root override consumed ahead of the search path
pub const JAVA_HOME_ENV: &str = "JAVA_HOME";

/// A usable Java runtime
#[derive(Debug, Clone)]
pub struct Runtime {
    /// Resolved `java` executable
    pub java: PathBuf,
    /// Full version string as reported by `java -version`
    pub version: String,
    /// Major version number (legacy `1.x` scheme already mapped to `x`)
    pub major: u32,
}

impl Runtime {
    /// Whether the invocation needs `--add-opens` for ktlint's reflection
    pub fn needs_add_opens(&self) -> bool {
        self.major >= ADD_OPENS_MAJOR
    }
}

/// Locate a Java runtime and derive its version.
///
/// Preference order: `$JAVA_HOME/bin/java` when the variable is set and the
/// executable exists, else the first `java` on the search path. No candidate
/// at all is fatal, as is a candidate older than the supported minimum.
pub fn resolve() -> Result<Runtime> {
    let java = locate_java_from(std::env::var_os(JAVA_HOME_ENV).as_deref())
        .ok_or(LaunchError::RuntimeNotFound)?;
    let version = probe_version(&java)?;
    let major = parse_major(&version).ok_or_else(|| LaunchError::RuntimeProbeFailed {
        reason: format!("could not derive a major version from {version:?}"),
    })?;
    if major < MIN_SUPPORTED_MAJOR {
        return Err(LaunchError::HostIncompatible { version, major });
    }
    Ok(Runtime {
        java,
        version,
        major,
    })
}

fn locate_java_from(java_home: Option<&OsStr>) -> Option<PathBuf> {
    if let Some(home) = java_home {
        if !home.is_empty() {
            let candidate = java_in_root(Path::new(home));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    which::which("java").ok()
}

/// The `java` executable under an installation root, translated for the
/// host platform
fn java_in_root(root: &Path) -> PathBuf {
    let root = root
        .normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| root.to_path_buf());
    let root = dunce::simplified(&root);
    let executable = if cfg!(windows) { "java.exe" } else { "java" };
    root.join("bin").join(executable)
}

fn probe_version(java: &Path) -> Result<String> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .map_err(|e| LaunchError::RuntimeProbeFailed {
            reason: format!("failed to execute {}: {e}", java.display()),
        })?;
    if !output.status.success() {
        return Err(LaunchError::RuntimeProbeFailed {
            reason: format!("java -version exited with {}", output.status),
        });
    }
    // The JVM prints its version banner on stderr
    let banner = if output.stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    };
    parse_version_banner(&banner).ok_or_else(|| LaunchError::RuntimeProbeFailed {
        reason: format!("could not parse a version from: {}", banner.trim()),
    })
}

/// Extract the quoted version from a `java -version` banner, e.g.
/// `openjdk version "17.0.2" 2022-01-18` -> `17.0.2`
fn parse_version_banner(banner: &str) -> Option<String> {
    for line in banner.lines() {
        if !line.contains("version") {
            continue;
        }
        let mut quoted = line.split('"');
        quoted.next()?;
        if let Some(version) = quoted.next() {
            if !version.is_empty() {
                return Some(version.to_string());
            }
        }
    }
    None
}

/// Major version number; the legacy `1.x` scheme maps to `x`
fn parse_major(version: &str) -> Option<u32> {
    let mut parts = version.split(['.', '_', '-', '+']);
    let first = parts.next()?;
    if first == "1" {
        parts.next()?.parse().ok()
    } else {
        first.parse().ok()
    }
}
