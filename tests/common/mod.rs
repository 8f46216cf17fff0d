//! Common test utilities for ktlaunch integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A scratch workspace holding Kotlin sources for a test run
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the workspace, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }
}

/// Fake JDK installation root: its `java` prints `banner` on stderr for
/// `-version` and exits `run_exit` for any real invocation.
#[cfg(unix)]
pub fn fake_jdk(banner: &str, run_exit: i32) -> TempDir {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().expect("Failed to create temp directory");
    let bin = root.path().join("bin");
    fs::create_dir_all(&bin).expect("Failed to create bin directory");

    let java = bin.join("java");
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-version\" ]; then\n\
           echo '{banner}' >&2\n\
           exit 0\n\
         fi\n\
         exit {run_exit}\n"
    );
    fs::write(&java, script).expect("Failed to write fake java");
    let mut perms = fs::metadata(&java)
        .expect("Failed to stat fake java")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&java, perms).expect("Failed to chmod fake java");
    root
}

/// Seed the tool cache next to the test binary so runs never reach the
/// network. Idempotent; returns the jar path.
#[allow(deprecated)]
pub fn seed_tool_cache() -> PathBuf {
    let exe = assert_cmd::cargo::cargo_bin("ktlaunch");
    let dir = exe
        .parent()
        .expect("launcher binary should have a parent directory")
        .join("ktlint");
    fs::create_dir_all(&dir).expect("Failed to create tool cache directory");
    let jar = dir.join("ktlint.jar");
    if !jar.exists() {
        fs::write(&jar, b"stub jar for integration tests").expect("Failed to seed tool cache");
    }
    jar
}

/// A directory guaranteed to contain no executables, for PATH isolation
pub fn empty_path_dir(base: &Path) -> PathBuf {
    let dir = base.join("empty-path");
    fs::create_dir_all(&dir).expect("Failed to create empty PATH directory");
    dir
}
