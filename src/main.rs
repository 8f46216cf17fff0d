//! ktlaunch - zero-setup launcher for the ktlint Kotlin linter
//!
//! Fetches the ktlint release binary on demand, finds a Java runtime,
//! translates the launcher flag set into a ktlint invocation, and runs it
//! over the resolved input files. The whole run is one linear pipeline
//! ending in a synchronous child process whose exit code becomes ours.

use std::path::PathBuf;
use std::process;

mod cli;
mod error;
mod inputs;
mod invoke;
mod path_utils;
mod progress;
mod release;
mod report;
mod runtime;

use cli::RunConfig;
use error::{LaunchError, Result};

fn main() {
    let parsed = cli::parse_or_exit();

    if parsed.license {
        println!("{}", cli::LICENSE);
        return;
    }

    let config = RunConfig::from(parsed);
    match run(&config) {
        Ok(code) => process::exit(code),
        Err(err) => {
            report::render_error(&err);
            process::exit(err.exit_code());
        }
    }
}

fn run(config: &RunConfig) -> Result<i32> {
    let runtime = runtime::resolve()?;

    if config.version_requested {
        println!("ktlaunch {}", env!("CARGO_PKG_VERSION"));
        println!("java {} ({})", runtime.version, runtime.java.display());
        return Ok(0);
    }

    let options = release::FetchOptions {
        tag: None,
        token: std::env::var(release::TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty()),
        show_progress: config.download_progress,
    };
    let tool = release::ensure_tool(&install_dir()?, release::GITHUB_API, &options)?;

    if config.debug {
        report::trace(&format!(
            "runtime: {} (major {})",
            runtime.java.display(),
            runtime.major
        ));
        report::trace(&format!("tool: {}", tool.display()));
    }

    let files = inputs::resolve_inputs(&config.inputs, path_utils::normalize_display)?;
    let args = invoke::assemble(&runtime, &tool, config, &files);
    invoke::run(&runtime, &args, config.debug)
}

/// Directory the tool binary is cached in, next to the launcher itself
fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| LaunchError::IoError {
        message: "launcher executable has no parent directory".to_string(),
    })?;
    Ok(dir.join("ktlint"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_dir_is_next_to_the_executable() {
        let dir = install_dir().expect("install dir");
        assert!(dir.ends_with("ktlint"));
        let exe = std::env::current_exe().expect("current exe");
        assert_eq!(dir.parent(), exe.parent());
    }
}
