//! Final ktlint invocation assembly
//!
//! Builds the JVM + ktlint argument vector in a fixed order and runs the
//! child synchronously with inherited stdio. The child's exit code becomes
//! the launcher's own.

use std::path::Path;
use std::process::Command;

use crate::cli::{OutputTarget, RunConfig};
use crate::error::{LaunchError, Result};
use crate::runtime::Runtime;

/// JVM heap cap for the ktlint process
const JVM_MEMORY_FLAG: &str = "-Xmx512m";
/// ktlint's documented JVM property
const JVM_ENCODING_FLAG: &str = "-Dfile.encoding=UTF-8";
/// Required on newer JVMs that lock down java.base reflection
const JVM_ADD_OPENS_FLAG: &str = "--add-opens=java.base/java.lang=ALL-UNNAMED";

/// The sarif report is absolute-path based; `--relative` never applies to it
const SARIF_REPORTER: &str = "sarif";

/// Default report destination per reporter; `None` means standard output
fn default_output(reporter: &str) -> Option<&'static str> {
    match reporter {
        "sarif" => Some("report.sarif"),
        "json" => Some("report.json"),
        "checkstyle" => Some("checkstyle-report.xml"),
        "html" => Some("report.html"),
        _ => None,
    }
}

/// Reporter argument value: `<reporter>` alone for stdout reports,
/// `<reporter>,output=<path>` otherwise
pub fn reporter_value(config: &RunConfig) -> String {
    let destination = match &config.output {
        OutputTarget::Stdout => None,
        OutputTarget::File(path) => Some(path.clone()),
        OutputTarget::ReporterDefault => default_output(&config.reporter).map(str::to_string),
    };
    match destination {
        Some(path) => format!("{},output={}", config.reporter, path),
        None => config.reporter.clone(),
    }
}

/// Build the full argument vector for the `java` child process
pub fn assemble(
    runtime: &Runtime,
    tool: &Path,
    config: &RunConfig,
    files: &[String],
) -> Vec<String> {
    let mut args = vec![JVM_MEMORY_FLAG.to_string(), JVM_ENCODING_FLAG.to_string()];
    if runtime.needs_add_opens() {
        args.push(JVM_ADD_OPENS_FLAG.to_string());
    }
    args.push("-jar".to_string());
    args.push(tool.to_string_lossy().into_owned());

    args.push(format!("--reporter={}", reporter_value(config)));
    if config.debug {
        args.push("--debug".to_string());
    }
    if config.color {
        args.push("--color".to_string());
    }
    if config.format {
        args.push("--format".to_string());
    }
    if config.relative && config.reporter != SARIF_REPORTER {
        args.push("--relative".to_string());
    }
    if config.verbose {
        args.push("--verbose".to_string());
    }

    args.extend(files.iter().cloned());
    args
}

/// Run the assembled invocation and surface the child's exit code
pub fn run(runtime: &Runtime, args: &[String], debug: bool) -> Result<i32> {
    if debug {
        crate::report::trace(&format!(
            "exec: {} {}",
            runtime.java.display(),
            args.join(" ")
        ));
    }
    let status = Command::new(&runtime.java).args(args).status().map_err(|e| {
        LaunchError::InvocationFailed {
            reason: format!("failed to run {}: {e}", runtime.java.display()),
        }
    })?;
    // A signal death carries no code; report the generic downstream failure
    Ok(status.code().unwrap_or(1))
}
