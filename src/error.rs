//! Error types and handling for ktlaunch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every failure is fatal and carries the exit status the launcher terminates
//! with; there is no local recovery or retry anywhere in the pipeline.

use miette::Diagnostic;
use thiserror::Error;

/// Exit status when ktlint itself fails (also used for launcher-side
/// invocation faults the exit-code table has no slot for)
pub const EXIT_DOWNSTREAM_FAILURE: i32 = 1;
/// Exit status when no Java runtime can be located or probed
pub const EXIT_RUNTIME_NOT_FOUND: i32 = 2;
/// Exit status when release metadata or the asset download fails
pub const EXIT_DOWNLOAD_FAILURE: i32 = 3;
/// Exit status for an unrecognized command-line flag
pub const EXIT_UNSUPPORTED_FLAG: i32 = 4;
/// Exit status for an option given without its required value
pub const EXIT_MISSING_ARG_VALUE: i32 = 6;
/// Exit status when explicit inputs resolve to no source files
pub const EXIT_NO_INPUT_FILES: i32 = 7;
/// Exit status when the host runtime is too old to run ktlint
pub const EXIT_INCOMPATIBLE_HOST: i32 = 8;

/// Main error type for ktlaunch operations
#[derive(Error, Diagnostic, Debug)]
pub enum LaunchError {
    // Environment errors
    #[error("No Java runtime found")]
    #[diagnostic(
        code(ktlaunch::runtime::not_found),
        help("Install a JRE (8 or newer) or point JAVA_HOME at an existing installation")
    )]
    RuntimeNotFound,

    #[error("Failed to probe the Java runtime: {reason}")]
    #[diagnostic(code(ktlaunch::runtime::probe_failed))]
    RuntimeProbeFailed { reason: String },

    #[error("Java {version} is too old to run ktlint (major version {major}, 8 or newer required)")]
    #[diagnostic(
        code(ktlaunch::runtime::incompatible),
        help("Upgrade the JRE or point JAVA_HOME at a newer installation")
    )]
    HostIncompatible { version: String, major: u32 },

    // Network / fetch errors
    #[error("Failed to resolve the ktlint release: {reason} (transcript kept at {transcript})")]
    #[diagnostic(
        code(ktlaunch::release::lookup_failed),
        help("Check network access; set GITHUB_TOKEN to raise GitHub API rate limits")
    )]
    ReleaseLookupFailed { reason: String, transcript: String },

    #[error("Release {tag} has no downloadable tool asset (transcript kept at {transcript})")]
    #[diagnostic(code(ktlaunch::release::no_asset))]
    NoReleaseAsset { tag: String, transcript: String },

    #[error("Failed to download ktlint: {reason} (transcript kept at {transcript})")]
    #[diagnostic(
        code(ktlaunch::release::download_failed),
        help("Check network access; set GITHUB_TOKEN to raise GitHub API rate limits")
    )]
    DownloadFailed { reason: String, transcript: String },

    // Input resolution errors
    #[error("No input files found matching: {inputs}")]
    #[diagnostic(
        code(ktlaunch::inputs::none_found),
        help("Pass existing .kt/.kts files, directories containing them, or quoted patterns")
    )]
    NoInputFiles { inputs: String },

    // Invocation errors
    #[error("Failed to invoke ktlint: {reason}")]
    #[diagnostic(code(ktlaunch::invoke::failed))]
    InvocationFailed { reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(ktlaunch::fs::io_error))]
    IoError { message: String },
}

impl LaunchError {
    /// Exit status the launcher terminates with for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::RuntimeNotFound | LaunchError::RuntimeProbeFailed { .. } => {
                EXIT_RUNTIME_NOT_FOUND
            }
            LaunchError::HostIncompatible { .. } => EXIT_INCOMPATIBLE_HOST,
            LaunchError::ReleaseLookupFailed { .. }
            | LaunchError::NoReleaseAsset { .. }
            | LaunchError::DownloadFailed { .. } => EXIT_DOWNLOAD_FAILURE,
            LaunchError::NoInputFiles { .. } => EXIT_NO_INPUT_FILES,
            LaunchError::InvocationFailed { .. } | LaunchError::IoError { .. } => {
                EXIT_DOWNSTREAM_FAILURE
            }
        }
    }
}

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        LaunchError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LaunchError>;
