//! CLI definitions using clap derive API
//!
//! Parsing is pure: it produces an immutable [`RunConfig`] and performs no
//! I/O beyond the help/license/error printing that terminates the process.
//! Parse failures map onto the launcher's exit-code table instead of clap's
//! default usage-error status.

use clap::builder::styling::AnsiColor;
use clap::builder::{NonEmptyStringValueParser, Styles};
use clap::Parser;
use clap::error::ErrorKind;

use crate::error::{EXIT_MISSING_ARG_VALUE, EXIT_UNSUPPORTED_FLAG};

/// ktlaunch - zero-setup ktlint runner
#[derive(Parser, Debug)]
#[command(
    name = "ktlaunch",
    author,
    disable_version_flag = true,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Zero-setup launcher for the ktlint Kotlin linter",
    long_about = "ktlaunch downloads the ktlint release binary on first use, finds a Java \
                  runtime, and runs ktlint over the given files, directories, or quoted \
                  wildcard patterns.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  ktlaunch src/\n    \
                  ktlaunch -F src/main/kotlin\n    \
                  ktlaunch -r checkstyle -o build/ktlint.xml src/\n    \
                  ktlaunch --color \"src/**/*.kt\"\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/ktlaunch/ktlaunch"
)]
pub struct Cli {
    /// Enable ktlint auto-fix mode
    #[arg(short = 'F', long = "format")]
    pub format: bool,

    /// Report format: plain, plain?group_by_file, json, sarif, checkstyle, html
    #[arg(
        short = 'r',
        long = "reporter",
        value_name = "REPORTER",
        default_value = "plain",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub reporter: String,

    /// Redirect the report to PATH; `-` forces standard output
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub output: Option<String>,

    /// Colorize ktlint output
    #[arg(long)]
    pub color: bool,

    /// Emit relative paths in the report (ignored for the sarif reporter)
    #[arg(long)]
    pub relative: bool,

    /// Suppress the download progress bar
    #[arg(long = "no-download-progress")]
    pub no_download_progress: bool,

    /// Launcher tracing plus ktlint debug output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print the license text and exit
    #[arg(short = 'l', long)]
    pub license: bool,

    /// Verbose ktlint output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print launcher and Java versions and exit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Files, directories, or quoted wildcard patterns to lint
    #[arg(value_name = "PATH")]
    pub inputs: Vec<String>,
}

/// Where the ktlint report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// No `-o` given: the reporter's own default destination applies
    ReporterDefault,
    /// `-o -`: force standard output
    Stdout,
    /// `-o PATH`: write the report to this path
    File(String),
}

/// Fully resolved user intentions for one invocation.
///
/// Built once from the parsed CLI, immutable afterwards, never persisted.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub reporter: String,
    pub output: OutputTarget,
    pub color: bool,
    pub debug: bool,
    pub format: bool,
    pub relative: bool,
    pub verbose: bool,
    pub download_progress: bool,
    pub version_requested: bool,
    /// Raw positional inputs in arrival order
    pub inputs: Vec<String>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let output = match cli.output.as_deref() {
            None => OutputTarget::ReporterDefault,
            Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_string()),
        };
        RunConfig {
            reporter: cli.reporter,
            output,
            color: cli.color,
            debug: cli.debug,
            format: cli.format,
            relative: cli.relative,
            verbose: cli.verbose,
            download_progress: !cli.no_download_progress,
            version_requested: cli.version,
            inputs: cli.inputs,
        }
    }
}

/// Parse the process arguments, terminating on help or parse failure.
///
/// Help prints to stdout and exits 0; errors print usage to stderr and exit
/// with the code from [`parse_failure_code`].
pub fn parse_or_exit() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        let code = parse_failure_code(err.kind());
        let _ = err.print();
        std::process::exit(code.unwrap_or(0));
    })
}

/// Exit status for a parse failure; `None` means help was requested.
///
/// A flag that is not recognized at all is an unsupported-flag error; a
/// recognized option missing its value (no following token, or an empty
/// attached value) is a missing-argument error.
fn parse_failure_code(kind: ErrorKind) -> Option<i32> {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation | ErrorKind::NoEquals => {
            Some(EXIT_MISSING_ARG_VALUE)
        }
        _ => Some(EXIT_UNSUPPORTED_FLAG),
    }
}

/// License text printed by `-l`/`--license`
pub const LICENSE: &str = "\
MIT License

Copyright (c) 2024 ktlaunch contributors

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.";
