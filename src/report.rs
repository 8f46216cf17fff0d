//! Context-sensitive diagnostics presentation
//!
//! Fatal errors render as a structured annotation under GitHub Actions, as a
//! console-styled line on an interactive terminal, and as plain text when
//! stderr is redirected.

use console::{Style, Term};

use crate::error::LaunchError;

/// Marker GitHub Actions sets for every step
const CI_ENV: &str = "GITHUB_ACTIONS";

/// Render a fatal error on stderr in the form the context calls for
pub fn render_error(err: &LaunchError) {
    if running_in_ci() {
        eprintln!("::error::{err}");
    } else if Term::stderr().features().colors_supported() {
        eprintln!("{} {err}", Style::new().red().bold().apply_to("Error:"));
    } else {
        eprintln!("Error: {err}");
    }
}

/// Launcher tracing, enabled by `--debug`
pub fn trace(message: &str) {
    eprintln!(
        "{}",
        Style::new().dim().apply_to(format!("[ktlaunch] {message}"))
    );
}

fn running_in_ci() -> bool {
    is_ci_value(std::env::var(CI_ENV).ok().as_deref())
}

fn is_ci_value(value: Option<&str>) -> bool {
    value == Some("true")
}
