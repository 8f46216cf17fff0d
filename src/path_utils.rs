//! Cross-platform path presentation for ktlaunch
//!
//! Everything downstream of input resolution works with display strings, so
//! the host-platform quirks are confined to the single normalization function
//! here. On Unix hosts it is effectively a no-op.

use std::path::Path;

/// Normalize a path for display and for handing to ktlint.
///
/// Strips Windows verbatim (`\\?\`) prefixes via `dunce` and converts
/// separators to forward slashes. Callers inject this function into the
/// input resolver rather than branching on the platform themselves.
pub fn normalize_display(path: &Path) -> String {
    to_forward_slashes(dunce::simplified(path))
}

/// Convert path separators to forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
