//! Positional input expansion into a canonical source-file list
//!
//! Explicit files are taken as-is, `*` patterns pass through verbatim for
//! ktlint's own glob matching, directories are walked for Kotlin sources,
//! and anything that does not exist produces a notice rather than an error.

use std::path::Path;

use console::Style;
use walkdir::WalkDir;

use crate::error::{LaunchError, Result};

/// Source-file extensions ktlint understands
const KOTLIN_EXTENSIONS: &[&str] = &["kt", "kts"];

/// Expand raw positional inputs into a sorted, deduplicated file list.
///
/// `normalize` is the single seam for host-platform path presentation; the
/// resolver itself never branches on the platform. An empty `raw` list is
/// valid (ktlint applies its own default file selection), but explicit
/// inputs that resolve to nothing are a hard error.
pub fn resolve_inputs<F>(raw: &[String], normalize: F) -> Result<Vec<String>>
where
    F: Fn(&Path) -> String,
{
    let mut resolved = Vec::new();
    for input in raw {
        let path = Path::new(input);
        if path.is_file() {
            resolved.push(normalize(path));
        } else if input.contains('*') {
            // ktlint expands patterns itself; hand them over untouched
            resolved.push(input.clone());
        } else if path.is_dir() {
            collect_kotlin_files(path, &normalize, &mut resolved);
        } else {
            println!(
                "{}",
                Style::new()
                    .dim()
                    .apply_to(format!("{input} does not exist, skipping"))
            );
        }
    }

    resolved.sort();
    resolved.dedup();

    if resolved.is_empty() && !raw.is_empty() {
        return Err(LaunchError::NoInputFiles {
            inputs: raw.join(", "),
        });
    }
    Ok(resolved)
}

fn collect_kotlin_files<F>(dir: &Path, normalize: &F, out: &mut Vec<String>)
where
    F: Fn(&Path) -> String,
{
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if entry.file_type().is_file() && has_kotlin_extension(entry.path()) {
            out.push(normalize(entry.path()));
        }
    }
}

fn has_kotlin_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| KOTLIN_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_utils::normalize_display;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, relative: &str) -> String {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dirs");
        }
        fs::write(&path, "").expect("write file");
        normalize_display(&path)
    }

    #[test]
    fn test_existing_files_sorted_and_deduplicated() {
        let dir = TempDir::new().expect("temp dir");
        let a = touch(&dir, "a.kt");
        let b = touch(&dir, "b.kt");

        let raw = vec![b.clone(), a.clone(), a.clone()];
        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, vec![a, b]);
    }

    #[test]
    fn test_directory_filters_kotlin_extensions() {
        let dir = TempDir::new().expect("temp dir");
        let x = touch(&dir, "src/x.kt");
        let y = touch(&dir, "src/y.kts");
        touch(&dir, "src/z.txt");

        let raw = vec![normalize_display(&dir.path().join("src"))];
        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, vec![x, y]);
    }

    #[test]
    fn test_directory_walk_is_recursive() {
        let dir = TempDir::new().expect("temp dir");
        let deep = touch(&dir, "src/main/kotlin/com/example/App.kt");
        touch(&dir, "src/main/resources/app.properties");

        let raw = vec![normalize_display(dir.path())];
        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, vec![deep]);
    }

    #[test]
    fn test_wildcard_patterns_pass_through_verbatim() {
        let raw = vec!["src/**/*.kt".to_string()];
        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, vec!["src/**/*.kt"]);
    }

    #[test]
    fn test_mixed_inputs() {
        let dir = TempDir::new().expect("temp dir");
        let file = touch(&dir, "Main.kt");
        let nested = touch(&dir, "lib/Util.kts");

        let raw = vec![
            file.clone(),
            "glob/*.kt".to_string(),
            normalize_display(&dir.path().join("lib")),
            "no-such-path".to_string(),
        ];
        let mut expected = vec![file, "glob/*.kt".to_string(), nested];
        expected.sort();

        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_only_nonexistent_inputs_is_an_error() {
        let raw = vec!["missing.kt".to_string(), "also/missing".to_string()];
        let err = resolve_inputs(&raw, normalize_display).expect_err("should fail");
        match err {
            LaunchError::NoInputFiles { inputs } => {
                assert_eq!(inputs, "missing.kt, also/missing");
            }
            other => panic!("expected NoInputFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_raw_list_is_valid() {
        let resolved = resolve_inputs(&[], normalize_display).expect("resolution");
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_empty_directory_with_other_matches_is_fine() {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("empty")).expect("empty dir");
        let file = touch(&dir, "Main.kt");

        let raw = vec![normalize_display(&dir.path().join("empty")), file.clone()];
        let resolved = resolve_inputs(&raw, normalize_display).expect("resolution");
        assert_eq!(resolved, vec![file]);
    }

    #[test]
    fn test_has_kotlin_extension() {
        assert!(has_kotlin_extension(Path::new("a.kt")));
        assert!(has_kotlin_extension(Path::new("b.kts")));
        assert!(!has_kotlin_extension(Path::new("c.txt")));
        assert!(!has_kotlin_extension(Path::new("kt")));
        assert!(!has_kotlin_extension(Path::new("d.KT")));
    }
}
