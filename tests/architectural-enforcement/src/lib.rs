//! Architectural Enforcement
//!
//! Source scanning helpers for the boundary tests in `tests/`:
//! - The status visual core stays headless (no terminal crates)
//! - Production code propagates errors instead of panicking on them
//!
//! Scanning is line based. A file's `#[cfg(test)]` module is treated as the
//! end of its production code, and comment lines are skipped.

use std::fs;
use std::path::{Path, PathBuf};

/// A matched line in production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Absolute path of a directory relative to the workspace root
pub fn workspace_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

/// Production (non-test, non-comment) lines of a source text, 1-based
pub fn production_lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

/// Every production line under `dir` matching any of `needles`
pub fn find_in_production_code(dir: &Path, needles: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };

        for (line, text) in production_lines(&content) {
            let code = text.split("//").next().unwrap_or(text);
            if needles.iter().any(|needle| code.contains(needle)) {
                violations.push(Violation {
                    path: entry.path().to_path_buf(),
                    line,
                    text: text.trim().to_string(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let source = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() {} }\n";
        assert_eq!(production_lines(source), vec![(1, "fn a() {}")]);
    }

    #[test]
    fn test_doc_comments_are_skipped() {
        let source = "/// value.unwrap()\nlet x = 1;\n";
        assert_eq!(production_lines(source), vec![(2, "let x = 1;")]);
    }
}
