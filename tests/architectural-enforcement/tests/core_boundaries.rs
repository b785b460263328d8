//! Integration Test: Crate Boundaries
//!
//! **Policy**: `status-visual-core` is headless. It MUST NOT import terminal
//! crates; surfaces depend on it, never the other way round.
//!
//! **Policy**: Production code in the core and the TUI MUST NOT call
//! `unwrap()` or `expect()`. Errors are returned with `?`.

use architectural_enforcement::{find_in_production_code, workspace_path, Violation};

fn report(title: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\nFound {} violation(s). Fix these before merging!", violations.len());
}

#[test]
fn test_core_has_no_terminal_dependencies() {
    let core = workspace_path("visual/core/src");
    assert!(core.exists(), "missing {}", core.display());

    let violations = find_in_production_code(&core, &["ratatui", "crossterm"]);
    report("Terminal crates used in status-visual-core", &violations);
}

#[test]
fn test_core_manifest_has_no_terminal_dependencies() {
    let manifest = workspace_path("visual/core/Cargo.toml");
    let content = std::fs::read_to_string(&manifest).unwrap();
    for forbidden in ["ratatui", "crossterm"] {
        assert!(
            !content.contains(forbidden),
            "{} depends on {forbidden}",
            manifest.display()
        );
    }
}

#[test]
fn test_no_unwrap_in_production_code() {
    let needles = [".unwrap()", ".expect("];
    let mut violations = find_in_production_code(&workspace_path("visual/core/src"), &needles);
    violations.extend(find_in_production_code(&workspace_path("tui/src"), &needles));
    report("unwrap()/expect() in production code", &violations);
}
