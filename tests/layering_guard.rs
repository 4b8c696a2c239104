//! Layering guardrails for the workspace crates.
//!
//! - `jjkw_core` is the shared vocabulary and must stay dependency-free.
//! - `jjkw_syntax` (the grammar frontend) may depend on `jjkw_core` but never on the extractor crate `jjkw`.
//!
//! These tests scan the member manifests and fail if a `[dependencies]` table breaks those rules.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let names = dependency_names(include_str!("../crates/jjkw_core/Cargo.toml"));
    assert!(names.is_empty(), "`jjkw_core` must not have dependencies, found {names:?}");
}

#[test]
fn syntax_does_not_depend_on_extractor() {
    let names = dependency_names(include_str!("../crates/jjkw_syntax/Cargo.toml"));
    assert!(names.contains(&"jjkw_core".to_string()), "{names:?}");
    assert!(
        !names.iter().any(|n| n == "jjkw"),
        "`jjkw_syntax` must not depend on the extractor crate"
    );
}

#[test]
fn manifest_scanner_reads_dependency_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\n# comment\na = \"1\"\nb = { path = \"../b\" } # inline\n\n[dev-dependencies]\nc = \"1\"\n";
    assert_eq!(dependency_names(manifest), vec!["a", "b"]);
}
