//! Grammar loading: read the `.jjt` file, run the frontend, keep the expanded `.jj` in the scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use jjkw_syntax::GrammarTables;

use super::error::ExtractError;

/// Load a grammar file and build its tables.
///
/// ## Side effects
/// - Creates `scratch_dir` (and parents) if absent.
/// - Writes the expanded grammar as `<stem>.jj` into `scratch_dir`, also when the later stages reject it.
///
/// ## Errors
/// - [`ExtractError::Load`] if the grammar cannot be read.
/// - [`ExtractError::Scratch`] if the scratch directory or the expanded grammar cannot be written.
/// - [`ExtractError::GrammarSyntax`] if any frontend stage rejects the grammar.
pub fn load(grammar: &Path, scratch_dir: &Path) -> Result<GrammarTables, ExtractError> {
    let source = fs::read_to_string(grammar).map_err(|source| ExtractError::Load {
        path: grammar.to_path_buf(),
        source,
    })?;
    tracing::info!(grammar = %grammar.display(), bytes = source.len(), "loading grammar");

    fs::create_dir_all(scratch_dir).map_err(|source| ExtractError::Scratch {
        path: scratch_dir.to_path_buf(),
        source,
    })?;

    let expanded = jjkw_syntax::jjtree::expand(&source).map_err(|errors| syntax_error(grammar, &source, errors))?;

    let out = expanded_path(grammar, scratch_dir);
    fs::write(&out, &expanded).map_err(|source| ExtractError::Scratch { path: out.clone(), source })?;
    tracing::info!(output = %out.display(), "wrote expanded grammar");

    let tables =
        jjkw_syntax::compile_expanded(&expanded).map_err(|errors| syntax_error(grammar, &source, errors))?;
    tracing::info!(
        tokens = tables.tokens().len(),
        productions = tables.productions().len(),
        "grammar tables built"
    );
    Ok(tables)
}

/// Run the frontend on in-memory grammar text; nothing is written.
///
/// `name` is only used in diagnostics.
pub fn load_str(name: &str, source: &str) -> Result<GrammarTables, ExtractError> {
    jjkw_syntax::compile(source)
        .map(|(_, tables)| tables)
        .map_err(|errors| syntax_error(Path::new(name), source, errors))
}

/// `<scratch_dir>/<stem>.jj`
pub fn expanded_path(grammar: &Path, scratch_dir: &Path) -> PathBuf {
    let stem = grammar
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grammar".to_string());
    scratch_dir.join(format!("{stem}.jj"))
}

fn syntax_error(path: &Path, source: &str, errors: Vec<jjkw_syntax::CompileError>) -> ExtractError {
    tracing::warn!(grammar = %path.display(), errors = errors.len(), "grammar rejected");
    ExtractError::GrammarSyntax {
        path: path.to_path_buf(),
        source_text: source.to_string(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_path_uses_stem() {
        let out = expanded_path(Path::new("src/main/jjtree/JSqlParserCC.jjt"), Path::new("target/jjgrammar"));
        assert_eq!(out, Path::new("target/jjgrammar/JSqlParserCC.jj"));
    }

    #[test]
    fn test_load_str_reports_grammar_errors() {
        let err = load_str("inline.jjt", "void A() : {} { <K_MISSING> }").unwrap_err();
        match err {
            ExtractError::GrammarSyntax { path, errors, .. } => {
                assert_eq!(path, Path::new("inline.jjt"));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected grammar error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.jjt"), dir.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Load { .. }));
    }
}
