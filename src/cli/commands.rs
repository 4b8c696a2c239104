//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use jjkw_syntax::diagnostics::format_errors;
use jjkw_syntax::{jjtree, lexer};

use super::{CliError, CliResult, ExitCode, GrammarInput};
use crate::extract::{Extractor, ExtractorConfig, KeywordCatalog};
use crate::report::{ExtractReport, ReportFormat, render_diff};

/// Maximum grammar file size (100 MB)
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a text file.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "File '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

fn load_catalog(input: &GrammarInput) -> CliResult<Arc<KeywordCatalog>> {
    let config = ExtractorConfig::new(&input.grammar, &input.scratch_dir).with_conventions(input.conventions());
    Extractor::new(config)
        .initialize()
        .map_err(|e| CliError::failure(e.render().trim_end()))
}

/// Print (or write) the extraction report.
pub fn extract(input: &GrammarInput, format: ReportFormat, output: Option<&Path>) -> CliResult<ExitCode> {
    let catalog = load_catalog(input)?;
    let rendered = ExtractReport::from_catalog(&catalog)
        .render(format)
        .map_err(|e| CliError::failure(format!("Error serializing report: {}", e)))?;

    match output {
        Some(path) => {
            fs::write(path, rendered.as_bytes())
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
            tracing::info!(output = %path.display(), "report written");
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(ExitCode::SUCCESS)
}

/// Compare the restricted set with an expectation file.
pub fn check(input: &GrammarInput, expected_file: &Path) -> CliResult<ExitCode> {
    let expected = parse_expected(&read_source(expected_file)?);
    let catalog = load_catalog(input)?;
    let diff = catalog.diff_restricted(expected.as_slice());

    print!("{}", render_diff(&diff));
    if diff.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// One label per line; blank lines and `#` comments are ignored.
pub fn parse_expected(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand a grammar and display its tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let tokens = jjtree::expand(&source)
        .and_then(|expanded| lexer::lex(&expanded))
        .map_err(|errs| CliError::failure(format_errors(&name, &source, &errs).trim_end()))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expected_skips_comments_and_blanks() {
        let text = "# restricted keywords\nK_SELECT\n\n  K_FROM  # trailing comment\n#K_OLD\n";
        assert_eq!(parse_expected(text), vec!["K_SELECT", "K_FROM"]);
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("definitely/missing.jjt")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
