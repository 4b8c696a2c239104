//! CLI module for the keyword extractor
//!
//! ## Commands
//!
//! - `extract <GRAMMAR> <SCRATCH_DIR>` - Print keywords, whitelist buckets and restricted keywords
//! - `check <GRAMMAR> <SCRATCH_DIR> --expected FILE` - Compare restricted keywords with an expectation file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use jjkw_core::Conventions;
use jjkw_core::conventions::{KEYWORD_TOKEN_PREFIX, LIST_SUFFIX, OBJECT_NAME_PREFIX};

use crate::report::ReportFormat;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Extract and classify keywords of a JavaCC/JJTree SQL grammar
#[derive(Parser, Debug)]
#[command(name = "jjkw")]
#[command(version = VERSION)]
#[command(about = "Extract and classify keywords of a JavaCC/JJTree grammar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Dump the token stream of the expanded grammar (debug)
    #[arg(long = "lex", value_name = "FILE")]
    pub lex_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print keywords, whitelist buckets and restricted keywords
    Extract {
        #[command(flatten)]
        input: GrammarInput,
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compare restricted keywords with an expectation file (one label per line, `#` comments)
    Check {
        #[command(flatten)]
        input: GrammarInput,
        /// Expected restricted keyword labels
        #[arg(long, value_name = "FILE")]
        expected: PathBuf,
    },
}

/// Grammar location and naming conventions shared by the subcommands.
#[derive(Args, Debug, Clone)]
pub struct GrammarInput {
    /// JJTree grammar file (.jjt)
    #[arg(value_name = "GRAMMAR")]
    pub grammar: PathBuf,
    /// Directory receiving the expanded .jj grammar
    #[arg(value_name = "SCRATCH_DIR")]
    pub scratch_dir: PathBuf,
    /// Prefix of productions that whitelist keywords
    #[arg(long, value_name = "PREFIX", default_value = OBJECT_NAME_PREFIX)]
    pub object_name_prefix: String,
    /// Suffix of aggregate productions that never form a bucket
    #[arg(long, value_name = "SUFFIX", default_value = LIST_SUFFIX)]
    pub list_suffix: String,
    /// Prefix of keyword token labels
    #[arg(long = "keyword-prefix", value_name = "PREFIX", default_value = KEYWORD_TOKEN_PREFIX)]
    pub keyword_prefix: String,
}

impl GrammarInput {
    pub fn conventions(&self) -> Conventions {
        Conventions::new()
            .with_object_name_prefix(&self.object_name_prefix)
            .with_list_suffix(&self.list_suffix)
            .with_keyword_token_prefix(&self.keyword_prefix)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }

    match cli.command {
        Some(Command::Extract { input, format, output }) => {
            commands::extract(&input, format, output.as_deref())
        }
        Some(Command::Check { input, expected }) => commands::check(&input, &expected),
        None => Err(CliError::failure("No command given; run `jjkw --help` for usage")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract_defaults() {
        let cli = Cli::try_parse_from(["jjkw", "extract", "Sql.jjt", "target/jjgrammar"]).unwrap();
        let Some(Command::Extract { input, format, output }) = cli.command else {
            panic!("Expected Extract command");
        };
        assert_eq!(input.grammar, PathBuf::from("Sql.jjt"));
        assert_eq!(input.scratch_dir, PathBuf::from("target/jjgrammar"));
        assert_eq!(format, ReportFormat::Json);
        assert!(output.is_none());
        assert_eq!(input.conventions(), Conventions::default());
    }

    #[test]
    fn test_cli_parse_extract_overrides() {
        let cli = Cli::try_parse_from([
            "jjkw",
            "extract",
            "Sql.jjt",
            "out",
            "--format",
            "text",
            "-o",
            "report.txt",
            "--object-name-prefix",
            "Name",
            "--list-suffix",
            "Seq",
            "--keyword-prefix",
            "KW_",
        ])
        .unwrap();
        let Some(Command::Extract { input, format, output }) = cli.command else {
            panic!("Expected Extract command");
        };
        assert_eq!(format, ReportFormat::Text);
        assert_eq!(output, Some(PathBuf::from("report.txt")));
        let conventions = input.conventions();
        assert_eq!(conventions.object_name_prefix, "Name");
        assert_eq!(conventions.list_suffix, "Seq");
        assert_eq!(conventions.keyword_token_prefix, "KW_");
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["jjkw", "check", "Sql.jjt", "out", "--expected", "restricted.txt"]).unwrap();
        if let Some(Command::Check { expected, .. }) = cli.command {
            assert_eq!(expected, PathBuf::from("restricted.txt"));
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_requires_expected() {
        assert!(Cli::try_parse_from(["jjkw", "check", "Sql.jjt", "out"]).is_err());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["jjkw", "--lex", "Sql.jjt"]).unwrap();
        assert_eq!(cli.lex_file, Some(PathBuf::from("Sql.jjt")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_execute_without_command_fails() {
        let cli = Cli::try_parse_from(["jjkw"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
