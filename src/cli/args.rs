//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::analysis::synonym::SynonymFormat;

/// Inspect analyzers, word lists and synonym files
#[derive(Parser, Debug, Clone)]
#[command(name = "analysis-extension")]
#[command(about = "Inspect analyzers, word lists and synonym files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CliArgs {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'o', long = "output", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    /// Effective verbosity: 0 quiet, 1 default, 2 verbose, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run text through an analyzer defined in a JSON file
    Analyze(AnalyzeArgs),

    /// Load a word list and report its size
    #[command(name = "check-words")]
    CheckWords(CheckWordsArgs),

    /// Parse a synonym file and report its rules
    #[command(name = "check-synonyms")]
    CheckSynonyms(CheckSynonymsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Analyzer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "ANALYSIS_EXTENSION_CONFIG")]
    pub config: PathBuf,

    /// Directory for relative dictionary paths (default: the config file's directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Text to analyze; each argument is analyzed separately
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckWordsArgs {
    /// Word-list file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Lowercase words before storing them
    #[arg(long)]
    pub ignore_case: bool,

    /// Print every word
    #[arg(long)]
    pub list: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckSynonymsArgs {
    /// Synonym file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// File format
    #[arg(long, default_value = "simple")]
    pub format: FormatArg,

    /// Contract comma groups to their first term instead of expanding them
    #[arg(long)]
    pub no_expand: bool,

    /// Lowercase terms
    #[arg(long)]
    pub ignore_case: bool,

    /// Print every rule
    #[arg(long)]
    pub list: bool,
}

/// Synonym file formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Simple,
    Wordnet,
}

impl From<FormatArg> for SynonymFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Simple => SynonymFormat::Simple,
            FormatArg::Wordnet => SynonymFormat::Wordnet,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_args() {
        let args = CliArgs::try_parse_from([
            "analysis-extension",
            "analyze",
            "--config",
            "analyzer.json",
            "hello world",
            "second",
        ])
        .unwrap();

        match args.command {
            Command::Analyze(analyze) => {
                assert_eq!(analyze.config, PathBuf::from("analyzer.json"));
                assert_eq!(analyze.text, vec!["hello world", "second"]);
                assert!(analyze.config_dir.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_synonyms_args() {
        let args = CliArgs::try_parse_from([
            "analysis-extension",
            "-o",
            "json",
            "check-synonyms",
            "wn.pl",
            "--format",
            "wordnet",
            "--no-expand",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::CheckSynonyms(check) => {
                assert_eq!(SynonymFormat::from(check.format), SynonymFormat::Wordnet);
                assert!(check.no_expand);
                assert!(!check.ignore_case);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = CliArgs::try_parse_from(["analysis-extension", "-vv", "check-words", "w.txt"])
            .unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = CliArgs::try_parse_from(["analysis-extension", "check-words", "w.txt", "-q"])
            .unwrap();
        assert_eq!(args.verbosity(), 0);

        let args =
            CliArgs::try_parse_from(["analysis-extension", "check-words", "w.txt"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_analyze_requires_text() {
        assert!(
            CliArgs::try_parse_from(["analysis-extension", "analyze", "--config", "a.json"])
                .is_err()
        );
    }
}
