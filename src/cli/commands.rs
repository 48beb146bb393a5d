//! Command implementations.

use std::path::Path;

use log::info;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::synonym::{SynonymFormat, SynonymParser};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::resource::{ResourceParser, WordListParser, probe};

/// Execute a CLI command.
pub fn execute_command(args: CliArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::CheckWords(check_args) => check_words(check_args, &args),
        Command::CheckSynonyms(check_args) => check_synonyms(check_args, &args),
    }
}

fn analyze(args: &AnalyzeArgs, cli_args: &CliArgs) -> Result<()> {
    let config = AnalyzerConfig::from_file(&args.config)?;
    let base = args
        .config_dir
        .as_deref()
        .or_else(|| args.config.parent())
        .filter(|dir| !dir.as_os_str().is_empty());
    let analyzer = config.build(base)?;
    info!("analyzing with {}", analyzer.label());

    let mut results = Vec::with_capacity(args.text.len());
    for text in &args.text {
        let tokens = analyzer.analyze(text)?.map(|t| TokenView::from(&t)).collect();
        results.push(AnalysisResult {
            text: text.clone(),
            tokens,
        });
    }
    output_result(&results, cli_args)
}

fn check_words(args: &CheckWordsArgs, cli_args: &CliArgs) -> Result<()> {
    let parser = WordListParser::new(args.ignore_case);
    let words = parser.parse(&probe::read_text(&args.path)?)?;
    info!("read {} words from {}", words.len(), args.path.display());

    let entries = args.list.then(|| {
        let mut entries: Vec<String> = words.iter().map(str::to_string).collect();
        entries.sort();
        entries
    });
    output_result(
        &WordListReport {
            path: display(&args.path),
            ignore_case: args.ignore_case,
            words: words.len(),
            entries,
        },
        cli_args,
    )
}

fn check_synonyms(args: &CheckSynonymsArgs, cli_args: &CliArgs) -> Result<()> {
    let format = SynonymFormat::from(args.format);
    let expand = !args.no_expand;
    let parser = SynonymParser::new(format, expand, args.ignore_case);
    let table = parser.parse(&probe::read_text(&args.path)?)?;

    let mut report = SynonymReport {
        path: display(&args.path),
        format: format.to_string(),
        expand,
        ignore_case: args.ignore_case,
        loaded: table.is_some(),
        reason: None,
        rules: 0,
        max_source_len: 0,
        entries: None,
    };

    match &table {
        Some(table) => {
            report.rules = table.len();
            report.max_source_len = table.max_source_len();
            if args.list {
                report.entries = Some(
                    table
                        .iter()
                        .map(|(source, entry)| RuleView {
                            source: source.join(" "),
                            targets: entry.targets.iter().map(|t| t.join(" ")).collect(),
                            keep_original: entry.keep_original,
                        })
                        .collect(),
                );
            }
        }
        None => {
            report.reason = Some(match format {
                SynonymFormat::Simple => "the file contains no rules".to_string(),
                SynonymFormat::Wordnet => {
                    "no valid wordnet record, or only single-word synsets".to_string()
                }
            });
        }
    }
    output_result(&report, cli_args)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
