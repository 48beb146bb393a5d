//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{CliArgs, OutputFormat};
use crate::error::Result;

/// One token as printed by `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenView {
    pub text: String,
    pub position: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub position_increment: usize,
    pub position_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub keyword: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stopped: bool,
}

impl From<&Token> for TokenView {
    fn from(token: &Token) -> Self {
        TokenView {
            text: token.text.clone(),
            position: token.position,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
            position_increment: token.position_increment,
            position_length: token.position_length,
            token_type: token.token_type().map(|t| format!("{t:?}")),
            keyword: token.keyword,
            stopped: token.stopped,
        }
    }
}

/// Result of `analyze` for one input text.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub tokens: Vec<TokenView>,
}

/// Result of `check-words`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordListReport {
    pub path: String,
    pub ignore_case: bool,
    pub words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
}

/// One synonym rule as printed by `check-synonyms`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleView {
    pub source: String,
    pub targets: Vec<String>,
    pub keep_original: bool,
}

/// Result of `check-synonyms`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SynonymReport {
    pub path: String,
    pub format: String,
    pub expand: bool,
    pub ignore_case: bool,
    /// `false` when the file produced no table; `reason` says why.
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub rules: usize,
    pub max_source_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<RuleView>>,
}

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn print_human(&self, args: &CliArgs);
}

/// Print `result` in the selected output format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &CliArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &CliArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for Vec<AnalysisResult> {
    fn print_human(&self, args: &CliArgs) {
        for result in self {
            if args.verbosity() > 0 {
                println!("{}", result.text);
            }
            for token in &result.tokens {
                let mut flags = Vec::new();
                if token.keyword {
                    flags.push("keyword");
                }
                if token.stopped {
                    flags.push("stopped");
                }
                println!(
                    "  {:>3}  {:<20} [{}..{}] inc={} len={} {} {}",
                    token.position,
                    token.text,
                    token.start_offset,
                    token.end_offset,
                    token.position_increment,
                    token.position_length,
                    token.token_type.as_deref().unwrap_or("-"),
                    flags.join(",")
                );
            }
        }
    }
}

impl HumanOutput for WordListReport {
    fn print_human(&self, _args: &CliArgs) {
        println!(
            "{}: {} words{}",
            self.path,
            self.words,
            if self.ignore_case { " (ignore case)" } else { "" }
        );
        if let Some(entries) = &self.entries {
            for word in entries {
                println!("  {word}");
            }
        }
    }
}

impl HumanOutput for SynonymReport {
    fn print_human(&self, _args: &CliArgs) {
        if !self.loaded {
            println!(
                "{}: no synonyms ({})",
                self.path,
                self.reason.as_deref().unwrap_or("empty")
            );
            return;
        }
        println!(
            "{}: {} rules, longest source {} tokens (format={}, expand={}, ignore_case={})",
            self.path, self.rules, self.max_source_len, self.format, self.expand, self.ignore_case
        );
        if let Some(entries) = &self.entries {
            for rule in entries {
                let arrow = if rule.keep_original { "+>" } else { "=>" };
                println!("  {} {} {}", rule.source, arrow, rule.targets.join(", "));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenType;

    #[test]
    fn test_token_view() {
        let token = Token::with_offsets("ny", 1, 3, 11)
            .with_position_increment(0)
            .with_position_length(2)
            .with_token_type(TokenType::Synonym);
        let view = TokenView::from(&token);

        assert_eq!(view.token_type.as_deref(), Some("Synonym"));
        assert_eq!(view.position_length, 2);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["text"], "ny");
        assert!(json.get("keyword").is_none());
    }

    #[test]
    fn test_absent_report_json() {
        let report = SynonymReport {
            path: "wn.pl".to_string(),
            format: "wordnet".to_string(),
            expand: true,
            ignore_case: false,
            loaded: false,
            reason: Some("no valid records".to_string()),
            rules: 0,
            max_source_len: 0,
            entries: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["loaded"], false);
        assert_eq!(json["reason"], "no valid records");
    }
}
