//! Synonym rule parsing.
//!
//! Two text formats are understood:
//!
//! ```text
//! # simple: mutual groups and one-way rules
//! i-pod, ipod, i pod
//! sea biscuit, sea biscit => seabiscuit
//! a\,b, comma
//!
//! # wordnet prolog records
//! s(100000001,1,'abstain',v,1,0).
//! s(100000001,2,'refrain',v,1,0).
//! ```
//!
//! Every term is run through a [`TermAnalyzer`] so that multi-word terms are
//! split and normalized the same way query text is.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::synonym::table::{SynonymTable, SynonymTableBuilder};
use crate::analysis::synonym::wordnet;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{ExtensionError, Result};
use crate::resource::ResourceParser;

/// Synonym file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynonymFormat {
    #[default]
    #[serde(alias = "solr")]
    Simple,
    Wordnet,
}

impl FromStr for SynonymFormat {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "simple" | "solr" => Ok(SynonymFormat::Simple),
            "wordnet" => Ok(SynonymFormat::Wordnet),
            other => Err(ExtensionError::config(format!(
                "unknown synonym format '{other}', expected 'simple' or 'wordnet'"
            ))),
        }
    }
}

impl fmt::Display for SynonymFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynonymFormat::Simple => f.write_str("simple"),
            SynonymFormat::Wordnet => f.write_str("wordnet"),
        }
    }
}

/// Splits a rule term into normalized tokens.
#[derive(Clone)]
pub struct TermAnalyzer {
    analyzer: Arc<dyn Analyzer>,
}

impl TermAnalyzer {
    /// Whitespace tokenization, lowercased when `ignore_case` is set.
    pub fn whitespace(ignore_case: bool) -> Self {
        let mut analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .with_name("synonym_terms");
        if ignore_case {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        TermAnalyzer {
            analyzer: Arc::new(analyzer),
        }
    }

    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        TermAnalyzer { analyzer }
    }

    /// Tokens of `term`; a term without any token is an error.
    pub fn analyze(&self, term: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .analyzer
            .analyze(term)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        if tokens.is_empty() || tokens.iter().any(String::is_empty) {
            return Err(ExtensionError::parse(format!(
                "term '{term}' was analyzed to an empty token sequence"
            )));
        }
        Ok(tokens)
    }
}

impl fmt::Debug for TermAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermAnalyzer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

/// Add a mutual group to `builder`.
///
/// With `expand` every term maps to every other term and keeps itself in the
/// stream. Without it every term is replaced by the first one.
pub fn add_group(builder: &mut SynonymTableBuilder, terms: &[Vec<String>], expand: bool) -> Result<()> {
    if expand {
        for (i, source) in terms.iter().enumerate() {
            for (j, target) in terms.iter().enumerate() {
                if i != j {
                    builder.add(source.clone(), target.clone(), true)?;
                }
            }
        }
    } else if let Some((first, rest)) = terms.split_first() {
        for source in rest {
            if source != first {
                builder.add(source.clone(), first.clone(), false)?;
            }
        }
    }
    Ok(())
}

/// Parse the simple format into `builder`. Any bad line fails the whole parse.
pub fn parse_simple(
    content: &str,
    expand: bool,
    analyzer: &TermAnalyzer,
    builder: &mut SynonymTableBuilder,
) -> Result<()> {
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_simple_line(line, expand, analyzer, builder)
            .map_err(|e| ExtensionError::parse(format!("line {}: {e}", number + 1)))?;
    }
    Ok(())
}

fn parse_simple_line(
    line: &str,
    expand: bool,
    analyzer: &TermAnalyzer,
    builder: &mut SynonymTableBuilder,
) -> Result<()> {
    let sides = split_unescaped(line, "=>");
    match sides.as_slice() {
        [group] => {
            let terms = analyze_terms(group, analyzer)?;
            add_group(builder, &terms, expand)
        }
        [inputs, outputs] => {
            let inputs = analyze_terms(inputs, analyzer)?;
            let outputs = analyze_terms(outputs, analyzer)?;
            if inputs.is_empty() || outputs.is_empty() {
                return Err(ExtensionError::parse(format!(
                    "both sides of '=>' need at least one term: {line}"
                )));
            }
            for input in &inputs {
                for output in &outputs {
                    builder.add(input.clone(), output.clone(), false)?;
                }
            }
            Ok(())
        }
        _ => Err(ExtensionError::parse(format!(
            "more than one explicit mapping specified on the same line: {line}"
        ))),
    }
}

fn analyze_terms(side: &str, analyzer: &TermAnalyzer) -> Result<Vec<Vec<String>>> {
    split_unescaped(side, ",")
        .iter()
        .map(|term| unescape(term.trim()))
        .filter(|term| !term.is_empty())
        .map(|term| analyzer.analyze(&term))
        .collect()
}

/// Split on `separator`, leaving backslash escapes in place.
fn split_unescaped(text: &str, separator: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            current.push(c);
            rest = &rest[1..];
            if let Some(escaped) = rest.chars().next() {
                current.push(escaped);
                rest = &rest[escaped.len_utf8()..];
            }
        } else if rest.starts_with(separator) {
            parts.push(std::mem::take(&mut current));
            rest = &rest[separator.len()..];
        } else {
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    parts.push(current);
    parts
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// [`ResourceParser`] producing an optional [`SynonymTable`].
///
/// An empty or comment-only file yields `None`, which consumers treat as
/// "synonyms disabled".
#[derive(Debug, Clone)]
pub struct SynonymParser {
    format: SynonymFormat,
    expand: bool,
    ignore_case: bool,
    analyzer: TermAnalyzer,
}

impl SynonymParser {
    pub fn new(format: SynonymFormat, expand: bool, ignore_case: bool) -> Self {
        SynonymParser {
            format,
            expand,
            ignore_case,
            analyzer: TermAnalyzer::whitespace(ignore_case),
        }
    }

    /// Use a custom analyzer for rule terms.
    ///
    /// The analyzer must lowercase when `ignore_case` is set, since query
    /// tokens are lowercased by the table.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = TermAnalyzer::new(analyzer);
        self
    }

    pub fn format(&self) -> SynonymFormat {
        self.format
    }

    pub fn expand(&self) -> bool {
        self.expand
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn analyzer(&self) -> &TermAnalyzer {
        &self.analyzer
    }
}

impl ResourceParser for SynonymParser {
    type Output = Option<SynonymTable>;

    fn parse(&self, content: &str) -> Result<Self::Output> {
        let mut builder = SynonymTableBuilder::new(self.ignore_case);
        match self.format {
            SynonymFormat::Simple => {
                parse_simple(content, self.expand, &self.analyzer, &mut builder)?;
            }
            SynonymFormat::Wordnet => {
                let valid =
                    wordnet::parse_wordnet(content, self.expand, &self.analyzer, &mut builder)?;
                if valid == 0 {
                    warn!("no valid wordnet record found; synonyms are disabled");
                    return Ok(None);
                }
            }
        }

        let table = builder.build()?;
        if table.is_none() {
            debug!("synonym content produced no rules");
        }
        Ok(table)
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}
