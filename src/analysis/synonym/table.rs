//! Synonym table with multi-token longest-match lookup.
//!
//! Source token sequences are stored in an FST keyed by the tokens joined with
//! a `0x00` separator. Walking the FST one token at a time finds every rule
//! that is a prefix of the remaining stream in a single pass, and the last
//! final state reached is the longest match.
//!
//! ```text
//! rules:   new york        → nyc
//!          new york city   → big apple
//!
//! keys:    "new\0york"        → 0
//!          "new\0york\0city"  → 1
//!
//! stream:  new york city hall
//!          ───┬───── ────
//!             └─ final after 2 tokens, final again after 3 → match len 3
//! ```

use std::collections::HashMap;
use std::fmt;

use fst::raw::{Fst, Node, Output};
use fst::{Map, MapBuilder};

use crate::error::{ExtensionError, Result};

/// Separator between tokens of a multi-token key.
pub const TOKEN_SEPARATOR: u8 = 0;

/// Targets for one source token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymEntry {
    /// Replacement token sequences in rule order, without duplicates.
    pub targets: Vec<Vec<String>>,
    /// Whether the matched tokens stay in the stream next to the targets.
    pub keep_original: bool,
}

/// A successful [`SynonymTable::longest_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymMatch<'a> {
    /// Number of tokens consumed.
    pub len: usize,
    pub entry: &'a SynonymEntry,
}

/// Immutable synonym lookup structure.
pub struct SynonymTable {
    map: Map<Vec<u8>>,
    entries: Vec<SynonymEntry>,
    max_source_len: usize,
    ignore_case: bool,
}

impl SynonymTable {
    /// Exact lookup of a source token sequence.
    pub fn lookup<S: AsRef<str>>(&self, source: &[S]) -> Option<&SynonymEntry> {
        let key = self.key(source.iter().map(AsRef::as_ref));
        let index = self.map.get(key)?;
        self.entries.get(index as usize)
    }

    /// Longest rule whose source is a prefix of `tokens`.
    pub fn longest_match<S: AsRef<str>>(&self, tokens: &[S]) -> Option<SynonymMatch<'_>> {
        let fst = self.map.as_fst();
        let mut node = fst.root();
        let mut output = Output::zero();
        let mut best = None;

        for (i, token) in tokens.iter().take(self.max_source_len).enumerate() {
            if i > 0 {
                match step(fst, node, output, TOKEN_SEPARATOR) {
                    Some((next, out)) => (node, output) = (next, out),
                    None => break,
                }
            }

            let normalized = self.normalize(token.as_ref());
            let mut matched = true;
            for &byte in normalized.as_bytes() {
                match step(fst, node, output, byte) {
                    Some((next, out)) => (node, output) = (next, out),
                    None => {
                        matched = false;
                        break;
                    }
                }
            }
            if !matched {
                break;
            }

            if node.is_final() {
                best = Some((i + 1, output.cat(node.final_output()).value()));
            }
        }

        let (len, index) = best?;
        let entry = self.entries.get(index as usize)?;
        Some(SynonymMatch { len, entry })
    }

    /// Longest single-token rule that is a prefix of `text`, compared
    /// character by character. Returns the matched length in bytes of `text`.
    pub fn longest_prefix(&self, text: &str) -> Option<(usize, &SynonymEntry)> {
        let fst = self.map.as_fst();
        let mut node = fst.root();
        let mut output = Output::zero();
        let mut best = None;
        let mut buf = [0u8; 4];

        'chars: for (offset, c) in text.char_indices() {
            let folded: Vec<char> = if self.ignore_case {
                c.to_lowercase().collect()
            } else {
                vec![c]
            };
            for fc in folded {
                for &byte in fc.encode_utf8(&mut buf).as_bytes() {
                    match step(fst, node, output, byte) {
                        Some((next, out)) => (node, output) = (next, out),
                        None => break 'chars,
                    }
                }
            }
            if node.is_final() {
                best = Some((
                    offset + c.len_utf8(),
                    output.cat(node.final_output()).value(),
                ));
            }
        }

        let (len, index) = best?;
        self.entries.get(index as usize).map(|entry| (len, entry))
    }

    /// Number of distinct source sequences.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token count of the longest source sequence.
    pub fn max_source_len(&self) -> usize {
        self.max_source_len
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// All source sequences with their entries, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<String>, &SynonymEntry)> {
        use fst::Streamer;

        let mut pairs = Vec::with_capacity(self.entries.len());
        let mut stream = self.map.stream();
        while let Some((key, index)) = stream.next() {
            if let Some(entry) = self.entries.get(index as usize) {
                let source = key
                    .split(|&b| b == TOKEN_SEPARATOR)
                    .map(|part| String::from_utf8_lossy(part).into_owned())
                    .collect();
                pairs.push((source, entry));
            }
        }
        pairs.into_iter()
    }

    fn normalize(&self, token: &str) -> String {
        if self.ignore_case {
            token.to_lowercase()
        } else {
            token.to_string()
        }
    }

    fn key<'a, I: Iterator<Item = &'a str>>(&self, tokens: I) -> Vec<u8> {
        let mut key = Vec::new();
        for (i, token) in tokens.enumerate() {
            if i > 0 {
                key.push(TOKEN_SEPARATOR);
            }
            key.extend_from_slice(self.normalize(token).as_bytes());
        }
        key
    }
}

fn step<'f>(fst: &'f Fst<Vec<u8>>, node: Node<'f>, output: Output, byte: u8) -> Option<(Node<'f>, Output)> {
    let index = node.find_input(byte)?;
    let transition = node.transition(index);
    Some((fst.node(transition.addr), output.cat(transition.out)))
}

impl fmt::Debug for SynonymTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynonymTable")
            .field("entries", &self.entries.len())
            .field("max_source_len", &self.max_source_len)
            .field("ignore_case", &self.ignore_case)
            .finish()
    }
}

/// Accumulates rules and builds a [`SynonymTable`].
///
/// Sources and targets must already be normalized (lowercased when the table
/// ignores case); query tokens are normalized by the table itself.
#[derive(Debug, Default)]
pub struct SynonymTableBuilder {
    ignore_case: bool,
    index: HashMap<Vec<String>, usize>,
    entries: Vec<SynonymEntry>,
}

impl SynonymTableBuilder {
    pub fn new(ignore_case: bool) -> Self {
        SynonymTableBuilder {
            ignore_case,
            ..Default::default()
        }
    }

    /// Add one `source → target` rule.
    ///
    /// Repeated sources accumulate targets; `keep_original` is kept if any
    /// rule for the source asked for it.
    pub fn add(&mut self, source: Vec<String>, target: Vec<String>, keep_original: bool) -> Result<()> {
        if source.is_empty() || source.iter().any(String::is_empty) {
            return Err(ExtensionError::parse("synonym source must not be empty"));
        }
        if target.is_empty() {
            return Err(ExtensionError::parse(format!(
                "synonym target for [{}] must not be empty",
                source.join(" ")
            )));
        }
        if source
            .iter()
            .any(|token| token.as_bytes().contains(&TOKEN_SEPARATOR))
        {
            return Err(ExtensionError::parse("synonym terms must not contain NUL"));
        }

        let index = match self.index.get(&source) {
            Some(&index) => index,
            None => {
                self.entries.push(SynonymEntry {
                    targets: Vec::new(),
                    keep_original: false,
                });
                let index = self.entries.len() - 1;
                self.index.insert(source, index);
                index
            }
        };

        let entry = &mut self.entries[index];
        entry.keep_original |= keep_original;
        if !entry.targets.contains(&target) {
            entry.targets.push(target);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the table, or `None` if no rule was added.
    pub fn build(self) -> Result<Option<SynonymTable>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut keyed: Vec<(Vec<u8>, usize)> = self
            .index
            .iter()
            .map(|(source, &index)| (source.join("\0").into_bytes(), index))
            .collect();
        keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let max_source_len = self.index.keys().map(Vec::len).max().unwrap_or(1);

        let mut builder = MapBuilder::memory();
        for (key, index) in keyed {
            builder
                .insert(&key, index as u64)
                .map_err(|e| ExtensionError::parse(format!("FST build error: {e}")))?;
        }
        let bytes = builder
            .into_inner()
            .map_err(|e| ExtensionError::parse(format!("FST finalize error: {e}")))?;
        let map = Map::new(bytes)
            .map_err(|e| ExtensionError::parse(format!("FST creation error: {e}")))?;

        Ok(Some(SynonymTable {
            map,
            entries: self.entries,
            max_source_len,
            ignore_case: self.ignore_case,
        }))
    }
}
