//! WordNet prolog synonym records.
//!
//! Each line is one record:
//!
//! ```text
//! s(synset_id,w_num,'word',ss_type,sense_number,tag_count).
//! ```
//!
//! Records sharing a synset id form one group of mutual synonyms. Lines that
//! do not parse are skipped one at a time.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::analysis::synonym::parser::{TermAnalyzer, add_group};
use crate::analysis::synonym::table::SynonymTableBuilder;
use crate::error::Result;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^s\((\d+),(\d+),'((?:[^']|'')*)',([nvasr]),(\d+),(\d+)\)\.?$")
        .expect("wordnet record pattern is valid")
});

/// One parsed `s(...)` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordnetRecord {
    pub synset_id: u64,
    pub word: String,
}

/// Parse a single record line, or `None` if it is malformed.
pub fn parse_record(line: &str) -> Option<WordnetRecord> {
    let captures = RECORD.captures(line.trim())?;
    let synset_id = captures.get(1)?.as_str().parse().ok()?;
    let word = captures.get(3)?.as_str().replace("''", "'");
    if word.trim().is_empty() {
        return None;
    }
    Some(WordnetRecord { synset_id, word })
}

/// Parse wordnet content into `builder` and return the number of valid lines.
pub fn parse_wordnet(
    content: &str,
    expand: bool,
    analyzer: &TermAnalyzer,
    builder: &mut SynonymTableBuilder,
) -> Result<usize> {
    let mut order: Vec<u64> = Vec::new();
    let mut synsets: HashMap<u64, Vec<Vec<String>>> = HashMap::new();
    let mut valid = 0;

    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(record) = parse_record(line) else {
            debug!("skipping malformed wordnet line {}: {}", number + 1, line);
            continue;
        };
        let tokens = match analyzer.analyze(&record.word) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!("skipping wordnet line {}: {}", number + 1, e);
                continue;
            }
        };

        valid += 1;
        let group = synsets.entry(record.synset_id).or_insert_with(|| {
            order.push(record.synset_id);
            Vec::new()
        });
        if !group.contains(&tokens) {
            group.push(tokens);
        }
    }

    for id in order {
        if let Some(group) = synsets.get(&id) {
            add_group(builder, group, expand)?;
        }
    }
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::synonym::parser::{SynonymFormat, SynonymParser};
    use crate::resource::ResourceParser;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record("s(100000001,1,'entity',n,1,11).").unwrap();
        assert_eq!(record.synset_id, 100000001);
        assert_eq!(record.word, "entity");

        let record = parse_record("s(100000002,2,'cat''s eye',n,1,0).").unwrap();
        assert_eq!(record.word, "cat's eye");

        assert!(parse_record("s(1,1,'unterminated,n,1,0).").is_none());
        assert!(parse_record("s(1,1,'word',q,1,0).").is_none());
        assert!(parse_record("garbage").is_none());
    }

    #[test]
    fn test_groups_by_synset() {
        let content = "\
s(100000001,1,'woods',n,1,0).
s(100000001,2,'wood',n,1,0).
s(100000001,3,'forest',n,1,0).
s(100000002,1,'wolfish',a,1,0).
s(100000002,2,'ravenous',a,1,0).
";
        let table = SynonymParser::new(SynonymFormat::Wordnet, true, false)
            .parse(content)
            .unwrap()
            .unwrap();

        assert_eq!(
            table.lookup(&["woods"]).unwrap().targets,
            vec![words("wood"), words("forest")]
        );
        assert_eq!(table.lookup(&["ravenous"]).unwrap().targets, vec![words("wolfish")]);
        assert!(table.lookup(&["woods"]).unwrap().keep_original);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "\
s(1,1,'alpha',n,1,0).
s(1,2,'beta',n,1,0).
this is not a record
s(1,3,'gamma',n,1,0).
s(2,1,'broken,n,1,0).
";
        let analyzer = TermAnalyzer::whitespace(false);
        let mut builder = SynonymTableBuilder::new(false);
        let valid = parse_wordnet(content, true, &analyzer, &mut builder).unwrap();
        assert_eq!(valid, 3);

        let table = builder.build().unwrap().unwrap();
        assert_eq!(
            table.lookup(&["alpha"]).unwrap().targets,
            vec![words("beta"), words("gamma")]
        );
    }

    #[test]
    fn test_unparseable_content_is_absent() {
        let parser = SynonymParser::new(SynonymFormat::Wordnet, true, false);
        assert!(parser.parse("nothing\nto see\n").unwrap().is_none());
    }

    #[test]
    fn test_single_word_synsets_add_nothing() {
        let parser = SynonymParser::new(SynonymFormat::Wordnet, true, false);
        assert!(parser.parse("s(1,1,'lonely',n,1,0).").unwrap().is_none());
    }

    #[test]
    fn test_contract_maps_to_first_word() {
        let content = "s(1,1,'car',n,1,0).\ns(1,2,'auto',n,1,0).\ns(1,3,'automobile',n,1,0).";
        let table = SynonymParser::new(SynonymFormat::Wordnet, false, false)
            .parse(content)
            .unwrap()
            .unwrap();

        assert!(table.lookup(&["car"]).is_none());
        assert_eq!(table.lookup(&["automobile"]).unwrap().targets, vec![words("car")]);
    }
}
