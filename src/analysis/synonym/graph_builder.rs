//! Token graph construction for matched synonyms.
//!
//! Output is interleaved position by position so the stream stays ordered:
//! at each position of the match the original token comes first, then the
//! word of every target that falls on that position, stacked with
//! `position_increment = 0`.
//!
//! ```text
//! rule:   ny => new york           (keep original)
//!
//!   pos 0: "ny"   inc=1 len=1
//!   pos 0: "new"  inc=0 len=1
//!   pos 1: "york" inc=1 len=1
//!
//! rule:   new york => ny           (keep original)
//!
//!   pos 0: "new"  inc=1 len=1
//!   pos 0: "ny"   inc=0 len=2      ← spans both matched positions
//!   pos 1: "york" inc=1 len=1
//! ```

use crate::analysis::synonym::table::SynonymEntry;
use crate::analysis::token::{Token, TokenType};

/// Build the tokens replacing `matched` according to `entry`.
///
/// `matched` must not be empty. The first emitted token inherits the first
/// matched token's position increment so gaps left by removed tokens survive.
pub fn build_graph_tokens(matched: &[Token], entry: &SynonymEntry) -> Vec<Token> {
    let Some(first) = matched.first() else {
        return Vec::new();
    };
    let match_len = matched.len();
    let start_offset = first.start_offset;
    let end_offset = matched.last().map_or(first.end_offset, |t| t.end_offset);
    let depth = entry
        .targets
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(match_len);

    let mut result = Vec::new();
    for k in 0..depth {
        let mut emitted_here = false;
        let increment = |emitted_here: bool| match (emitted_here, k) {
            (true, _) => 0,
            (false, 0) => first.position_increment,
            (false, _) => 1,
        };

        if entry.keep_original {
            if let Some(original) = matched.get(k) {
                let mut token = original.clone();
                token.position_increment = increment(emitted_here);
                token.position_length = 1;
                result.push(token);
                emitted_here = true;
            }
        }

        for target in &entry.targets {
            let Some(word) = target.get(k) else {
                continue;
            };
            let position_length = if k + 1 == target.len() && target.len() < match_len {
                match_len - k
            } else {
                1
            };
            let token = Token::with_offsets(word.clone(), first.position + k, start_offset, end_offset)
                .with_position_increment(increment(emitted_here))
                .with_position_length(position_length)
                .with_token_type(TokenType::Synonym);
            result.push(token);
            emitted_here = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(targets: &[&str], keep_original: bool) -> SynonymEntry {
        SynonymEntry {
            targets: targets
                .iter()
                .map(|t| t.split_whitespace().map(str::to_string).collect())
                .collect(),
            keep_original,
        }
    }

    fn tokens(text: &str) -> Vec<Token> {
        let mut offset = 0;
        text.split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                let token = Token::with_offsets(word, i, offset, offset + word.len());
                offset += word.len() + 1;
                token
            })
            .collect()
    }

    fn summary(tokens: &[Token]) -> Vec<(&str, usize, usize)> {
        tokens
            .iter()
            .map(|t| (t.text.as_str(), t.position_increment, t.position_length))
            .collect()
    }

    #[test]
    fn test_single_word_synonym() {
        let result = build_graph_tokens(&tokens("big"), &entry(&["large", "huge"], true));
        assert_eq!(
            summary(&result),
            vec![("big", 1, 1), ("large", 0, 1), ("huge", 0, 1)]
        );
        assert_eq!(result[1].token_type(), Some(TokenType::Synonym));
    }

    #[test]
    fn test_multi_word_source_single_word_target() {
        let result = build_graph_tokens(&tokens("new york"), &entry(&["ny"], true));
        assert_eq!(
            summary(&result),
            vec![("new", 1, 1), ("ny", 0, 2), ("york", 1, 1)]
        );
        assert_eq!(result[1].start_offset, 0);
        assert_eq!(result[1].end_offset, 8);
    }

    #[test]
    fn test_multi_word_target() {
        let result = build_graph_tokens(&tokens("ml"), &entry(&["machine learning"], true));
        assert_eq!(
            summary(&result),
            vec![("ml", 1, 1), ("machine", 0, 1), ("learning", 1, 1)]
        );
        assert_eq!(result[2].position, 1);
    }

    #[test]
    fn test_replace_without_original() {
        let result = build_graph_tokens(&tokens("sea biscit"), &entry(&["seabiscuit"], false));
        assert_eq!(summary(&result), vec![("seabiscuit", 1, 2)]);
    }

    #[test]
    fn test_inherits_position_gap() {
        let mut matched = tokens("big");
        matched[0].position_increment = 3;
        let result = build_graph_tokens(&matched, &entry(&["large"], false));
        assert_eq!(result[0].position_increment, 3);
    }
}
