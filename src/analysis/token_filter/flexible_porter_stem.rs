//! Porter stemming with individually switchable steps.
//!
//! The classic algorithm runs six steps in order:
//!
//! 1. plurals and `-ed`/`-ing` (`caresses` → `caress`, `motoring` → `motor`)
//! 2. terminal `y` to `i` when the stem has a vowel (`happy` → `happi`)
//! 3. double suffixes to single ones (`relational` → `relate`)
//! 4. `-ic-`, `-full`, `-ness` and similar (`hopeful` → `hope`)
//! 5. `-ant`, `-ence` and similar on long stems (`adjustment` → `adjust`)
//! 6. final `-e` and `-ll` (`probate` → `probat`, `controll` → `control`)
//!
//! Each step can be disabled, which gives a lighter stemmer (for example
//! plural folding only) without a separate implementation. Tokens marked as
//! keywords are never stemmed.

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Which of the six Porter steps to apply. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorterSteps {
    pub step1: bool,
    pub step2: bool,
    pub step3: bool,
    pub step4: bool,
    pub step5: bool,
    pub step6: bool,
}

impl Default for PorterSteps {
    fn default() -> Self {
        PorterSteps {
            step1: true,
            step2: true,
            step3: true,
            step4: true,
            step5: true,
            step6: true,
        }
    }
}

/// Porter stemmer running only the enabled steps.
#[derive(Debug, Clone, Default)]
pub struct FlexiblePorterStemmer {
    steps: PorterSteps,
}

impl FlexiblePorterStemmer {
    pub fn new(steps: PorterSteps) -> Self {
        FlexiblePorterStemmer { steps }
    }

    pub fn steps(&self) -> PorterSteps {
        self.steps
    }

    /// Stem a lowercase word. Words of one or two characters are returned as is.
    pub fn stem(&self, word: &str) -> String {
        let mut w = Word::new(word);
        if w.b.len() <= 2 {
            return word.to_string();
        }

        if self.steps.step1 {
            w.step1();
        }
        if self.steps.step2 {
            w.step2();
        }
        if self.steps.step3 {
            w.step3();
        }
        if self.steps.step4 {
            w.step4();
        }
        if self.steps.step5 {
            w.step5();
        }
        if self.steps.step6 {
            w.step6();
        }

        w.b.into_iter().collect()
    }
}

/// Working buffer. `stem` is the length of the part before the suffix most
/// recently matched by [`Word::ends`].
struct Word {
    b: Vec<char>,
    stem: usize,
}

impl Word {
    fn new(word: &str) -> Self {
        let b: Vec<char> = word.chars().collect();
        let stem = b.len();
        Word { b, stem }
    }

    fn end(&self) -> usize {
        self.b.len()
    }

    fn last(&self) -> Option<char> {
        self.b.last().copied()
    }

    /// Whether `b[i]` is a consonant; `y` is one unless it follows a consonant.
    fn cons(&self, i: usize) -> bool {
        match self.b[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..stem]`.
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        while i < self.stem && self.cons(i) {
            i += 1;
        }
        loop {
            while i < self.stem && !self.cons(i) {
                i += 1;
            }
            if i >= self.stem {
                return n;
            }
            while i < self.stem && self.cons(i) {
                i += 1;
            }
            n += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.stem).any(|i| !self.cons(i))
    }

    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.cons(i)
    }

    /// consonant-vowel-consonant ending at `i`, the last not `w`, `x` or `y`.
    fn cvc(&self, i: usize) -> bool {
        i >= 2
            && self.cons(i)
            && !self.cons(i - 1)
            && self.cons(i - 2)
            && !matches!(self.b[i], 'w' | 'x' | 'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let suffix: Vec<char> = suffix.chars().collect();
        if suffix.len() > self.end() || !self.b.ends_with(&suffix) {
            return false;
        }
        self.stem = self.end() - suffix.len();
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.stem);
        self.b.extend(replacement.chars());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    fn truncate(&mut self, len: usize) {
        self.b.truncate(len);
        self.stem = self.end();
    }

    fn step1(&mut self) {
        if self.last() == Some('s') {
            if self.ends("sses") {
                let len = self.end() - 2;
                self.truncate(len);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.end() - 2] != 's' {
                let len = self.end() - 1;
                self.truncate(len);
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                let len = self.end() - 1;
                self.truncate(len);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            let len = self.stem;
            self.truncate(len);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.end() - 1) {
                if !matches!(self.last(), Some('l' | 's' | 'z')) {
                    let len = self.end() - 1;
                    self.truncate(len);
                }
            } else {
                self.stem = self.end();
                if self.measure() == 1 && self.cvc(self.end() - 1) {
                    self.b.push('e');
                }
            }
        }
        self.stem = self.end();
    }

    fn step2(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.end() - 1;
            self.b[last] = 'i';
        }
        self.stem = self.end();
    }

    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        if self.end() < 2 {
            return;
        }
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                break;
            }
        }
        self.stem = self.end();
    }

    fn step3(&mut self) {
        self.replace_first(&[
            ("ational", "ate"),
            ("tional", "tion"),
            ("enci", "ence"),
            ("anci", "ance"),
            ("izer", "ize"),
            ("bli", "ble"),
            ("alli", "al"),
            ("entli", "ent"),
            ("eli", "e"),
            ("ousli", "ous"),
            ("ization", "ize"),
            ("ation", "ate"),
            ("ator", "ate"),
            ("alism", "al"),
            ("iveness", "ive"),
            ("fulness", "ful"),
            ("ousness", "ous"),
            ("aliti", "al"),
            ("iviti", "ive"),
            ("biliti", "ble"),
            ("logi", "log"),
        ]);
    }

    fn step4(&mut self) {
        self.replace_first(&[
            ("icate", "ic"),
            ("ative", ""),
            ("alize", "al"),
            ("iciti", "ic"),
            ("ical", "ic"),
            ("ful", ""),
            ("ness", ""),
        ]);
    }

    fn step5(&mut self) {
        const SUFFIXES: [&str; 19] = [
            "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion",
            "ou", "ism", "ate", "iti", "ous", "ive", "ize",
        ];

        let Some(suffix) = SUFFIXES.iter().find(|suffix| self.ends(suffix)) else {
            self.stem = self.end();
            return;
        };
        if *suffix == "ion" && !(self.stem > 0 && matches!(self.b[self.stem - 1], 's' | 't')) {
            self.stem = self.end();
            return;
        }
        if self.measure() > 1 {
            let len = self.stem;
            self.truncate(len);
        }
        self.stem = self.end();
    }

    fn step6(&mut self) {
        self.stem = self.end();
        if self.last() == Some('e') {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.end() - 2)) {
                let len = self.end() - 1;
                self.truncate(len);
            }
        }
        if self.last() == Some('l') && self.double_consonant(self.end() - 1) && self.measure() > 1 {
            let len = self.end() - 1;
            self.truncate(len);
        }
    }
}

/// Applies [`FlexiblePorterStemmer`] to every non-keyword token.
#[derive(Debug, Clone, Default)]
pub struct FlexiblePorterStemFilter {
    stemmer: FlexiblePorterStemmer,
}

impl FlexiblePorterStemFilter {
    pub fn new(steps: PorterSteps) -> Self {
        FlexiblePorterStemFilter {
            stemmer: FlexiblePorterStemmer::new(steps),
        }
    }

    pub fn stemmer(&self) -> &FlexiblePorterStemmer {
        &self.stemmer
    }
}

impl Filter for FlexiblePorterStemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = self.stemmer.clone();
        Ok(Box::new(tokens.map(move |mut token| {
            if !token.is_keyword() && !token.is_stopped() {
                token.text = stemmer.stem(&token.text);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "flexible_porter_stem"
    }
}
