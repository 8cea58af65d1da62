//! Whitespace cleanup for extracted page text.
//!
//! Layout-based extraction tends to produce letter-spaced words
//! ("w i t h o u t"), doubled spaces between text boxes, and spaced-out
//! ellipses. The pipeline below undoes those artifacts before matching.
//! The four steps run in a fixed order; each one sees the output of the
//! previous step.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static MULTI_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

static SPACED_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s\.\s").unwrap());

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Options for text cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    /// NFC-normalize and expand ligatures (ﬁ, ﬂ, ...) before the whitespace steps.
    pub normalize_unicode: bool,
}

impl CleanupOptions {
    /// Create default options (whitespace steps only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        if self.options.normalize_unicode {
            cleanup(&normalize_unicode(text))
        } else {
            cleanup(text)
        }
    }
}

/// Run the four whitespace steps with default options.
pub fn cleanup(text: &str) -> String {
    let result = merge_spaced_letters(text);
    let result = join_fragments(&result);
    let result = collapse_whitespace(&result);
    collapse_spaced_dots(&result)
}

/// Step 1: drop a whitespace character that follows two whitespace
/// characters and a word character.
pub fn merge_spaced_letters(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let merge = c.is_whitespace()
                && i >= 3
                && chars[i - 3].is_whitespace()
                && chars[i - 2].is_whitespace()
                && is_word_char(chars[i - 1]);
            !merge
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Step 2: drop a whitespace character preceded by `word word` or
/// `word space word` unless two word characters follow it.
///
/// Every position is judged against the input string, not against the
/// partially rewritten output.
pub fn join_fragments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let word_at = |i: usize| chars.get(i).copied().is_some_and(is_word_char);

    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if !c.is_whitespace() || (word_at(i + 1) && word_at(i + 2)) {
                return true;
            }
            let after_pair = i >= 2 && word_at(i - 2) && word_at(i - 1);
            let after_spaced_pair =
                i >= 3 && word_at(i - 3) && chars[i - 2].is_whitespace() && word_at(i - 1);
            !(after_pair || after_spaced_pair)
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Step 3: collapse any run of two or more whitespace characters to one space.
pub fn collapse_whitespace(text: &str) -> String {
    MULTI_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Step 4: turn `. . ` into a bare `..`.
pub fn collapse_spaced_dots(text: &str) -> String {
    SPACED_DOTS.replace_all(text, "..").into_owned()
}

/// NFC normalization plus ligature expansion.
pub fn normalize_unicode(text: &str) -> String {
    let mut result: String = text.nfc().collect();
    for (ligature, replacement) in LIGATURES {
        result = result.replace(ligature, replacement);
    }
    result
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
