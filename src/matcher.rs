//! Keyword matching for the privative/absence lexicon.
//!
//! A single case-insensitive pattern recognizes the whole family
//! ("with no", "without", "-less", "absence", "privation", "caritive",
//! "abessive"). Every hit keeps its byte span and the family alternative
//! that produced it, so later stages never need to re-scan the text.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Connectives that the `-less` family picks up but which never express absence.
pub const EXCLUDED_TERMS: [&str; 4] = ["unless", "regardless", "nevertheless", "nonetheless"];

/// A `without` directly preceded by this phrase (any case) is a copyright
/// notice, not a finding.
const REPRODUCTION_NOTICE: &str = "reproduction prohibited ";

/// The compiled keyword pattern, one named group per family.
pub static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = KeywordFamily::ALL
        .iter()
        .map(|family| format!("(?P<{}>{})", family.group_name(), family.fragment()))
        .collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

/// The alternatives of the keyword pattern, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeywordFamily {
    /// "with no"
    WithNo,
    /// caritive, caritives, ...
    Caritive,
    /// abessive, abessives, ...
    Abessive,
    /// privative, privation, ...
    Privative,
    /// "without"
    Without,
    /// any word containing "less": homeless, lessee, ...
    Less,
    /// absent, absence, ...
    Absence,
}

impl KeywordFamily {
    /// All families in the order they appear in the pattern.
    pub const ALL: [KeywordFamily; 7] = [
        KeywordFamily::WithNo,
        KeywordFamily::Caritive,
        KeywordFamily::Abessive,
        KeywordFamily::Privative,
        KeywordFamily::Without,
        KeywordFamily::Less,
        KeywordFamily::Absence,
    ];

    /// Regex fragment for this family.
    pub fn fragment(self) -> &'static str {
        match self {
            KeywordFamily::WithNo => r"with no\b",
            KeywordFamily::Caritive => r"cariti\w+",
            KeywordFamily::Abessive => r"abessi\w+",
            KeywordFamily::Privative => r"privati\w+",
            KeywordFamily::Without => r"without",
            KeywordFamily::Less => r"\w+less\w*",
            KeywordFamily::Absence => r"absen\w+",
        }
    }

    fn group_name(self) -> &'static str {
        match self {
            KeywordFamily::WithNo => "with_no",
            KeywordFamily::Caritive => "caritive",
            KeywordFamily::Abessive => "abessive",
            KeywordFamily::Privative => "privative",
            KeywordFamily::Without => "without",
            KeywordFamily::Less => "less",
            KeywordFamily::Absence => "absence",
        }
    }
}

impl fmt::Display for KeywordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KeywordFamily::WithNo => "with no",
            KeywordFamily::Caritive => "cariti-",
            KeywordFamily::Abessive => "abessi-",
            KeywordFamily::Privative => "privati-",
            KeywordFamily::Without => "without",
            KeywordFamily::Less => "-less",
            KeywordFamily::Absence => "absen-",
        };
        f.write_str(label)
    }
}

/// One keyword occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// The literal text that matched
    pub term: String,
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// Pattern alternative that produced the match
    pub family: KeywordFamily,
}

/// Exclusion-filtered matches of one text, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMatches {
    matches: Vec<KeywordMatch>,
}

impl PageMatches {
    /// The literal matched substrings, duplicates included.
    pub fn terms(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.term.as_str()).collect()
    }

    /// Iterate over the matches.
    pub fn iter(&self) -> std::slice::Iter<'_, KeywordMatch> {
        self.matches.iter()
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if no match survived the exclusion list.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Disjunction of exactly the matched literals, or `None` when empty.
    pub fn pattern(&self) -> Result<Option<Regex>> {
        if self.matches.is_empty() {
            return Ok(None);
        }
        let source = self
            .matches
            .iter()
            .map(|m| regex::escape(&m.term))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Some(Regex::new(&source)?))
    }

    /// Whether the page these matches came from counts as a finding.
    pub fn is_accepted(&self, text: &str) -> Result<bool> {
        let non_empty = self.matches.iter().any(|m| m.end > m.start);
        if !non_empty {
            return Ok(false);
        }
        Ok(self.pattern()?.is_some_and(|re| re.is_match(text)))
    }

    /// Hit counts per family.
    pub fn by_family(&self) -> BTreeMap<KeywordFamily, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.family).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a PageMatches {
    type Item = &'a KeywordMatch;
    type IntoIter = std::slice::Iter<'a, KeywordMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Whether a matched term is on the exclusion list.
pub fn is_excluded(term: &str) -> bool {
    let lower = term.to_lowercase();
    EXCLUDED_TERMS.contains(&lower.as_str())
}

/// Every keyword occurrence in `text`, before exclusion.
pub fn scan(text: &str) -> Vec<KeywordMatch> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = KEYWORD_PATTERN.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let family = KeywordFamily::ALL
            .into_iter()
            .find(|f| caps.name(f.group_name()).is_some())
            .unwrap_or(KeywordFamily::Less);

        if family == KeywordFamily::Without && follows_reproduction_notice(text, whole.start()) {
            pos = next_char_boundary(text, whole.start());
            continue;
        }

        found.push(KeywordMatch {
            term: whole.as_str().to_string(),
            start: whole.start(),
            end: whole.end(),
            family,
        });
        pos = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_char_boundary(text, whole.end())
        };
    }

    found
}

/// Scan `text` and drop excluded connectives.
pub fn find_matches(text: &str) -> PageMatches {
    let matches = scan(text)
        .into_iter()
        .filter(|m| !is_excluded(&m.term))
        .collect();
    PageMatches { matches }
}

fn follows_reproduction_notice(text: &str, start: usize) -> bool {
    let prefix = &text[..start];
    let Some(from) = prefix.len().checked_sub(REPRODUCTION_NOTICE.len()) else {
        return false;
    };
    prefix
        .get(from..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(REPRODUCTION_NOTICE))
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| from + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_family_members_in_order() {
        let text = "A homeless man, without shelter, with no food, in absentia.";
        let matches = find_matches(text);
        assert_eq!(matches.terms(), vec!["homeless", "without", "with no", "absentia"]);

        let families: Vec<_> = matches.iter().map(|m| m.family).collect();
        assert_eq!(
            families,
            vec![
                KeywordFamily::Less,
                KeywordFamily::Without,
                KeywordFamily::WithNo,
                KeywordFamily::Absence
            ]
        );
    }

    #[test]
    fn test_spans_point_at_terms() {
        let text = "Stated WITHOUT prejudice";
        let matches = find_matches(text);
        let m = matches.iter().next().unwrap();
        assert_eq!(&text[m.start..m.end], "WITHOUT");
        assert_eq!(m.term, "WITHOUT");
    }

    #[test]
    fn test_exclusion_list() {
        let text = "Unless stated, regardless of cost, nevertheless and nonetheless.";
        assert_eq!(scan(text).len(), 4);
        let matches = find_matches(text);
        assert!(matches.is_empty());
        assert!(!matches.is_accepted(text).unwrap());
    }

    #[test]
    fn test_no_keywords_is_not_accepted() {
        let text = "The quarterly figures were published on time.";
        let matches = find_matches(text);
        assert!(matches.is_empty());
        assert!(matches.pattern().unwrap().is_none());
        assert!(!matches.is_accepted(text).unwrap());
    }

    #[test]
    fn test_duplicates_kept_positionally() {
        let text = "helpless and helpless again, unless hopeless";
        let matches = find_matches(text);
        assert_eq!(matches.terms(), vec!["helpless", "helpless", "hopeless"]);
        assert_eq!(matches.by_family().get(&KeywordFamily::Less), Some(&3));
    }

    #[test]
    fn test_reproduction_notice_is_skipped() {
        let text = "Reproduction prohibited without permission.";
        assert!(find_matches(text).is_empty());

        let text = "Reproduction allowed without permission.";
        assert_eq!(find_matches(text).terms(), vec!["without"]);
    }

    #[test]
    fn test_with_no_needs_word_boundary() {
        assert!(find_matches("with nothing").is_empty());
        assert_eq!(find_matches("with no end").terms(), vec!["with no"]);
    }

    #[test]
    fn test_rebuilt_pattern_matches_source() {
        let text = "a price_less item";
        let matches = find_matches(text);
        assert_eq!(matches.terms(), vec!["price_less"]);
        let pattern = matches.pattern().unwrap().unwrap();
        assert!(pattern.is_match(text));
        assert!(matches.is_accepted(text).unwrap());
    }

    #[test]
    fn test_privative_and_caritive() {
        let text = "Privative forms, the caritive case and the abessive.";
        let matches = find_matches(text);
        assert_eq!(matches.terms(), vec!["Privative", "caritive", "abessive"]);
    }

    #[test]
    fn test_is_excluded_case_insensitive() {
        assert!(is_excluded("UNLESS"));
        assert!(is_excluded("Regardless"));
        assert!(!is_excluded("homeless"));
    }
}
