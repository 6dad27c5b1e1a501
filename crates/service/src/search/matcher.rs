/// How letter case is treated when comparing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFold {
    Sensitive,
    Insensitive,
}

/// Whether the needle may appear anywhere or must equal the whole field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Contains,
    Exact,
}

/// Text predicate shared by every product repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub mode: MatchMode,
    pub fold: CaseFold,
}

impl TextMatch {
    pub const CONTAINS_IGNORE_CASE: TextMatch = TextMatch { mode: MatchMode::Contains, fold: CaseFold::Insensitive };
    pub const EXACT_IGNORE_CASE: TextMatch = TextMatch { mode: MatchMode::Exact, fold: CaseFold::Insensitive };

    pub fn matches(&self, haystack: &str, needle: &str) -> bool {
        match self.fold {
            CaseFold::Sensitive => self.compare(haystack, needle),
            CaseFold::Insensitive => self.compare(&haystack.to_lowercase(), &needle.to_lowercase()),
        }
    }

    fn compare(&self, haystack: &str, needle: &str) -> bool {
        match self.mode {
            MatchMode::Contains => haystack.contains(needle),
            MatchMode::Exact => haystack == needle,
        }
    }

    /// Regex equivalent for stores with native regex queries; the needle is
    /// matched literally.
    pub fn regex_pattern(&self, needle: &str) -> String {
        let escaped = regex::escape(needle);
        match self.mode {
            MatchMode::Contains => escaped,
            MatchMode::Exact => format!("^{escaped}$"),
        }
    }

    /// Regex flags matching [`TextMatch::regex_pattern`].
    pub fn regex_options(&self) -> &'static str {
        match self.fold {
            CaseFold::Sensitive => "",
            CaseFold::Insensitive => "i",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::RegexBuilder;

    fn to_regex(m: TextMatch, needle: &str) -> regex::Regex {
        RegexBuilder::new(&m.regex_pattern(needle))
            .case_insensitive(m.fold == CaseFold::Insensitive)
            .build()
            .unwrap()
    }

    #[test]
    fn contains_ignores_case() {
        let m = TextMatch::CONTAINS_IGNORE_CASE;
        assert!(m.matches("Wireless Mouse", "mouse"));
        assert!(m.matches("Wireless Mouse", "LESS MO"));
        assert!(!m.matches("Wireless Mouse", "keyboard"));
    }

    #[test]
    fn exact_rejects_partial() {
        let m = TextMatch::EXACT_IGNORE_CASE;
        assert!(m.matches("Electronics", "electronics"));
        assert!(!m.matches("Electronics", "electron"));
        assert!(!m.matches("Consumer Electronics", "electronics"));
    }

    #[test]
    fn sensitive_fold_respects_case() {
        let m = TextMatch { mode: MatchMode::Contains, fold: CaseFold::Sensitive };
        assert!(m.matches("Mouse", "Mou"));
        assert!(!m.matches("Mouse", "mou"));
        assert_eq!(m.regex_options(), "");
    }

    #[test]
    fn regex_pattern_escapes_metacharacters() {
        let m = TextMatch::CONTAINS_IGNORE_CASE;
        assert_eq!(m.regex_pattern("c++ (pro)"), r"c\+\+ \(pro\)");
        assert_eq!(TextMatch::EXACT_IGNORE_CASE.regex_pattern("a.b"), r"^a\.b$");
        assert_eq!(m.regex_options(), "i");
    }

    proptest! {
        #[test]
        fn any_substring_is_found(s in "[a-zA-Z0-9 .+*?()]{1,24}", start in 0usize..24, len in 1usize..24) {
            let chars: Vec<char> = s.chars().collect();
            let start = start % chars.len();
            let end = (start + len).min(chars.len());
            let needle: String = chars[start..end].iter().collect::<String>().to_uppercase();
            prop_assert!(TextMatch::CONTAINS_IGNORE_CASE.matches(&s, &needle));
        }

        #[test]
        fn regex_translation_agrees_with_predicate(hay in "[a-zA-Z .+()]{0,16}", needle in "[a-zA-Z .+()]{1,4}") {
            for m in [TextMatch::CONTAINS_IGNORE_CASE, TextMatch::EXACT_IGNORE_CASE] {
                prop_assert_eq!(m.matches(&hay, &needle), to_regex(m, &needle).is_match(&hay));
            }
        }
    }
}
