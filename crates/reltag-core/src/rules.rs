//! # Keyword Rule Matching
//!
//! Shared primitive behind the tag tables and the score blocks: a rule
//! fires when any of its keys occurs in the uppercased input, and a group of
//! rules yields at most one winner, the first that fires.

/// A containment rule carrying an outcome (a tag label or a score delta).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule<T> {
    /// Uppercase substrings; any one of them triggers the rule.
    pub keys: &'static [&'static str],
    /// What the rule produces when it fires.
    pub outcome: T,
}

impl<T> KeywordRule<T> {
    /// Creates a rule.
    pub const fn new(keys: &'static [&'static str], outcome: T) -> Self {
        Self { keys, outcome }
    }

    /// Returns `true` if any key occurs in `upper`.
    ///
    /// `upper` must already be uppercased; keys are stored uppercase.
    #[must_use]
    pub fn matches(&self, upper: &str) -> bool {
        self.keys.iter().any(|key| upper.contains(key))
    }
}

/// Returns the first rule of `group` that fires on `upper`.
///
/// Groups are ordered by priority, so this is "highest quality wins".
pub fn first_match<'a, T>(group: &'a [KeywordRule<T>], upper: &str) -> Option<&'a KeywordRule<T>> {
    group.iter().find(|rule| rule.matches(upper))
}

/// Uppercases the input the way every rule table expects.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP: &[KeywordRule<&str>] = &[
        KeywordRule::new(&["DTS-X"], "DTS-X"),
        KeywordRule::new(&["DTS-HD"], "DTS-HD"),
        KeywordRule::new(&["DTS"], "DTS"),
    ];

    #[test]
    fn any_key_triggers_rule() {
        let rule = KeywordRule::new(&["H265", "X265", "HEVC"], ());
        assert!(rule.matches("SHOW.HEVC.GROUP"));
        assert!(rule.matches("SHOW.X265"));
        assert!(!rule.matches("SHOW.X264"));
    }

    #[test]
    fn first_match_respects_priority() {
        let hit = first_match(GROUP, "MOVIE.DTS-HD.MA.DTS");
        assert_eq!(hit.map(|r| r.outcome), Some("DTS-HD"));

        let hit = first_match(GROUP, "MOVIE.DTS");
        assert_eq!(hit.map(|r| r.outcome), Some("DTS"));

        assert!(first_match(GROUP, "MOVIE.AAC").is_none());
    }

    #[test]
    fn normalize_uppercases_unicode() {
        assert_eq!(normalize("Straße.1080p"), "STRASSE.1080P");
        assert_eq!(normalize(""), "");
    }
}
