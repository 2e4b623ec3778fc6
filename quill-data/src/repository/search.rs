use regex::{Regex, RegexBuilder};

/// Compiled patterns are capped well below the regex crate's default.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Matches article titles against a search query.
///
/// The query is tried as a regular expression first; a query that does not
/// compile (`[draft`, `(wip`) is matched as a plain substring instead.
pub(crate) enum TitleMatcher {
    Pattern(Regex),
    Literal(String),
}

impl TitleMatcher {
    pub(crate) fn new(query: &str) -> Self {
        match RegexBuilder::new(query).size_limit(PATTERN_SIZE_LIMIT).build() {
            Ok(pattern) => TitleMatcher::Pattern(pattern),
            Err(err) => {
                tracing::debug!(query, error = %err, "search query is not a valid pattern, matching literally");
                TitleMatcher::Literal(query.to_string())
            }
        }
    }

    pub(crate) fn matches(&self, title: &str) -> bool {
        match self {
            TitleMatcher::Pattern(pattern) => pattern.is_match(title),
            TitleMatcher::Literal(needle) => title.contains(needle.as_str()),
        }
    }
}
