use regex::Regex;

use dockscope_types::LogEntry;

/// Compiled content filter for log entries
///
/// Case-insensitive matching is folded into the compiled regex so the
/// per-entry match stays allocation free.
#[derive(Clone)]
pub struct CompiledFilter {
    regex: Regex,
    pattern: String,
    case_insensitive: bool,
}

impl CompiledFilter {
    /// Compile a pattern string
    pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let source = if case_insensitive {
            format!("(?i){}", pattern)
        } else {
            pattern.to_string()
        };
        Ok(Self {
            regex: Regex::new(&source)?,
            pattern: pattern.to_string(),
            case_insensitive,
        })
    }

    /// Check if a log entry's content matches
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.regex.is_match(&entry.content)
    }

    /// All match positions in a string (for highlighting)
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        self.regex
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    /// The pattern as the user typed it
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl std::fmt::Debug for CompiledFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFilter")
            .field("pattern", &self.pattern)
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_matching() {
        let filter = CompiledFilter::compile("error", false).unwrap();
        assert!(filter.matches(&LogEntry::new("12:00:01", "an error occurred")));
        assert!(!filter.matches(&LogEntry::new("12:00:02", "everything is fine")));
        assert!(!filter.matches(&LogEntry::new("12:00:03", "an ERROR occurred")));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let filter = CompiledFilter::compile("ERROR", true).unwrap();
        assert!(filter.matches(&LogEntry::new("", "an error occurred")));
        assert!(filter.is_case_insensitive());
        assert_eq!(filter.pattern(), "ERROR");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(CompiledFilter::compile("(unclosed", false).is_err());
    }

    #[test]
    fn test_find_matches_positions() {
        let filter = CompiledFilter::compile("error", false).unwrap();
        let matches = filter.find_matches("an error occurred, another error here");
        assert_eq!(matches, vec![(3, 8), (27, 32)]);
    }
}
