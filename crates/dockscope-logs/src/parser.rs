use chrono::{DateTime, NaiveTime};

use dockscope_types::LogEntry;

/// Delimiter between the timestamp and content components of a record
///
/// The agent emits one record per message, shaped
/// `<timestamp><delimiter><content>`. The delimiter is environment
/// specific; this is the default the stock agent uses.
pub const RECORD_DELIMITER: char = '|';

/// Parser for raw stream records
#[derive(Clone, Copy, Debug)]
pub struct LineParser {
    delimiter: char,
}

impl LineParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parse one raw record into a log entry
    ///
    /// Malformed records (missing delimiter, non-conforming timestamp)
    /// degrade to an entry with an empty timestamp and the full raw text
    /// as content, so one bad record never stalls the stream.
    pub fn parse(&self, raw: &str) -> LogEntry {
        if let Some((timestamp, content)) = raw.split_once(self.delimiter)
            && is_timestamp(timestamp)
        {
            return LogEntry::new(timestamp, content);
        }
        LogEntry::new("", raw)
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(RECORD_DELIMITER)
    }
}

/// Accepts wall-clock times (`12:00:01`, optional fraction) and full
/// RFC 3339 stamps, the two shapes agents are known to emit.
fn is_timestamp(s: &str) -> bool {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited_record() {
        let parser = LineParser::default();
        let entry = parser.parse("12:00:01|hello");
        assert_eq!(entry.timestamp, "12:00:01");
        assert_eq!(entry.content, "hello");
    }

    #[test]
    fn test_parse_missing_delimiter() {
        let parser = LineParser::default();
        let entry = parser.parse("garbage-no-delimiter");
        assert_eq!(entry.timestamp, "");
        assert_eq!(entry.content, "garbage-no-delimiter");
    }

    #[test]
    fn test_parse_non_conforming_timestamp() {
        let parser = LineParser::default();
        let entry = parser.parse("not-a-time|payload");
        assert_eq!(entry.timestamp, "");
        assert_eq!(entry.content, "not-a-time|payload");
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let parser = LineParser::default();
        let entry = parser.parse("2024-01-15T10:30:00.123456789Z|container started");
        assert_eq!(entry.timestamp, "2024-01-15T10:30:00.123456789Z");
        assert_eq!(entry.content, "container started");
    }

    #[test]
    fn test_parse_fractional_time() {
        let parser = LineParser::default();
        let entry = parser.parse("12:00:01.250|tick");
        assert_eq!(entry.timestamp, "12:00:01.250");
        assert_eq!(entry.content, "tick");
    }

    #[test]
    fn test_parse_empty_content() {
        let parser = LineParser::default();
        let entry = parser.parse("12:00:01|");
        assert_eq!(entry.timestamp, "12:00:01");
        assert_eq!(entry.content, "");
    }

    #[test]
    fn test_parse_content_containing_delimiter() {
        let parser = LineParser::default();
        let entry = parser.parse("12:00:01|a|b|c");
        assert_eq!(entry.timestamp, "12:00:01");
        assert_eq!(entry.content, "a|b|c");
    }

    #[test]
    fn test_parse_custom_delimiter() {
        let parser = LineParser::new('\t');
        let entry = parser.parse("12:00:01\thello");
        assert_eq!(entry.timestamp, "12:00:01");
        assert_eq!(entry.content, "hello");
    }

    #[test]
    fn test_parse_multibyte_utf8_never_fails() {
        let parser = LineParser::default();
        let entry = parser.parse("─────|╭────╮");
        assert_eq!(entry.timestamp, "");
        assert_eq!(entry.content, "─────|╭────╮");
    }
}
