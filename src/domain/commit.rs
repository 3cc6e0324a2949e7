use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};
use serde::Serialize;

pub const AUTHOR_NAME: &str = "author_name";
pub const AUTHOR_EMAIL: &str = "author_email";
pub const AUTHOR_DATE: &str = "author_date";
pub const COMMITTER_NAME: &str = "committer_name";
pub const COMMITTER_EMAIL: &str = "committer_email";
pub const COMMITTER_DATE: &str = "committer_date";

/// A commit as handed to the release engine: id, raw message and
/// author/committer annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCommit {
    pub sha: String,
    pub raw_message: String,
    pub annotations: BTreeMap<String, String>,
}

impl RawCommit {
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

/// One side of a commit signature, decoupled from git2 types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Offset from UTC in minutes, as recorded in the commit.
    pub offset_minutes: i32,
}

/// Builds the annotation map for a commit's author and committer.
pub fn annotations(author: &Identity, committer: &Identity) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert(AUTHOR_NAME.to_string(), author.name.clone());
    map.insert(AUTHOR_EMAIL.to_string(), author.email.clone());
    map.insert(
        AUTHOR_DATE.to_string(),
        format_rfc3339(author.seconds, author.offset_minutes),
    );
    map.insert(COMMITTER_NAME.to_string(), committer.name.clone());
    map.insert(COMMITTER_EMAIL.to_string(), committer.email.clone());
    map.insert(
        COMMITTER_DATE.to_string(),
        format_rfc3339(committer.seconds, committer.offset_minutes),
    );
    map
}

/// Formats a git timestamp as RFC3339 in the offset it was recorded with.
///
/// UTC renders with a `Z` suffix, e.g. `2024-03-01T12:00:00Z` or
/// `2024-03-01T14:00:00+02:00`.
pub fn format_rfc3339(seconds: i64, offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    let utc: DateTime<Utc> = DateTime::from_timestamp(seconds, 0).unwrap_or_default();
    utc.with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, seconds: i64, offset_minutes: i32) -> Identity {
        Identity {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            seconds,
            offset_minutes,
        }
    }

    #[test]
    fn test_format_rfc3339_utc() {
        assert_eq!(format_rfc3339(0, 0), "1970-01-01T00:00:00Z");
        assert_eq!(format_rfc3339(1_700_000_000, 0), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_format_rfc3339_keeps_offset() {
        assert_eq!(format_rfc3339(1_700_000_000, 120), "2023-11-15T00:13:20+02:00");
        assert_eq!(format_rfc3339(1_700_000_000, -300), "2023-11-14T17:13:20-05:00");
    }

    #[test]
    fn test_annotations_cover_both_signatures() {
        let map = annotations(&identity("alice", 0, 0), &identity("bob", 60, 0));
        assert_eq!(map.len(), 6);
        assert_eq!(map[AUTHOR_NAME], "alice");
        assert_eq!(map[AUTHOR_EMAIL], "alice@example.com");
        assert_eq!(map[AUTHOR_DATE], "1970-01-01T00:00:00Z");
        assert_eq!(map[COMMITTER_NAME], "bob");
        assert_eq!(map[COMMITTER_EMAIL], "bob@example.com");
        assert_eq!(map[COMMITTER_DATE], "1970-01-01T00:01:00Z");
    }

    #[test]
    fn test_annotation_lookup() {
        let commit = RawCommit {
            sha: "a".repeat(40),
            raw_message: "feat: x\n".to_string(),
            annotations: annotations(&identity("alice", 0, 0), &identity("bob", 0, 0)),
        };
        assert_eq!(commit.annotation(AUTHOR_NAME), Some("alice"));
        assert_eq!(commit.annotation("missing"), None);
    }
}
