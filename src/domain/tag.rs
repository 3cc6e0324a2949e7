use regex::Regex;

use crate::error::Result;

pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Tag name for a release version, e.g. "2.0.0" -> "v2.0.0".
pub fn release_tag_name(version: &str) -> String {
    format!("v{}", version)
}

/// Full reference name for a tag, e.g. "v2.0.0" -> "refs/tags/v2.0.0".
pub fn tag_ref_name(tag: &str) -> String {
    format!("{}{}", TAG_REF_PREFIX, tag)
}

/// Bare tag name for a reference under `refs/tags/`, `None` for anything else.
pub fn tag_name_from_ref(reference: &str) -> Option<&str> {
    reference.strip_prefix(TAG_REF_PREFIX)
}

/// Refspec that pushes a single tag to the same name on the remote.
pub fn tag_push_refspec(tag: &str) -> String {
    let reference = tag_ref_name(tag);
    format!("{}:{}", reference, reference)
}

/// Optional regular expression restricting which tag names are considered.
#[derive(Debug, Clone)]
pub struct TagFilter {
    regex: Option<Regex>,
}

impl TagFilter {
    /// Compile a filter; an empty pattern matches every tag.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(TagFilter { regex })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(tag))
    }
}
