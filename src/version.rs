use semver::Version;

/// Version reported by the provider.
///
/// Injected at build time through the `PROVIDER_GIT_VERSION` environment
/// variable; local builds report `dev`.
pub const PROVIDER_VERSION: &str = match option_env!("PROVIDER_GIT_VERSION") {
    Some(version) => version,
    None => "dev",
};

/// Parses a semantic version from a git tag name.
///
/// Accepts an optional leading `v` followed by `MAJOR[.MINOR[.PATCH]]` with
/// optional pre-release and build metadata. Missing minor or patch parts
/// count as zero, so `v1` and `v1.2` read as `1.0.0` and `1.2.0`.
///
/// # Returns
/// * `Some(Version)` - Successfully parsed version
/// * `None` - If the tag is not a semantic version
///
/// # Example
/// ```ignore
/// assert_eq!(parse_version_from_tag("v1.2.3").unwrap().to_string(), "1.2.3");
/// assert_eq!(parse_version_from_tag("v1.2").unwrap().to_string(), "1.2.0");
/// assert_eq!(parse_version_from_tag("2.0.0-rc.1+build.5").unwrap().major, 2);
/// assert_eq!(parse_version_from_tag("release-1"), None);
/// ```
pub fn parse_version_from_tag(tag: &str) -> Option<Version> {
    let clean_tag = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(&pad_version_core(clean_tag)?).ok()
}

/// Fills in `.0` for a missing minor or patch number, keeping any
/// `-pre` or `+build` suffix as written.
fn pad_version_core(version: &str) -> Option<String> {
    let split = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split);

    let parts: Vec<&str> = core.split('.').collect();
    let numeric = |part: &&str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if parts.len() > 3 || !parts.iter().all(numeric) {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Some(padded)
}
