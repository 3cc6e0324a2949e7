//! Terminal output for the `provider-git` binary.

use console::style;

use crate::domain::commit::{AUTHOR_DATE, AUTHOR_NAME};
use crate::domain::{RawCommit, Release, RepositoryInfo};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// First line of a commit message, without the trailing newline.
pub fn subject(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

/// Abbreviated object id for display.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

pub fn display_info(provider: &str, version: &str, info: &RepositoryInfo) {
    println!("{} {}", style("Provider:").bold(), provider);
    println!("{} {}", style("Version:").bold(), version);
    println!("{} {}", style("Default branch:").bold(), info.default_branch);
}

pub fn display_commits(commits: &[RawCommit]) {
    println!("{}", style(format!("{} commits", commits.len())).bold());
    for commit in commits {
        println!(
            "  {} {} {}",
            style(short_sha(&commit.sha)).yellow(),
            subject(&commit.raw_message),
            style(format!(
                "({}, {})",
                commit.annotation(AUTHOR_NAME).unwrap_or("unknown"),
                commit.annotation(AUTHOR_DATE).unwrap_or("")
            ))
            .dim()
        );
    }
}

pub fn display_releases(releases: &[Release]) {
    println!("{}", style(format!("{} releases", releases.len())).bold());
    for release in releases {
        println!(
            "  {} {}",
            style(format!("v{}", release.version)).green(),
            style(short_sha(&release.sha)).yellow()
        );
    }
}
