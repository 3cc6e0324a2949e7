use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use provider_git::config::{apply_overrides, load_config_file};
use provider_git::domain::CreateReleaseConfig;
use provider_git::domain::tag::release_tag_name;
use provider_git::version::PROVIDER_VERSION;
use provider_git::{ui, GitProvider, Provider};

#[derive(Parser)]
#[command(
    name = "provider-git",
    version = PROVIDER_VERSION,
    about = "Read release history from a git repository and publish release tags"
)]
struct Args {
    #[arg(short, long, help = "Configuration file (flat TOML table of strings)")]
    config: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Override a configuration value"
    )]
    overrides: Vec<String>,

    #[arg(long, help = "Print results as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show provider and repository information
    Info,
    /// List commits reachable from TO, stopping before FROM
    Commits {
        #[arg(long, default_value = "", help = "Boundary commit hash (excluded)")]
        from: String,
        #[arg(help = "Hash or revision to start from")]
        to: String,
    },
    /// List releases parsed from semantic version tags
    Releases {
        #[arg(short, long, default_value = "", help = "Regex the tag name must match")]
        pattern: String,
    },
    /// Create tag v<VERSION> at TARGET and push it
    Release {
        #[arg(value_name = "VERSION", help = "Version to release, without the v prefix")]
        new_version: String,
        #[arg(help = "Full commit hash or branch name")]
        target: String,
        #[arg(long, required_unless_present = "changelog_file", help = "Tag message")]
        changelog: Option<String>,
        #[arg(long, conflicts_with = "changelog", help = "Read the tag message from a file")]
        changelog_file: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config =
        load_config_file(args.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &args.overrides).context("Invalid --set value")?;

    let provider = GitProvider::init(&config).context("Failed to open repository")?;

    match args.command {
        Command::Info => {
            let info = provider.get_info()?;
            if args.json {
                print_json(&info)?;
            } else {
                ui::display_info(provider.name(), provider.version(), &info);
            }
        }
        Command::Commits { from, to } => {
            let commits = provider
                .get_commits(&from, &to)
                .with_context(|| format!("Failed to read commits from '{}'", to))?;
            if args.json {
                print_json(&commits)?;
            } else {
                ui::display_commits(&commits);
            }
        }
        Command::Releases { pattern } => {
            let releases = provider
                .get_releases(&pattern)
                .context("Failed to read releases")?;
            if args.json {
                print_json(&releases)?;
            } else {
                ui::display_releases(&releases);
            }
        }
        Command::Release {
            new_version,
            target,
            changelog,
            changelog_file,
        } => {
            let changelog = match changelog_file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => changelog.unwrap_or_default(),
            };
            let tag = release_tag_name(&new_version);

            if !args.json {
                ui::display_status(&format!("Creating tag {} at '{}'", tag, target));
            }
            provider
                .create_release(&CreateReleaseConfig {
                    new_version,
                    sha: target,
                    changelog,
                })
                .with_context(|| format!("Failed to publish {}", tag))?;

            if args.json {
                print_json(&serde_json::json!({ "tag": tag }))?;
            } else {
                ui::display_success(&format!("Published tag {}", tag));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
