//! Commit ancestry traversal.
//!
//! Topological order uses a [`git2::Revwalk`]; the remaining orders are
//! walked here over parent links, starting from the start commit so that it
//! always comes out first. Time orders only rank commits already discovered
//! from the start, never the whole ancestry at once. Every order visits each
//! reachable commit exactly once, and the order decides which path through a
//! merge is taken first. When the walk stops at a boundary commit, that
//! choice changes how many commits come back.

use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use git2::{Commit, Oid, Repository, Revwalk, Signature, Sort};

use crate::domain::commit::{annotations, Identity};
use crate::domain::RawCommit;
use crate::error::{ProviderError, Result};

/// Order in which ancestors of the start commit are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOrder {
    /// Depth-first pre-order, first parent first. Newest first on linear history.
    #[default]
    DepthFirst,
    /// Depth-first, last parent first.
    DepthFirstPost,
    BreadthFirst,
    /// Newest committer timestamp first.
    CommitterTime,
    /// Newest author timestamp first.
    AuthorTime,
    /// No parent before any of its children.
    Topological,
}

impl LogOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOrder::DepthFirst => "dfs",
            LogOrder::DepthFirstPost => "dfs_post",
            LogOrder::BreadthFirst => "bfs",
            LogOrder::CommitterTime => "ctime",
            LogOrder::AuthorTime => "atime",
            LogOrder::Topological => "topo",
        }
    }
}

impl fmt::Display for LogOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogOrder {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "default" | "dfs" => Ok(LogOrder::DepthFirst),
            "dfs_post" => Ok(LogOrder::DepthFirstPost),
            "bfs" => Ok(LogOrder::BreadthFirst),
            "ctime" => Ok(LogOrder::CommitterTime),
            "atime" => Ok(LogOrder::AuthorTime),
            "topo" => Ok(LogOrder::Topological),
            other => Err(ProviderError::config(format!(
                "unknown log_order '{}' (expected dfs, dfs_post, bfs, ctime, atime or topo)",
                other
            ))),
        }
    }
}

/// Pending commits of a hand-rolled walk.
enum Frontier {
    /// Top of the stack is visited next.
    Stack(Vec<Oid>),
    Queue(VecDeque<Oid>),
    /// Keyed by committer or author time, newest on top.
    Heap(BinaryHeap<(i64, Oid)>),
}

enum Source<'r> {
    Native(Revwalk<'r>),
    Manual {
        order: LogOrder,
        frontier: Frontier,
        seen: HashSet<Oid>,
    },
}

/// Iterator over the ancestry of a commit, the start commit included.
pub struct CommitWalk<'r> {
    repo: &'r Repository,
    source: Source<'r>,
}

impl<'r> CommitWalk<'r> {
    pub fn new(
        repo: &'r Repository,
        start: Oid,
        order: LogOrder,
    ) -> std::result::Result<Self, git2::Error> {
        let source = match order {
            LogOrder::Topological => {
                let mut revwalk = repo.revwalk()?;
                revwalk.set_sorting(Sort::TOPOLOGICAL)?;
                revwalk.push(start)?;
                Source::Native(revwalk)
            }
            LogOrder::DepthFirst | LogOrder::DepthFirstPost => Source::Manual {
                order,
                frontier: Frontier::Stack(vec![start]),
                seen: HashSet::new(),
            },
            LogOrder::BreadthFirst => Source::Manual {
                order,
                frontier: Frontier::Queue(VecDeque::from([start])),
                seen: HashSet::new(),
            },
            LogOrder::CommitterTime | LogOrder::AuthorTime => {
                let commit = repo.find_commit(start)?;
                let mut heap = BinaryHeap::new();
                heap.push((time_key(order, &commit), start));
                Source::Manual {
                    order,
                    frontier: Frontier::Heap(heap),
                    seen: HashSet::new(),
                }
            }
        };

        Ok(CommitWalk { repo, source })
    }

    fn next_manual(&mut self) -> Option<std::result::Result<Commit<'r>, git2::Error>> {
        let repo = self.repo;
        let Source::Manual {
            order,
            frontier,
            seen,
        } = &mut self.source
        else {
            return None;
        };

        loop {
            let oid = match &mut *frontier {
                Frontier::Stack(stack) => stack.pop(),
                Frontier::Queue(queue) => queue.pop_front(),
                Frontier::Heap(heap) => heap.pop().map(|(_, oid)| oid),
            }?;

            if !seen.insert(oid) {
                continue;
            }

            let commit = match repo.find_commit(oid) {
                Ok(commit) => commit,
                Err(e) => return Some(Err(e)),
            };

            let parents = commit.parent_ids().filter(|p| !seen.contains(p));
            match &mut *frontier {
                Frontier::Stack(stack) => {
                    let parents: Vec<Oid> = parents.collect();
                    if *order == LogOrder::DepthFirst {
                        stack.extend(parents.into_iter().rev());
                    } else {
                        stack.extend(parents);
                    }
                }
                Frontier::Queue(queue) => queue.extend(parents),
                Frontier::Heap(heap) => {
                    for parent in parents {
                        match repo.find_commit(parent) {
                            Ok(p) => heap.push((time_key(*order, &p), parent)),
                            Err(e) => return Some(Err(e)),
                        }
                    }
                }
            }

            return Some(Ok(commit));
        }
    }
}

fn time_key(order: LogOrder, commit: &Commit<'_>) -> i64 {
    match order {
        LogOrder::AuthorTime => commit.author().when().seconds(),
        _ => commit.committer().when().seconds(),
    }
}

impl<'r> Iterator for CommitWalk<'r> {
    type Item = std::result::Result<Commit<'r>, git2::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let repo = self.repo;
        if let Source::Native(revwalk) = &mut self.source {
            return revwalk
                .next()
                .map(|oid| oid.and_then(|oid| repo.find_commit(oid)));
        }
        self.next_manual()
    }
}

/// Collects commits reachable from `start`, stopping before the first
/// commit whose id equals `from_sha`.
///
/// An empty or unreachable `from_sha` returns the whole ancestry. Any
/// failure while walking discards the partial result.
pub fn collect_commits(
    repo: &Repository,
    start: Oid,
    from_sha: &str,
    order: LogOrder,
) -> Result<Vec<RawCommit>> {
    let walk = CommitWalk::new(repo, start, order).map_err(ProviderError::GraphTraversal)?;

    let mut commits = Vec::new();
    for commit in walk {
        let commit = commit.map_err(ProviderError::GraphTraversal)?;
        if !from_sha.is_empty() && commit.id().to_string().eq_ignore_ascii_case(from_sha) {
            log::debug!("Reached boundary commit {}", from_sha);
            break;
        }
        commits.push(raw_commit(&commit));
    }

    log::debug!(
        "Collected {} commits from {} in {} order",
        commits.len(),
        start,
        order
    );
    Ok(commits)
}

fn identity(signature: &Signature<'_>) -> Identity {
    let when = signature.when();
    Identity {
        name: String::from_utf8_lossy(signature.name_bytes()).into_owned(),
        email: String::from_utf8_lossy(signature.email_bytes()).into_owned(),
        seconds: when.seconds(),
        offset_minutes: when.offset_minutes(),
    }
}

/// Converts a git2 commit into the record handed to the release engine.
pub fn raw_commit(commit: &Commit<'_>) -> RawCommit {
    RawCommit {
        sha: commit.id().to_string(),
        raw_message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        annotations: annotations(&identity(&commit.author()), &identity(&commit.committer())),
    }
}
