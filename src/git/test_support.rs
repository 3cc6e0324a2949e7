//! Repository fixtures for unit tests.

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Empty repository whose unborn HEAD points at `master`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("master");
        let repo = Repository::init_opts(dir.path(), &options).expect("Could not init git repo");
        TestRepo { dir, repo }
    }

    /// Creates a commit with the same author and committer time.
    pub fn commit(&self, message: &str, parents: &[Oid], time: i64) -> Oid {
        self.commit_at(message, parents, time, time)
    }

    /// Creates a commit with distinct author and committer times. No ref is updated.
    pub fn commit_at(
        &self,
        message: &str,
        parents: &[Oid],
        author_time: i64,
        committer_time: i64,
    ) -> Oid {
        let author = Signature::new("Author", "author@example.com", &Time::new(author_time, 0))
            .expect("Could not build author");
        let committer = Signature::new(
            "Committer",
            "committer@example.com",
            &Time::new(committer_time, 0),
        )
        .expect("Could not build committer");

        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(None, &author, &committer, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Points `refs/heads/<name>` at `oid`, creating or moving the branch.
    pub fn set_branch(&self, name: &str, oid: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), oid, true, "test")
            .expect("Could not set branch");
    }

    /// A linear history of `count` commits one minute apart on `master`.
    pub fn linear(&self, count: usize) -> Vec<Oid> {
        let mut oids: Vec<Oid> = Vec::with_capacity(count);
        for i in 0..count {
            let parents: Vec<Oid> = oids.last().copied().into_iter().collect();
            let oid = self.commit(&format!("feat: commit {}", i), &parents, 1_000 + 60 * i as i64);
            oids.push(oid);
        }
        if let Some(tip) = oids.last() {
            self.set_branch("master", *tip);
        }
        oids
    }
}
