// Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

use provider_git::GitProvider;

/// A throwaway repository on disk.
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: std::cell::Cell<i64>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("master");
        let repo = Repository::init_opts(dir.path(), &options).expect("Could not init git repo");
        TestRepo {
            dir,
            repo,
            clock: std::cell::Cell::new(1_600_000_000),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn tick(&self) -> i64 {
        let now = self.clock.get() + 60;
        self.clock.set(now);
        now
    }

    /// Commits onto `branch`, advancing it. Author and committer share a time.
    pub fn commit_on(&self, branch: &str, message: &str) -> Oid {
        let time = self.tick();
        let reference = format!("refs/heads/{}", branch);
        let parents: Vec<Oid> = self
            .repo
            .refname_to_id(&reference)
            .ok()
            .into_iter()
            .collect();
        self.write_commit(Some(&reference), message, &parents, time, time)
    }

    /// Writes a commit with explicit parents and times, optionally updating a ref.
    pub fn write_commit(
        &self,
        update_ref: Option<&str>,
        message: &str,
        parents: &[Oid],
        author_time: i64,
        committer_time: i64,
    ) -> Oid {
        let author = Signature::new("Test User", "test@example.com", &Time::new(author_time, 0))
            .expect("Could not build author");
        let committer = Signature::new(
            "Test User",
            "test@example.com",
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
            .commit(update_ref, &author, &committer, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    pub fn branch(&self, name: &str, oid: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), oid, true, "test")
            .expect("Could not set branch");
    }

    pub fn lightweight_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid, message: &str) -> Oid {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        let tagger = Signature::now("Tagger", "tagger@example.com").expect("Could not build tagger");
        self.repo
            .tag(name, &object, &tagger, message, false)
            .expect("Could not create tag")
    }

    pub fn head(&self) -> Oid {
        self.repo
            .refname_to_id("refs/heads/master")
            .expect("master has no commits")
    }

    /// Adds a bare repository as remote `name` and returns it.
    pub fn add_bare_remote(&self, name: &str) -> (TempDir, Repository) {
        let dir = TempDir::new().expect("Could not create remote dir");
        let bare = Repository::init_bare(dir.path()).expect("Could not init bare repo");
        let url = dir.path().to_str().expect("non UTF-8 temp path").to_string();
        self.repo.remote(name, &url).expect("Could not add remote");
        (dir, bare)
    }

    /// Configuration map pointing the provider at this repository.
    pub fn config(&self, extra: &[(&str, &str)]) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert(
            "git_path".to_string(),
            self.path().to_string_lossy().into_owned(),
        );
        for (key, value) in extra {
            config.insert(key.to_string(), value.to_string());
        }
        config
    }

    pub fn provider(&self, extra: &[(&str, &str)]) -> GitProvider {
        GitProvider::init(&self.config(extra)).expect("Could not init provider")
    }
}

/// 100 `feat:` commits on master with a lightweight `v1.N.0` tag on every
/// tenth, plus a `new-fix` branch carrying one extra `fix:` commit.
pub fn release_history() -> TestRepo {
    let test_repo = TestRepo::new();
    let mut version = 0;
    for i in 0..100 {
        let oid = test_repo.commit_on("master", &format!("feat: commit {}", i));
        if i % 10 == 0 {
            test_repo.lightweight_tag(&format!("v1.{}.0", version), oid);
            version += 1;
        }
    }

    test_repo.branch("new-fix", test_repo.head());
    test_repo.commit_on("new-fix", "fix: error");
    test_repo
}

pub struct DivergingMerge {
    pub repo: TestRepo,
    pub root: Oid,
    pub base: Oid,
    pub mainline: Oid,
    pub feature: Oid,
    pub merge: Oid,
}

/// Non-fast-forward merge whose merge commit time precedes the feature
/// parent's committer time:
///
/// ```text
/// root(100) - base(200) - mainline(300) - merge(350)
///                     \                  /
///                      feature(400) -----
/// ```
pub fn diverging_merge() -> DivergingMerge {
    let repo = TestRepo::new();
    let root = repo.write_commit(None, "chore: root", &[], 100, 100);
    let base = repo.write_commit(None, "feat: base", &[root], 200, 200);
    let mainline = repo.write_commit(None, "fix: mainline", &[base], 300, 300);
    let feature = repo.write_commit(None, "feat: feature", &[base], 400, 400);
    let merge = repo.write_commit(
        None,
        "Merge branch 'feature'",
        &[mainline, feature],
        350,
        350,
    );
    repo.branch("master", merge);
    repo.branch("feature", feature);

    DivergingMerge {
        repo,
        root,
        base,
        mainline,
        feature,
        merge,
    }
}
