//! Domain logic - release records and naming rules independent of git operations

pub mod commit;
pub mod release;
pub mod tag;

pub use commit::{Identity, RawCommit};
pub use release::{CreateReleaseConfig, Release, RepositoryInfo};
pub use tag::TagFilter;
