pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod version;

pub use error::{ProviderError, Result};
pub use git::{GitProvider, Provider};
