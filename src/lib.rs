//! # gitlab-repository-files
//!
//! Reconciles GitLab repository files and project access tokens against a
//! declared configuration, the way an infrastructure-as-code provider does.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use gitlab_repository_files::config::ProviderConfig;
//! use gitlab_repository_files::provider::Provider;
//! use gitlab_repository_files::resource::{RepositoryFileData, RepositoryFileResource};
//!
//! let client = Provider::default().configure(&ProviderConfig::from_env())?;
//! let files = RepositoryFileResource::new(&client);
//!
//! let mut data = RepositoryFileData {
//!     project: "42".into(),
//!     file_path: "meow.txt".into(),
//!     branch: "main".into(),
//!     content: "bWVvdyBtZW93IG1lb3c=".into(),
//!     commit_message: "add meow".into(),
//!     ..Default::default()
//! };
//! files.create(&mut data)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI module and binary. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod types;
