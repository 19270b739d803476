//! Resource controllers.
//!
//! Each controller borrows a configured [`GitLabApi`](crate::client::GitLabApi)
//! and runs one lifecycle operation per call against tracked resource data.
//! A read that finds nothing clears the data's `id` rather than failing.

mod project_access_token;
mod repository_file;
pub mod validation;

pub use project_access_token::{ProjectAccessTokenData, ProjectAccessTokenResource};
pub use repository_file::{RepositoryFileData, RepositoryFileResource};

use crate::error::{Error, Result};

/// Splits `a:b` into exactly two parts.
pub fn parse_two_part_id(id: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = id.split(':').collect();
    match parts.as_slice() {
        [a, b] => Ok((a, b)),
        _ => Err(Error::InvalidId {
            id: id.to_string(),
            reason: "unexpected ID format, expected project:key".to_string(),
        }),
    }
}

#[must_use]
pub fn build_two_part_id(a: &str, b: &str) -> String {
    format!("{a}:{b}")
}
