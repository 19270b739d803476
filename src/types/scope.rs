use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Scopes a project access token may be granted. The API accepts nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTokenScope {
    Api,
    ReadApi,
    ReadRepository,
    WriteRepository,
}

impl AccessTokenScope {
    pub const ALL: [AccessTokenScope; 4] = [
        AccessTokenScope::Api,
        AccessTokenScope::ReadApi,
        AccessTokenScope::ReadRepository,
        AccessTokenScope::WriteRepository,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccessTokenScope::Api => "api",
            AccessTokenScope::ReadApi => "read_api",
            AccessTokenScope::ReadRepository => "read_repository",
            AccessTokenScope::WriteRepository => "write_repository",
        }
    }

    pub fn parse(s: &str) -> Option<AccessTokenScope> {
        Self::ALL.into_iter().find(|scope| scope.as_str() == s)
    }

    /// Converts a list of scope strings, failing on the first unknown value.
    pub fn parse_many<S: AsRef<str>>(strs: &[S]) -> Option<Vec<AccessTokenScope>> {
        strs.iter().map(|s| Self::parse(s.as_ref())).collect()
    }
}

impl fmt::Display for AccessTokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTokenScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            Error::Validation(vec![format!(
                "expected scope to be one of {}, got {s}",
                Self::ALL.map(AccessTokenScope::as_str).join(", ")
            )])
        })
    }
}
