use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A file as returned by the repository files API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryFile {
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub size: i64,
    pub encoding: String,
    pub content: String,
    #[serde(default)]
    pub content_sha256: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub blob_id: String,
    #[serde(default)]
    pub commit_id: String,
    pub last_commit_id: String,
}

/// Response body of a create or update file call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub file_path: String,
    pub branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectAccessToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    pub active: bool,
    pub revoked: bool,
    /// Only present in the response to the create call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
