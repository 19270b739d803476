use chrono::NaiveDate;
use serde::Serialize;

use crate::types::AccessTokenScope;

/// Query of a file lookup.
#[derive(Debug, Clone, Serialize)]
pub struct GetFileOptions {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFileOptions {
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_branch: Option<String>,
    pub encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub content: String,
    pub commit_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateFileOptions {
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_branch: Option<String>,
    pub encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub content: String,
    pub commit_message: String,
    pub last_commit_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteFileOptions {
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub commit_message: String,
    pub last_commit_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectAccessTokenOptions {
    pub name: String,
    pub scopes: Vec<AccessTokenScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}
