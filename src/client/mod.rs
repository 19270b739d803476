//! Access to the GitLab v4 API.
//!
//! Resource controllers are generic over [`GitLabApi`], so the HTTP client
//! and in-memory test doubles are interchangeable.

mod http;
mod options;
mod page;

pub use http::HttpClient;
pub use options::{
    CreateFileOptions, CreateProjectAccessTokenOptions, DeleteFileOptions, GetFileOptions,
    ListOptions, UpdateFileOptions,
};
pub use page::{MAX_PAGE_SIZE, Page, Pages};

use crate::error::Result;
use crate::types::{FileInfo, ProjectAccessToken, RepositoryFile};

/// The subset of the GitLab API the resources reconcile against.
pub trait GitLabApi {
    fn get_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &GetFileOptions,
    ) -> Result<RepositoryFile>;

    fn create_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &CreateFileOptions,
    ) -> Result<FileInfo>;

    fn update_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &UpdateFileOptions,
    ) -> Result<FileInfo>;

    fn delete_file(&self, project: &str, file_path: &str, opts: &DeleteFileOptions) -> Result<()>;

    fn list_project_access_tokens(
        &self,
        project: i64,
        opts: &ListOptions,
    ) -> Result<Page<ProjectAccessToken>>;

    fn create_project_access_token(
        &self,
        project: i64,
        opts: &CreateProjectAccessTokenOptions,
    ) -> Result<ProjectAccessToken>;

    fn delete_project_access_token(&self, project: i64, token_id: i64) -> Result<()>;
}
