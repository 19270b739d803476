use std::cell::RefCell;

use gitlab_repository_files::client::{
    CreateFileOptions, CreateProjectAccessTokenOptions, DeleteFileOptions, GetFileOptions,
    GitLabApi, ListOptions, Page, UpdateFileOptions,
};
use gitlab_repository_files::error::{Error, Result};
use gitlab_repository_files::types::{FileInfo, ProjectAccessToken, RepositoryFile};

use super::store::{GitLabStore, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetFile {
        project: String,
        path: String,
        ref_name: String,
    },
    CreateFile {
        project: String,
        path: String,
        branch: String,
        start_branch: Option<String>,
        encoding: String,
    },
    UpdateFile {
        project: String,
        path: String,
        last_commit_id: String,
        encoding: String,
    },
    DeleteFile {
        project: String,
        path: String,
        commit_message: String,
        last_commit_id: String,
    },
    ListTokens {
        project: i64,
        page: u32,
        per_page: u32,
    },
    CreateToken {
        project: i64,
        name: String,
    },
    DeleteToken {
        project: i64,
        token_id: i64,
    },
}

/// Records every call and answers from a [`GitLabStore`].
#[derive(Default)]
pub struct FakeGitLab {
    pub store: RefCell<GitLabStore>,
    pub calls: RefCell<Vec<Call>>,
    /// Returned by the next `get_file` call instead of consulting the store.
    pub fail_next_get: RefCell<Option<(u16, String)>>,
    /// Returned by the next `delete_file` call instead of consulting the store.
    pub fail_next_delete: RefCell<Option<(u16, String)>>,
    /// Returned by every token listing call.
    pub fail_list: RefCell<Option<(u16, String)>>,
}

fn api_error(method: &str, what: &str, (status, message): (u16, String)) -> Error {
    Error::Api {
        method: method.to_string(),
        url: format!("fake://{what}"),
        status,
        message,
    }
}

fn lift<T>(method: &str, what: &str, result: StoreResult<T>) -> Result<T> {
    result.map_err(|e| api_error(method, what, e))
}

impl FakeGitLab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitLabApi for FakeGitLab {
    fn get_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &GetFileOptions,
    ) -> Result<RepositoryFile> {
        self.record(Call::GetFile {
            project: project.to_string(),
            path: file_path.to_string(),
            ref_name: opts.ref_name.clone(),
        });
        if let Some(err) = self.fail_next_get.borrow_mut().take() {
            return Err(api_error("GET", file_path, err));
        }
        lift(
            "GET",
            file_path,
            self.store
                .borrow()
                .get_file(project, file_path, &opts.ref_name),
        )
    }

    fn create_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &CreateFileOptions,
    ) -> Result<FileInfo> {
        self.record(Call::CreateFile {
            project: project.to_string(),
            path: file_path.to_string(),
            branch: opts.branch.clone(),
            start_branch: opts.start_branch.clone(),
            encoding: opts.encoding.clone(),
        });
        lift(
            "POST",
            file_path,
            self.store.borrow_mut().create_file(
                project,
                file_path,
                &opts.branch,
                &opts.content,
                &opts.commit_message,
            ),
        )
    }

    fn update_file(
        &self,
        project: &str,
        file_path: &str,
        opts: &UpdateFileOptions,
    ) -> Result<FileInfo> {
        self.record(Call::UpdateFile {
            project: project.to_string(),
            path: file_path.to_string(),
            last_commit_id: opts.last_commit_id.clone(),
            encoding: opts.encoding.clone(),
        });
        lift(
            "PUT",
            file_path,
            self.store.borrow_mut().update_file(
                project,
                file_path,
                &opts.branch,
                &opts.content,
                &opts.commit_message,
                &opts.last_commit_id,
            ),
        )
    }

    fn delete_file(&self, project: &str, file_path: &str, opts: &DeleteFileOptions) -> Result<()> {
        self.record(Call::DeleteFile {
            project: project.to_string(),
            path: file_path.to_string(),
            commit_message: opts.commit_message.clone(),
            last_commit_id: opts.last_commit_id.clone(),
        });
        if let Some(err) = self.fail_next_delete.borrow_mut().take() {
            return Err(api_error("DELETE", file_path, err));
        }
        lift(
            "DELETE",
            file_path,
            self.store.borrow_mut().delete_file(
                project,
                file_path,
                &opts.branch,
                &opts.commit_message,
                &opts.last_commit_id,
            ),
        )
    }

    fn list_project_access_tokens(
        &self,
        project: i64,
        opts: &ListOptions,
    ) -> Result<Page<ProjectAccessToken>> {
        self.record(Call::ListTokens {
            project,
            page: opts.page,
            per_page: opts.per_page,
        });
        if let Some(err) = self.fail_list.borrow().clone() {
            return Err(api_error("GET", "access_tokens", err));
        }
        let (items, next) = self
            .store
            .borrow()
            .list_tokens(project, opts.page, opts.per_page);
        Ok(Page::new(items, next))
    }

    fn create_project_access_token(
        &self,
        project: i64,
        opts: &CreateProjectAccessTokenOptions,
    ) -> Result<ProjectAccessToken> {
        self.record(Call::CreateToken {
            project,
            name: opts.name.clone(),
        });
        let scopes = opts.scopes.iter().map(|s| s.to_string()).collect();
        Ok(self
            .store
            .borrow_mut()
            .create_token(project, &opts.name, scopes, opts.expires_at))
    }

    fn delete_project_access_token(&self, project: i64, token_id: i64) -> Result<()> {
        self.record(Call::DeleteToken { project, token_id });
        lift(
            "DELETE",
            "access_tokens",
            self.store.borrow_mut().delete_token(project, token_id),
        )
    }
}
