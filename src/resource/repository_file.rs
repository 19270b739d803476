use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::validate_base64_content;
use crate::client::{
    CreateFileOptions, DeleteFileOptions, GetFileOptions, GitLabApi, UpdateFileOptions,
};
use crate::error::{Error, Result};
use crate::schema::{Attribute, AttributeType, ResourceSchema};
use crate::types::RepositoryFile;

pub const RESOURCE_NAME: &str = "gitlabx_repository_file";

/// The only encoding the files API accepts; `text` is rejected with a 400.
pub const ENCODING: &str = "base64";

const DELETE_MESSAGE_PREFIX: &str = "[DELETE]: ";

const DESCRIPTION: &str = "\
This resource allows you to create and manage GitLab repository files

**Limitations**:

The [GitLab Repository Files API](https://docs.gitlab.com/ee/api/repository_files.html)
can only create, update or delete a single file at the time.
The API will also
[fail with a 400](https://docs.gitlab.com/ee/api/repository_files.html#update-existing-file-in-repository)
response status code if the underlying repository is changed while the API tries to make changes.
Therefore, it's recommended to make sure that you execute it with
[-parallelism=1](https://www.terraform.io/docs/cli/commands/apply.html#parallelism-n)
and that no other entity than the terraform at hand makes changes to the
underlying repository while it's executing.";

/// Declared and tracked state of one repository file.
///
/// `id` is the file path alone; project and branch are tracked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryFileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub project: String,
    pub file_path: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub content: String,
    pub commit_message: String,
    pub overwrite_on_create: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl RepositoryFileData {
    #[must_use]
    pub fn schema() -> ResourceSchema {
        ResourceSchema {
            name: RESOURCE_NAME,
            description: DESCRIPTION,
            attributes: vec![
                Attribute::new("project", AttributeType::String)
                    .required()
                    .force_new()
                    .description("The ID of the project."),
                Attribute::new("file_path", AttributeType::String)
                    .required()
                    .force_new()
                    .description(
                        "The full path of the file. It must be relative to the root of the project without a leading slash `/`.",
                    ),
                Attribute::new("branch", AttributeType::String)
                    .required()
                    .force_new()
                    .description("The name of the branch to which to commit to."),
                Attribute::new("start_branch", AttributeType::String)
                    .optional()
                    .description("Name of the branch to start the new commit from."),
                Attribute::new("author_email", AttributeType::String)
                    .optional()
                    .description("The email address of the commit author."),
                Attribute::new("author_name", AttributeType::String)
                    .optional()
                    .description("The name of the commit author."),
                Attribute::new("content", AttributeType::String)
                    .required()
                    .validate_with(validate_base64_content)
                    .description("The content of the file. It must be base64 encoded."),
                Attribute::new("commit_message", AttributeType::String)
                    .required()
                    .description("The commit message."),
                Attribute::new("overwrite_on_create", AttributeType::Bool)
                    .optional()
                    .description(
                        "If the file should be overwritten if it does already exist in the repository but not in the state.",
                    ),
                Attribute::new("encoding", AttributeType::String)
                    .computed()
                    .description("The file content encoding. Always `base64`."),
            ],
            import_format: Some("{project_id}:{branch}:{file_path}"),
        }
    }

    /// Checks the declared fields without touching the remote API.
    pub fn validate(&self) -> Result<()> {
        let schema = Self::schema();
        let mut errors = Vec::new();
        for (name, value) in [
            ("project", &self.project),
            ("file_path", &self.file_path),
            ("branch", &self.branch),
            ("commit_message", &self.commit_message),
        ] {
            if value.is_empty() {
                errors.push(format!("\"{name}\" is required"));
            }
        }
        errors.extend(schema.validate_value("content", &self.content));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Seeds tracked state from `project:branch:path`; a read hydrates the rest.
    pub fn from_import_id(id: &str) -> Result<Self> {
        let parts: Vec<&str> = id.split(':').collect();
        let [project, branch, file_path] = parts.as_slice() else {
            return Err(Error::InvalidId {
                id: id.to_string(),
                reason: "invalid Repository File import format; expected '{project_id}:{branch}:{file_path}'"
                    .to_string(),
            });
        };

        Ok(Self {
            id: Some((*file_path).to_string()),
            project: (*project).to_string(),
            branch: (*branch).to_string(),
            ..Default::default()
        })
    }

    fn get_options(&self) -> GetFileOptions {
        GetFileOptions {
            ref_name: self.branch.clone(),
        }
    }

    fn create_options(&self) -> CreateFileOptions {
        CreateFileOptions {
            branch: self.branch.clone(),
            start_branch: self.start_branch.clone(),
            encoding: ENCODING.to_string(),
            author_email: self.author_email.clone(),
            author_name: self.author_name.clone(),
            content: self.content.clone(),
            commit_message: self.commit_message.clone(),
        }
    }

    fn update_options(&self, last_commit_id: String) -> UpdateFileOptions {
        UpdateFileOptions {
            branch: self.branch.clone(),
            start_branch: self.start_branch.clone(),
            encoding: ENCODING.to_string(),
            author_email: self.author_email.clone(),
            author_name: self.author_name.clone(),
            content: self.content.clone(),
            commit_message: self.commit_message.clone(),
            last_commit_id,
        }
    }

    fn apply_remote(&mut self, file: RepositoryFile) {
        self.file_path = file.file_path;
        self.branch = file.ref_name;
        self.encoding = Some(file.encoding);
        self.content = file.content;
    }
}

pub struct RepositoryFileResource<'a, C> {
    client: &'a C,
}

impl<'a, C: GitLabApi> RepositoryFileResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Commits the declared file and hydrates `data` from the result.
    ///
    /// With `overwrite_on_create`, an existing file at the path is updated in
    /// place instead. Only a "file not found" answer counts as absence; any
    /// other probe failure aborts the create.
    pub fn create(&self, data: &mut RepositoryFileData) -> Result<()> {
        data.validate()?;

        let existing = if data.overwrite_on_create {
            self.probe(data)?
        } else {
            None
        };

        let info = match existing {
            Some(file) => {
                debug!(
                    project = %data.project,
                    path = %data.file_path,
                    "file already exists, overwriting"
                );
                self.client.update_file(
                    &data.project,
                    &data.file_path,
                    &data.update_options(file.last_commit_id),
                )?
            }
            None => {
                self.client
                    .create_file(&data.project, &data.file_path, &data.create_options())?
            }
        };

        data.id = Some(info.file_path);
        self.read(data)
    }

    fn probe(&self, data: &RepositoryFileData) -> Result<Option<RepositoryFile>> {
        match self
            .client
            .get_file(&data.project, &data.file_path, &data.get_options())
        {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.is_file_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Refreshes tracked state, clearing `id` when the file is gone.
    pub fn read(&self, data: &mut RepositoryFileData) -> Result<()> {
        let Some(path) = data.id.clone() else {
            return Ok(());
        };

        match self
            .client
            .get_file(&data.project, &path, &data.get_options())
        {
            Ok(file) => {
                data.apply_remote(file);
                Ok(())
            }
            Err(e) if e.is_file_not_found() => {
                warn!("file {path} not found, removing from state");
                data.id = None;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Commits new content using a commit ID fetched just before the write.
    pub fn update(&self, data: &mut RepositoryFileData) -> Result<()> {
        data.validate()?;

        let existing =
            self.client
                .get_file(&data.project, &data.file_path, &data.get_options())?;

        self.client.update_file(
            &data.project,
            &data.file_path,
            &data.update_options(existing.last_commit_id),
        )?;

        self.read(data)
    }

    pub fn delete(&self, data: &RepositoryFileData) -> Result<()> {
        let existing =
            self.client
                .get_file(&data.project, &data.file_path, &data.get_options())?;

        let opts = DeleteFileOptions {
            branch: data.branch.clone(),
            author_email: data.author_email.clone(),
            author_name: data.author_name.clone(),
            commit_message: format!("{DELETE_MESSAGE_PREFIX}{}", data.commit_message),
            last_commit_id: existing.last_commit_id,
        };

        self.client
            .delete_file(&data.project, &data.file_path, &opts)
            .map_err(|e| Error::DeleteFile {
                id: data.id.clone().unwrap_or_else(|| data.file_path.clone()),
                status: e
                    .status()
                    .map_or_else(|| "unknown".to_string(), |s| s.to_string()),
                source: Box::new(e),
            })
    }

    /// Imports `project:branch:path` and hydrates it with a read.
    pub fn import(&self, id: &str) -> Result<RepositoryFileData> {
        let mut data = RepositoryFileData::from_import_id(id)?;
        self.read(&mut data)?;
        Ok(data)
    }
}
