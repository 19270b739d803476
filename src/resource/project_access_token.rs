use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::{DATE_FORMAT, validate_iso_date, validate_scope};
use super::{build_two_part_id, parse_two_part_id};
use crate::client::{CreateProjectAccessTokenOptions, GitLabApi, ListOptions, MAX_PAGE_SIZE, Pages};
use crate::error::{Error, Result};
use crate::schema::{Attribute, AttributeType, ResourceSchema};
use crate::types::{AccessTokenScope, ProjectAccessToken};

pub const RESOURCE_NAME: &str = "gitlabx_project_access_token";

/// Declared and tracked state of one project access token. Every declared
/// field forces replacement; the API cannot modify a token.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAccessTokenData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub project: i64,
    pub name: String,
    pub scopes: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Secret returned by the create call and never again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub revoked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl fmt::Debug for ProjectAccessTokenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectAccessTokenData")
            .field("id", &self.id)
            .field("project", &self.project)
            .field("name", &self.name)
            .field("scopes", &self.scopes)
            .field("expires_at", &self.expires_at)
            .field("token", &self.token.as_ref().map(|_| "<sensitive>"))
            .field("active", &self.active)
            .field("created_at", &self.created_at)
            .field("revoked", &self.revoked)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl ProjectAccessTokenData {
    #[must_use]
    pub fn schema() -> ResourceSchema {
        ResourceSchema {
            name: RESOURCE_NAME,
            description: "This resource allows you to create and manage project access tokens.",
            attributes: vec![
                Attribute::new("project", AttributeType::Int)
                    .required()
                    .force_new()
                    .description("The ID of the project."),
                Attribute::new("name", AttributeType::String)
                    .required()
                    .force_new()
                    .description("The name of the project access token."),
                Attribute::new("scopes", AttributeType::StringSet)
                    .required()
                    .force_new()
                    .validate_with(validate_scope)
                    .description(
                        "The scopes of the token. Valid values are `api`, `read_api`, `read_repository` and `write_repository`.",
                    ),
                Attribute::new("expires_at", AttributeType::String)
                    .optional()
                    .force_new()
                    .validate_with(validate_iso_date)
                    .description("Expiry date of the token, formatted as `YYYY-MM-DD`."),
                Attribute::new("token", AttributeType::String)
                    .computed()
                    .sensitive()
                    .description("The secret token. Only available right after creation."),
                Attribute::new("active", AttributeType::Bool)
                    .computed()
                    .description("Whether the token is active."),
                Attribute::new("created_at", AttributeType::String)
                    .computed()
                    .description("Time the token was created."),
                Attribute::new("revoked", AttributeType::Bool)
                    .computed()
                    .description("Whether the token has been revoked."),
                Attribute::new("user_id", AttributeType::Int)
                    .computed()
                    .description("The ID of the bot user backing the token."),
            ],
            import_format: Some("{project_id}:{token_id}"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let schema = Self::schema();
        let mut errors = Vec::new();
        if self.project <= 0 {
            errors.push("\"project\" is required and must be a positive project ID".to_string());
        }
        if self.name.is_empty() {
            errors.push("\"name\" is required".to_string());
        }
        if self.scopes.is_empty() {
            errors.push("\"scopes\" requires at least one value".to_string());
        }
        for scope in &self.scopes {
            errors.extend(schema.validate_value("scopes", scope));
        }
        if let Some(expires_at) = &self.expires_at {
            errors.extend(schema.validate_value("expires_at", expires_at));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Seeds tracked state from `project:tokenID`; a read hydrates the rest.
    pub fn from_import_id(id: &str) -> Result<Self> {
        let (project, _) = parse_id(id)?;
        Ok(Self {
            id: Some(id.to_string()),
            project,
            ..Default::default()
        })
    }

    fn apply_remote(&mut self, project: i64, token: ProjectAccessToken) {
        self.project = project;
        self.name = token.name;
        if let Some(expires_at) = token.expires_at {
            self.expires_at = Some(expires_at.format(DATE_FORMAT).to_string());
        }
        self.active = token.active;
        self.created_at = Some(token.created_at.to_rfc3339());
        self.revoked = token.revoked;
        self.user_id = Some(token.user_id);
        self.scopes = token.scopes.into_iter().collect();
    }
}

/// Splits `project:tokenID` into its numeric parts.
pub fn parse_id(id: &str) -> Result<(i64, i64)> {
    let (project, token_id) = parse_two_part_id(id)?;
    let parse = |part: &str| {
        part.parse::<i64>().map_err(|_| Error::InvalidId {
            id: id.to_string(),
            reason: format!("{part} cannot be converted to int"),
        })
    };
    Ok((parse(project)?, parse(token_id)?))
}

pub struct ProjectAccessTokenResource<'a, C> {
    client: &'a C,
}

impl<'a, C: GitLabApi> ProjectAccessTokenResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, data: &mut ProjectAccessTokenData) -> Result<()> {
        data.validate()?;

        let scopes: Vec<String> = data.scopes.iter().cloned().collect();
        let scopes = AccessTokenScope::parse_many(&scopes)
            .ok_or_else(|| Error::Validation(vec!["unknown token scope".to_string()]))?;

        let expires_at = data
            .expires_at
            .as_deref()
            .map(|v| NaiveDate::parse_from_str(v, DATE_FORMAT))
            .transpose()?;

        let opts = CreateProjectAccessTokenOptions {
            name: data.name.clone(),
            scopes,
            expires_at,
        };

        debug!(
            project = data.project,
            name = %opts.name,
            scopes = ?opts.scopes,
            expires_at = ?opts.expires_at,
            "create project access token"
        );

        let token = self
            .client
            .create_project_access_token(data.project, &opts)?;

        debug!(project = data.project, token_id = token.id, "created project access token");

        data.id = Some(build_two_part_id(
            &data.project.to_string(),
            &token.id.to_string(),
        ));
        data.token = token.token;

        self.read(data)
    }

    /// Scans the project's tokens page by page for the tracked ID. The API has
    /// no lookup by ID. Tokens added or removed mid-scan can shift entries
    /// across pages, so a concurrent change may hide a live token.
    pub fn read(&self, data: &mut ProjectAccessTokenData) -> Result<()> {
        let Some(id) = data.id.clone() else {
            return Ok(());
        };
        let (project, token_id) = parse_id(&id)?;

        debug!(project, token_id, "read project access token");

        let pages = Pages::new(|page| {
            self.client.list_project_access_tokens(
                project,
                &ListOptions {
                    page,
                    per_page: MAX_PAGE_SIZE,
                },
            )
        });

        for page in pages {
            if let Some(token) = page?.into_iter().find(|t| t.id == token_id) {
                data.apply_remote(project, token);
                return Ok(());
            }
        }

        warn!("project access token {token_id} not found in project {project}, removing from state");
        data.id = None;
        Ok(())
    }

    pub fn delete(&self, data: &ProjectAccessTokenData) -> Result<()> {
        let id = data.id.as_deref().unwrap_or_default();
        let (project, token_id) = parse_id(id)?;

        debug!(project, token_id, "delete project access token");
        self.client.delete_project_access_token(project, token_id)
    }

    /// Imports `project:tokenID` and hydrates it with a read. The secret
    /// cannot be recovered, so `token` stays empty.
    pub fn import(&self, id: &str) -> Result<ProjectAccessTokenData> {
        let mut data = ProjectAccessTokenData::from_import_id(id)?;
        self.read(&mut data)?;
        Ok(data)
    }
}
