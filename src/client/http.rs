use std::fs;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Certificate, Identity, Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::options::{
    CreateFileOptions, CreateProjectAccessTokenOptions, DeleteFileOptions, GetFileOptions,
    ListOptions, UpdateFileOptions,
};
use super::page::Page;
use super::GitLabApi;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::types::{FileInfo, ProjectAccessToken, RepositoryFile};

const NEXT_PAGE_HEADER: &str = "x-next-page";
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Blocking GitLab client. Holds no per-call state, so one instance can be
/// shared by every resource operation.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
    error: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ProviderConfig, user_agent: &str) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(config.insecure);

        if let Some(path) = config.cacert_path() {
            let pem = fs::read(path)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }

        if let (Some(cert), Some(key)) = (config.client_cert_path(), config.client_key_path()) {
            let mut pem = fs::read(cert)?;
            pem.push(b'\n');
            pem.extend(fs::read(key)?);
            builder = builder.identity(Identity::from_pem(&pem)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url()?,
            token: config.token.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("failed to build API URL for {path}: {e}")))
    }

    fn send<F>(&self, method: Method, path: &str, build: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let request = self
            .client
            .request(method.clone(), url.clone())
            .header(TOKEN_HEADER, &self.token);
        let resp = build(request).send()?;

        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(api_error(&method, &url, resp))
        }
    }

    fn send_json<T, F>(&self, method: Method, path: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let resp = self.send(method, path, build)?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn api_error(method: &Method, url: &Url, resp: Response) -> Error {
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(serde_json::Value::String(message)),
            ..
        }) => message,
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message.to_string(),
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body,
    };

    Error::Api {
        method: method.to_string(),
        url: url.to_string(),
        status,
        message,
    }
}

fn file_path(project: &str, file_path: &str) -> String {
    format!(
        "projects/{}/repository/files/{}",
        urlencoding::encode(project),
        urlencoding::encode(file_path)
    )
}

fn tokens_path(project: i64) -> String {
    format!("projects/{project}/access_tokens")
}

impl GitLabApi for HttpClient {
    fn get_file(
        &self,
        project: &str,
        path: &str,
        opts: &GetFileOptions,
    ) -> Result<RepositoryFile> {
        debug!(project, path, ref_name = %opts.ref_name, "get repository file");
        self.send_json(Method::GET, &file_path(project, path), |req| req.query(opts))
    }

    fn create_file(
        &self,
        project: &str,
        path: &str,
        opts: &CreateFileOptions,
    ) -> Result<FileInfo> {
        debug!(project, path, branch = %opts.branch, "create repository file");
        self.send_json(Method::POST, &file_path(project, path), |req| req.json(opts))
    }

    fn update_file(
        &self,
        project: &str,
        path: &str,
        opts: &UpdateFileOptions,
    ) -> Result<FileInfo> {
        debug!(
            project,
            path,
            branch = %opts.branch,
            last_commit_id = %opts.last_commit_id,
            "update repository file"
        );
        self.send_json(Method::PUT, &file_path(project, path), |req| req.json(opts))
    }

    fn delete_file(&self, project: &str, path: &str, opts: &DeleteFileOptions) -> Result<()> {
        debug!(project, path, branch = %opts.branch, "delete repository file");
        self.send(Method::DELETE, &file_path(project, path), |req| req.json(opts))?;
        Ok(())
    }

    fn list_project_access_tokens(
        &self,
        project: i64,
        opts: &ListOptions,
    ) -> Result<Page<ProjectAccessToken>> {
        debug!(project, page = opts.page, per_page = opts.per_page, "list project access tokens");
        let resp = self.send(Method::GET, &tokens_path(project), |req| req.query(opts))?;
        let next_page = Page::<ProjectAccessToken>::parse_next_page(
            resp.headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        let body = resp.text()?;
        let items: Vec<ProjectAccessToken> = serde_json::from_str(&body)?;
        Ok(Page::new(items, next_page))
    }

    fn create_project_access_token(
        &self,
        project: i64,
        opts: &CreateProjectAccessTokenOptions,
    ) -> Result<ProjectAccessToken> {
        debug!(project, name = %opts.name, "create project access token");
        self.send_json(Method::POST, &tokens_path(project), |req| req.json(opts))
    }

    fn delete_project_access_token(&self, project: i64, token_id: i64) -> Result<()> {
        debug!(project, token_id, "delete project access token");
        let path = format!("{}/{token_id}", tokens_path(project));
        self.send(Method::DELETE, &path, |req| req)?;
        Ok(())
    }
}
