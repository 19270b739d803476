use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const TOKEN_ENV: &str = "GITLAB_TOKEN";
pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/";

/// Connection settings for the GitLab API client.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// OAuth2 token or project/personal access token.
    pub token: String,
    /// Base API URL. Empty means gitlab.com.
    pub base_url: String,
    /// CA certificate for instances whose certificate is not from a standard chain.
    pub cacert_file: Option<PathBuf>,
    /// Disable TLS verification of API calls.
    pub insecure: bool,
    /// PEM client certificate, for instances behind a company proxy.
    pub client_cert: Option<PathBuf>,
    /// PEM client key matching `client_cert`.
    pub client_key: Option<PathBuf>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cacert_file", &self.cacert_file)
            .field("insecure", &self.insecure)
            .field("client_cert", &self.client_cert)
            .field("client_key", &self.client_key)
            .finish()
    }
}

impl ProviderConfig {
    /// Reads a TOML provider block, then applies environment defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ProviderConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Ok(config.with_env_defaults(|key| std::env::var(key).ok()))
    }

    /// A configuration built only from `GITLAB_TOKEN` and `GITLAB_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_defaults(|key| std::env::var(key).ok())
    }

    /// Fills unset `token` and `base_url` from the given variable lookup.
    #[must_use]
    pub fn with_env_defaults<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.token.is_empty() {
            if let Some(token) = lookup(TOKEN_ENV) {
                self.token = token;
            }
        }
        if self.base_url.is_empty() {
            if let Some(base_url) = lookup(BASE_URL_ENV) {
                self.base_url = base_url;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.token.trim().is_empty() {
            errors.push(format!(
                "\"token\" is required; set it in the provider configuration or via {TOKEN_ENV}"
            ));
        }
        errors.extend(validate_api_url_version(&self.base_url, "base_url"));
        if self.client_cert_path().is_some() != self.client_key_path().is_some() {
            errors.push("\"client_cert\" and \"client_key\" must be set together".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// `cacert_file`, with an empty path meaning unset.
    #[must_use]
    pub fn cacert_path(&self) -> Option<&Path> {
        non_empty(self.cacert_file.as_deref())
    }

    #[must_use]
    pub fn client_cert_path(&self) -> Option<&Path> {
        non_empty(self.client_cert.as_deref())
    }

    #[must_use]
    pub fn client_key_path(&self) -> Option<&Path> {
        non_empty(self.client_key.as_deref())
    }

    /// The base URL with the `api/v4/` suffix the client expects.
    pub fn api_url(&self) -> Result<reqwest::Url> {
        let raw = if self.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.as_str()
        };
        let mut url = reqwest::Url::parse(raw)
            .map_err(|e| Error::Config(format!("invalid base_url {raw:?}: {e}")))?;
        let mut path = url.path().to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        if !path.ends_with("/api/v4/") {
            path.push_str("api/v4/");
        }
        url.set_path(&path);
        Ok(url)
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Rejects URLs that point at the retired v3 API.
pub fn validate_api_url_version(value: &str, _key: &str) -> Vec<String> {
    if value.ends_with("/api/v3") || value.ends_with("/api/v3/") {
        vec![format!(
            "terraform-provider-gitlab-repository-files does not support v3 api; please upgrade to /api/v4 in {value}"
        )]
    } else {
        Vec::new()
    }
}
