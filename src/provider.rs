use crate::client::HttpClient;
use crate::config::{BASE_URL_ENV, ProviderConfig, TOKEN_ENV, validate_api_url_version};
use crate::error::Result;
use crate::resource::{ProjectAccessTokenData, RepositoryFileData};
use crate::schema::{Attribute, AttributeType, ResourceSchema};

pub const PROVIDER_NAME: &str = "terraform-provider-gitlab-repository-files";

/// Provider identity plus the schemas of everything it manages.
#[derive(Debug, Clone)]
pub struct Provider {
    version: String,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl Provider {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{PROVIDER_NAME}/{}", self.version)
    }

    #[must_use]
    pub fn schema() -> ResourceSchema {
        ResourceSchema {
            name: "provider",
            description: "Connection settings shared by every resource.",
            attributes: vec![
                Attribute::new("token", AttributeType::String)
                    .required()
                    .sensitive()
                    .env_default(TOKEN_ENV)
                    .description(
                        "The OAuth2 token or project/personal access token used to connect to GitLab.",
                    ),
                Attribute::new("base_url", AttributeType::String)
                    .optional()
                    .env_default(BASE_URL_ENV)
                    .validate_with(validate_api_url_version)
                    .description("The GitLab Base API URL"),
                Attribute::new("cacert_file", AttributeType::String)
                    .optional()
                    .default_value("")
                    .description(
                        "A file containing the ca certificate to use in case ssl certificate is not from a standard chain",
                    ),
                Attribute::new("insecure", AttributeType::Bool)
                    .optional()
                    .default_value("false")
                    .description("Disable SSL verification of API calls"),
                Attribute::new("client_cert", AttributeType::String)
                    .optional()
                    .default_value("")
                    .description(
                        "File path to client certificate when GitLab instance is behind company proxy. File must contain PEM encoded data.",
                    ),
                Attribute::new("client_key", AttributeType::String)
                    .optional()
                    .default_value("")
                    .description(
                        "File path to client key when GitLab instance is behind company proxy. File must contain PEM encoded data.",
                    ),
            ],
            import_format: None,
        }
    }

    /// Schemas of the managed resources, keyed by resource type name.
    #[must_use]
    pub fn resources() -> Vec<ResourceSchema> {
        vec![RepositoryFileData::schema(), ProjectAccessTokenData::schema()]
    }

    #[must_use]
    pub fn resource(name: &str) -> Option<ResourceSchema> {
        Self::resources().into_iter().find(|r| r.name == name)
    }

    /// Builds the shared API client. The client is read-only afterwards and
    /// can serve any number of resource operations.
    pub fn configure(&self, config: &ProviderConfig) -> Result<HttpClient> {
        HttpClient::new(config, &self.user_agent())
    }
}
