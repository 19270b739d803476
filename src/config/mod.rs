mod provider;

pub use provider::{
    BASE_URL_ENV, DEFAULT_BASE_URL, ProviderConfig, TOKEN_ENV, validate_api_url_version,
};
