mod models;
mod scope;

pub use models::{FileInfo, ProjectAccessToken, RepositoryFile};
pub use scope::AccessTokenScope;
