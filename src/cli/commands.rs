use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::schema::DescriptionKind;

#[derive(Args, Clone)]
pub struct ConfiguredArgs {
    /// Declared resource configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Tracked state file (JSON)
    #[arg(long)]
    pub state: PathBuf,
}

#[derive(Args, Clone)]
pub struct StateArgs {
    /// Tracked state file (JSON)
    #[arg(long)]
    pub state: PathBuf,
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// Commit the declared file (or overwrite it with overwrite_on_create)
    Create(ConfiguredArgs),

    /// Refresh tracked state from the repository
    Read(StateArgs),

    /// Commit new content or commit metadata for a tracked file
    Update(ConfiguredArgs),

    /// Delete the tracked file from its branch
    Delete(StateArgs),

    /// Start tracking an existing file
    Import {
        /// ID of the form project:branch:file_path
        id: String,

        #[command(flatten)]
        state: StateArgs,
    },
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Create the declared project access token
    Create(ConfiguredArgs),

    /// Refresh tracked state from the project's token list
    Read(StateArgs),

    /// Revoke the tracked token
    Delete(StateArgs),

    /// Start tracking an existing token (its secret cannot be recovered)
    Import {
        /// ID of the form project:token_id
        id: String,

        #[command(flatten)]
        state: StateArgs,
    },
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum DocKind {
    #[default]
    Markdown,
    Plain,
}

impl From<DocKind> for DescriptionKind {
    fn from(kind: DocKind) -> Self {
        match kind {
            DocKind::Markdown => DescriptionKind::Markdown,
            DocKind::Plain => DescriptionKind::Plain,
        }
    }
}
