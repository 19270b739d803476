use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitlab_repository_files::cli::{
    DocKind, FileCommands, TokenCommands, run_docs, run_file_create, run_file_delete,
    run_file_import, run_file_read, run_file_update, run_token_create, run_token_delete,
    run_token_import, run_token_read,
};

#[derive(Parser)]
#[command(name = "gitlab-repository-files")]
#[command(about = "Manage GitLab repository files and project access tokens", long_about = None)]
struct Cli {
    /// Provider configuration (TOML). GITLAB_TOKEN and GITLAB_BASE_URL fill unset values
    #[arg(long, global = true)]
    provider: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a repository file
    File {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Manage a project access token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Print provider and resource documentation
    Docs {
        /// How descriptions are written
        #[arg(long, value_enum, default_value_t = DocKind::Markdown)]
        format: DocKind,

        /// Mention defaults and environment fallbacks in descriptions
        #[arg(long)]
        show_defaults: bool,

        /// Only document this resource (or "provider")
        #[arg(long)]
        resource: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gitlab_repository_files=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider = cli.provider.as_deref();

    match cli.command {
        Commands::File { command } => match command {
            FileCommands::Create(args) => run_file_create(provider, args)?,
            FileCommands::Read(args) => run_file_read(provider, args)?,
            FileCommands::Update(args) => run_file_update(provider, args)?,
            FileCommands::Delete(args) => run_file_delete(provider, args)?,
            FileCommands::Import { id, state } => run_file_import(provider, &id, state)?,
        },
        Commands::Token { command } => match command {
            TokenCommands::Create(args) => run_token_create(provider, args)?,
            TokenCommands::Read(args) => run_token_read(provider, args)?,
            TokenCommands::Delete(args) => run_token_delete(provider, args)?,
            TokenCommands::Import { id, state } => run_token_import(provider, &id, state)?,
        },
        Commands::Docs {
            format,
            show_defaults,
            resource,
        } => run_docs(format, show_defaults, resource)?,
    }

    Ok(())
}
