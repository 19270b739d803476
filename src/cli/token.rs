use std::path::Path;

use super::commands::{ConfiguredArgs, StateArgs};
use super::connect;
use super::state::{load_config, load_state, remove_state, save_state};
use crate::resource::{ProjectAccessTokenData, ProjectAccessTokenResource};

fn print_token(verb: &str, data: &ProjectAccessTokenData) {
    let scopes: Vec<&str> = data.scopes.iter().map(String::as_str).collect();
    println!(
        "{verb} project access token '{}' ({}) in project {} [{}]",
        data.name,
        data.id.as_deref().unwrap_or("-"),
        data.project,
        scopes.join(", ")
    );
}

pub fn run_token_create(provider: Option<&Path>, args: ConfiguredArgs) -> anyhow::Result<()> {
    let mut data: ProjectAccessTokenData = load_config(&args.config)?;
    data.validate()?;

    let client = connect(provider)?;
    ProjectAccessTokenResource::new(&client).create(&mut data)?;

    save_state(&args.state, &data)?;
    print_token("Created", &data);
    println!(
        "  The token secret is stored in {} - it cannot be retrieved later.",
        args.state.display()
    );
    Ok(())
}

pub fn run_token_read(provider: Option<&Path>, args: StateArgs) -> anyhow::Result<()> {
    let mut data: ProjectAccessTokenData = load_state(&args.state)?;

    let client = connect(provider)?;
    ProjectAccessTokenResource::new(&client).read(&mut data)?;

    if data.id.is_none() {
        remove_state(&args.state)?;
        println!(
            "Project access token '{}' no longer exists; removed {}",
            data.name,
            args.state.display()
        );
        return Ok(());
    }

    save_state(&args.state, &data)?;
    print_token("Read", &data);
    Ok(())
}

pub fn run_token_delete(provider: Option<&Path>, args: StateArgs) -> anyhow::Result<()> {
    let data: ProjectAccessTokenData = load_state(&args.state)?;

    let client = connect(provider)?;
    ProjectAccessTokenResource::new(&client).delete(&data)?;

    remove_state(&args.state)?;
    print_token("Deleted", &data);
    Ok(())
}

pub fn run_token_import(provider: Option<&Path>, id: &str, args: StateArgs) -> anyhow::Result<()> {
    let client = connect(provider)?;
    let data = ProjectAccessTokenResource::new(&client).import(id)?;

    if data.id.is_none() {
        anyhow::bail!("Cannot import non-existent project access token: {id}");
    }

    save_state(&args.state, &data)?;
    print_token("Imported", &data);
    Ok(())
}
