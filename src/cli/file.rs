use std::path::Path;

use super::commands::{ConfiguredArgs, StateArgs};
use super::connect;
use super::state::{load_config, load_state, remove_state, save_state};
use crate::resource::{RepositoryFileData, RepositoryFileResource};

fn print_file(verb: &str, data: &RepositoryFileData) {
    println!(
        "{verb} repository file '{}' on branch '{}' in project '{}'",
        data.file_path, data.branch, data.project
    );
}

/// Declared fields that differ from tracked state and cannot change in place.
fn replaced_attributes(prior: &RepositoryFileData, declared: &RepositoryFileData) -> Vec<&'static str> {
    RepositoryFileData::schema()
        .force_new_attributes()
        .into_iter()
        .filter(|name| match *name {
            "project" => prior.project != declared.project,
            "file_path" => prior.file_path != declared.file_path,
            "branch" => prior.branch != declared.branch,
            _ => false,
        })
        .collect()
}

pub fn run_file_create(provider: Option<&Path>, args: ConfiguredArgs) -> anyhow::Result<()> {
    let mut data: RepositoryFileData = load_config(&args.config)?;
    data.validate()?;

    let client = connect(provider)?;
    RepositoryFileResource::new(&client).create(&mut data)?;

    if data.id.is_none() {
        anyhow::bail!("Repository file was created but could not be read back");
    }

    save_state(&args.state, &data)?;
    print_file("Created", &data);
    Ok(())
}

pub fn run_file_read(provider: Option<&Path>, args: StateArgs) -> anyhow::Result<()> {
    let mut data: RepositoryFileData = load_state(&args.state)?;

    let client = connect(provider)?;
    RepositoryFileResource::new(&client).read(&mut data)?;

    if data.id.is_none() {
        remove_state(&args.state)?;
        println!(
            "Repository file '{}' no longer exists; removed {}",
            data.file_path,
            args.state.display()
        );
        return Ok(());
    }

    save_state(&args.state, &data)?;
    print_file("Read", &data);
    Ok(())
}

pub fn run_file_update(provider: Option<&Path>, args: ConfiguredArgs) -> anyhow::Result<()> {
    let prior: RepositoryFileData = load_state(&args.state)?;
    let mut data: RepositoryFileData = load_config(&args.config)?;
    data.validate()?;

    let replaced = replaced_attributes(&prior, &data);
    if !replaced.is_empty() {
        anyhow::bail!(
            "Changing {} forces a new resource; delete and create instead",
            replaced.join(", ")
        );
    }

    data.id = prior.id;

    let client = connect(provider)?;
    RepositoryFileResource::new(&client).update(&mut data)?;

    if data.id.is_none() {
        remove_state(&args.state)?;
        anyhow::bail!("Repository file disappeared during update");
    }

    save_state(&args.state, &data)?;
    print_file("Updated", &data);
    Ok(())
}

pub fn run_file_delete(provider: Option<&Path>, args: StateArgs) -> anyhow::Result<()> {
    let data: RepositoryFileData = load_state(&args.state)?;

    let client = connect(provider)?;
    RepositoryFileResource::new(&client).delete(&data)?;

    remove_state(&args.state)?;
    print_file("Deleted", &data);
    Ok(())
}

pub fn run_file_import(provider: Option<&Path>, id: &str, args: StateArgs) -> anyhow::Result<()> {
    let client = connect(provider)?;
    let data = RepositoryFileResource::new(&client).import(id)?;

    if data.id.is_none() {
        anyhow::bail!("Cannot import non-existent repository file: {id}");
    }

    save_state(&args.state, &data)?;
    print_file("Imported", &data);
    Ok(())
}
