use super::commands::DocKind;
use crate::provider::Provider;
use crate::schema::{DocFormat, render_markdown};

pub fn run_docs(kind: DocKind, show_defaults: bool, resource: Option<String>) -> anyhow::Result<()> {
    let format = DocFormat {
        kind: kind.into(),
        show_defaults,
    };

    let schemas = match resource {
        Some(name) if name == "provider" => vec![Provider::schema()],
        Some(name) => vec![
            Provider::resource(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown resource: {name}"))?,
        ],
        None => {
            let mut all = vec![Provider::schema()];
            all.extend(Provider::resources());
            all
        }
    };

    let pages: Vec<String> = schemas
        .iter()
        .map(|schema| render_markdown(schema, &format))
        .collect();
    print!("{}", pages.join("\n"));
    Ok(())
}
