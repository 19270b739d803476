use std::fmt::Write;

use super::{Attribute, ResourceSchema};

/// How attribute and resource descriptions are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionKind {
    Plain,
    #[default]
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocFormat {
    pub kind: DescriptionKind,
    /// Append "Defaults to `x`." to attributes that declare a default.
    pub show_defaults: bool,
}

impl DocFormat {
    fn description(&self, attr: &Attribute) -> String {
        let mut desc = attr.description.trim().to_string();
        if self.show_defaults {
            if let Some(default) = attr.default {
                let _ = write!(desc, " Defaults to `{default}`.");
            }
            if let Some(var) = attr.env_default {
                let _ = write!(desc, " Falls back to the `{var}` environment variable.");
            }
        }
        self.text(desc.trim())
    }

    fn text(&self, text: &str) -> String {
        match self.kind {
            DescriptionKind::Markdown => text.to_string(),
            DescriptionKind::Plain => strip_markdown(text),
        }
    }
}

/// Renders a schema as a markdown reference page.
#[must_use]
pub fn render_markdown(schema: &ResourceSchema, format: &DocFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", schema.name);

    let description = schema.description.trim();
    if !description.is_empty() {
        let _ = writeln!(out, "{}\n", format.text(description));
    }

    out.push_str("## Schema\n");

    let sections: [(&str, fn(&Attribute) -> bool); 3] = [
        ("Required", |a| a.required),
        ("Optional", |a| a.optional),
        ("Read-Only", Attribute::is_read_only),
    ];

    for (title, include) in sections {
        let attrs: Vec<&Attribute> = schema.attributes.iter().filter(|a| include(a)).collect();
        if attrs.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n### {title}\n");
        for attr in attrs {
            let mut flags = vec![attr.kind.label()];
            if attr.sensitive {
                flags.push("Sensitive");
            }
            let mut line = format!("- `{}` ({})", attr.name, flags.join(", "));
            let desc = format.description(attr);
            if !desc.is_empty() {
                line.push(' ');
                line.push_str(&desc);
            }
            if attr.force_new {
                line.push_str(" Changing this forces a new resource.");
            }
            let _ = writeln!(out, "{line}");
        }
    }

    if let Some(import_format) = schema.import_format {
        let _ = writeln!(out, "\n## Import\n");
        let _ = writeln!(out, "Import using an ID of the form `{import_format}`.");
    }

    out
}

/// Drops inline code ticks, emphasis markers and link targets.
fn strip_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' | '*' => {}
            '[' => {
                let label: String = chars.by_ref().take_while(|&c| c != ']').collect();
                out.push_str(&label);
                if chars.peek() == Some(&'(') {
                    let target: String = chars.by_ref().skip(1).take_while(|&c| c != ')').collect();
                    let _ = write!(out, " ({target})");
                }
            }
            _ => out.push(c),
        }
    }
    out
}
