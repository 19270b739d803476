//! Declared attribute schemas and their documentation.

mod docs;

pub use docs::{DescriptionKind, DocFormat, render_markdown};

/// Checks one declared value; `key` names the attribute in messages.
pub type ValidateFn = fn(&str, &str) -> Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    StringSet,
}

impl AttributeType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Int => "Number",
            AttributeType::Bool => "Boolean",
            AttributeType::StringSet => "Set of String",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    pub sensitive: bool,
    pub description: &'static str,
    pub default: Option<&'static str>,
    pub env_default: Option<&'static str>,
    pub validate: Option<ValidateFn>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            sensitive: false,
            description: "",
            default: None,
            env_default: None,
            validate: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    #[must_use]
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn default_value(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn env_default(mut self, var: &'static str) -> Self {
        self.env_default = Some(var);
        self
    }

    #[must_use]
    pub fn validate_with(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Computed-only attributes are outputs and never declared.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
    /// Shape of the ID accepted by import, if the resource is importable.
    pub import_format: Option<&'static str>,
}

impl ResourceSchema {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes whose change forces destroy-then-create.
    #[must_use]
    pub fn force_new_attributes(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.force_new)
            .map(|a| a.name)
            .collect()
    }

    /// Runs the attribute's validator, if any, over a declared value.
    #[must_use]
    pub fn validate_value(&self, name: &str, value: &str) -> Vec<String> {
        match self.attribute(name).and_then(|a| a.validate.map(|f| (a.name, f))) {
            Some((key, validate)) => validate(value, key),
            None => Vec::new(),
        }
    }
}
