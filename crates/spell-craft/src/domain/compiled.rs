//! Compiled commands: a name, string parameters and a shell template.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::PathBuf;

use minijinja::Environment;
use minijinja::UndefinedBehavior;
use serde::Serialize;

use super::config::Parameter;
use super::error::RenderError;

/// Parameter name to supplied value.
pub type ArgumentValues = BTreeMap<String, String>;

fn template_env<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}

/// A runnable incantation.
///
/// Rendering is pure: the same values always produce the same shell string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompiledCommand {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    about: Option<String>,
    parameters: Vec<Parameter>,
    template: String,
    #[serde(skip)]
    placeholders: BTreeSet<String>,
}

impl CompiledCommand {
    /// Parses `template` once and records the placeholders it references.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Result<Self, minijinja::Error> {
        let template = template.into();
        let placeholders = {
            let env = template_env();
            let parsed = env.template_from_str(&template)?;
            parsed.undeclared_variables(false).into_iter().collect()
        };
        Ok(Self {
            name: name.into(),
            about: None,
            parameters,
            template,
            placeholders,
        })
    }

    pub fn with_about(mut self, about: Option<String>) -> Self {
        self.about = about;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    pub fn placeholders(&self) -> &BTreeSet<String> {
        &self.placeholders
    }

    /// Placeholders the template uses that the configuration never declared.
    pub fn undeclared_placeholders(&self) -> Vec<&str> {
        self.placeholders
            .iter()
            .map(String::as_str)
            .filter(|placeholder| !self.parameter_names().any(|name| name == *placeholder))
            .collect()
    }

    /// Substitutes `values` into the template.
    ///
    /// Every declared parameter and every referenced placeholder must have a
    /// value; extra values are ignored.
    pub fn render(&self, values: &ArgumentValues) -> Result<String, RenderError> {
        let required = self
            .parameter_names()
            .chain(self.placeholders.iter().map(String::as_str));
        for name in required {
            if !values.contains_key(name) {
                return Err(RenderError::MissingParameter {
                    command: self.name.clone(),
                    name: name.to_string(),
                });
            }
        }

        let env = template_env();
        let render_error = |source| RenderError::Render {
            command: self.name.clone(),
            source,
        };
        let template = env
            .template_from_str(&self.template)
            .map_err(render_error)?;
        template.render(values).map_err(render_error)
    }
}

/// A plugin directory registered as a CLI namespace.
#[derive(Clone, Debug, Serialize)]
pub struct PluginNamespace {
    pub name: String,
    pub dir: PathBuf,
    pub commands: Vec<CompiledCommand>,
}

impl PluginNamespace {
    pub fn command(&self, name: &str) -> Option<&CompiledCommand> {
        self.commands.iter().find(|command| command.name() == name)
    }
}
