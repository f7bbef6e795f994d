//! Raw `name:template` lines from `commands.txt`.

/// One parsed line of a command list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub template: String,
}

impl CommandSpec {
    /// Splits `line` at the first `:`.
    ///
    /// Returns `None` when there is no colon or the name is empty. Colons in
    /// the template are kept as-is.
    pub fn parse(line: &str) -> Option<Self> {
        let (name, template) = line.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            template: template.to_string(),
        })
    }

    /// Blank lines and `#` comments carry no command.
    pub fn is_ignorable(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }
}
