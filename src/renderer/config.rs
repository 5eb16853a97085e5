//! Formatting options and indent resolution

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// One indentation unit, before validation.
///
/// A non-negative integer means that many space characters. A string must
/// consist entirely of spaces or entirely of tabs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IndentSpec {
    Count(u32),
    Literal(String),
}

impl IndentSpec {
    /// Resolve to the literal indent atom.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIndent`] naming `option` when the value
    /// is a string mixing spaces, tabs, or other characters.
    pub fn resolve(&self, option: &'static str) -> Result<String, ConfigError> {
        match self {
            IndentSpec::Count(n) => Ok(" ".repeat(*n as usize)),
            IndentSpec::Literal(s)
                if s.chars().all(|c| c == ' ') || s.chars().all(|c| c == '\t') =>
            {
                Ok(s.clone())
            }
            IndentSpec::Literal(_) => Err(ConfigError::InvalidIndent { option }),
        }
    }

    /// Interpret a command-line value.
    ///
    /// Integers become space counts and a string of `t` characters becomes
    /// that many literal tabs; anything else is kept as-is and validated by
    /// [`resolve`](Self::resolve).
    pub fn from_cli_arg(arg: &str) -> Self {
        if !arg.is_empty() && arg.chars().all(|c| c == 't') {
            return IndentSpec::Literal("\t".repeat(arg.len()));
        }
        match arg.parse::<u32>() {
            Ok(n) => IndentSpec::Count(n),
            Err(_) => IndentSpec::Literal(arg.to_string()),
        }
    }
}

/// Options controlling the rendered layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indent atom repeated once per nesting level
    pub shiftwidth: IndentSpec,

    /// Added after one shiftwidth to align attribute lines
    pub attr_extra_indent: IndentSpec,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            shiftwidth: IndentSpec::Count(2),
            attr_extra_indent: IndentSpec::Count(1),
        }
    }
}

/// TOML structure for deserializing an options file
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlOptions {
    shiftwidth: Option<IndentSpec>,
    attr_extra_indent: Option<IndentSpec>,
}

impl FormatOptions {
    /// Create options with default values (2-space indent, 1 extra space
    /// for attributes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-level indent
    pub fn with_shiftwidth(mut self, spec: IndentSpec) -> Self {
        self.shiftwidth = spec;
        self
    }

    /// Set the extra attribute indent
    pub fn with_attr_extra_indent(mut self, spec: IndentSpec) -> Self {
        self.attr_extra_indent = spec;
        self
    }

    /// Load options from a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlOptions = toml::from_str(content)?;
        let defaults = Self::default();
        Ok(Self {
            shiftwidth: parsed.shiftwidth.unwrap_or(defaults.shiftwidth),
            attr_extra_indent: parsed.attr_extra_indent.unwrap_or(defaults.attr_extra_indent),
        })
    }
}
