use std::{collections::BTreeMap, fs, path::Path};

use ini::Ini;
use serde::Serialize;

use crate::error::LintError;

/// Section holding the linter's own options.
pub const LINTER_SECTION: &str = "job_linter";

/// Key under [`LINTER_SECTION`] listing checkers that must not run.
pub const DISABLED_CHECKERS_KEY: &str = "disabled-checker-names";

/// Built-in values for the linter section. User-supplied values win.
pub const CONFIG_DEFAULTS: &[(&str, &[(&str, &str)])] = &[(
    LINTER_SECTION,
    &[
        (DISABLED_CHECKERS_KEY, ""),
        ("allow_default_shebang", "true"),
        ("required_shell_options", "eux"),
    ],
)];

pub type Section = BTreeMap<String, String>;

/// Two-level configuration: section name -> key -> value.
///
/// Values are plain strings. A `Config` is only ever changed by consuming
/// it, so a reference handed to a checker or to the batch driver can't be
/// used to alter the caller's copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    sections: BTreeMap<String, Section>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults table.
    pub fn defaults() -> Self {
        CONFIG_DEFAULTS
            .iter()
            .fold(Self::new(), |config, (section, entries)| {
                entries
                    .iter()
                    .fold(config.with_section(section), |config, (key, value)| {
                        config.with_value(section, key, value)
                    })
            })
    }

    pub fn with_section(mut self, section: &str) -> Self {
        self.sections.entry(section.to_string()).or_default();
        self
    }

    pub fn with_value(mut self, section: &str, key: &str, value: &str) -> Self {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Section names in sorted order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Read a list value. Items are separated by commas and/or whitespace;
    /// a missing key is an empty list.
    pub fn get_list(&self, section: &str, key: &str) -> Vec<String> {
        self.get(section, key)
            .map(|value| {
                value
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Read a boolean value. Returns `None` if the key is missing or the
    /// value isn't a recognized boolean word.
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        match self.get(section, key)?.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        }
    }

    /// Parse INI content, the format of a Jenkins Job Builder
    /// `jenkins_jobs.ini`. Keys are lowercased; values are taken verbatim.
    pub fn from_ini_str(content: &str) -> Result<Self, String> {
        let ini = Ini::load_from_str_noescape(content).map_err(|e| e.to_string())?;

        let mut config = Self::new();
        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(format!("key '{}' appears before any section header", key));
                }
                continue;
            };
            config = config.with_section(name);
            for (key, value) in properties.iter() {
                config = config.with_value(name, &key.to_lowercase(), value);
            }
        }
        Ok(config)
    }

    /// Parse TOML content. Each top-level table becomes a section.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;

        let mut config = Self::new();
        for (name, value) in table {
            let toml::Value::Table(entries) = value else {
                return Err(format!("top-level key '{}' must be a table", name));
            };
            config = config.with_section(&name);
            for (key, value) in entries {
                let value = flatten_value(&value)
                    .ok_or_else(|| format!("nested table '{}.{}' is not supported", name, key))?;
                config = config.with_value(&name, &key, &value);
            }
        }
        Ok(config)
    }

    /// Load a configuration file from disk.
    ///
    /// Files ending in `.toml` are read as TOML, anything else as INI.
    pub fn load(path: &Path) -> Result<Self, LintError> {
        let content = fs::read_to_string(path).map_err(|source| LintError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_ini_str(&content),
        };
        parsed.map_err(|message| LintError::ConfigSyntax {
            path: path.to_path_buf(),
            message,
        })
    }
}

fn flatten_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        toml::Value::Table(_) => None,
        other => Some(other.to_string()),
    }
}

/// Derive the configuration for a single job using the built-in defaults.
pub fn scope(global: &Config) -> Config {
    scope_with(global, &Config::defaults())
}

/// Derive the configuration for a single job.
///
/// Defaults for the linter section are filled in under the user's values,
/// then every other section is dropped. The result always has exactly one
/// section.
pub fn scope_with(global: &Config, defaults: &Config) -> Config {
    let mut section = defaults.section(LINTER_SECTION).cloned().unwrap_or_default();
    if let Some(user) = global.section(LINTER_SECTION) {
        section.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Config {
        sections: BTreeMap::from([(LINTER_SECTION.to_string(), section)]),
    }
}
