//! Pipeline configuration, read from `svgsort.toml`.
//!
//! ```toml
//! [js2svg]
//! pretty = true
//! indent = 2
//!
//! [[plugins]]
//! name = "reorderDefs"
//! active = true
//! ```
//!
//! Plugins may also be listed by name only: `plugins = ["reorderDefs"]`.
//! `indent` also takes a whitespace string, e.g. `indent = "\t"`.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, SvgsortError};
use crate::plugin::PluginDescriptor;
use crate::reorder_defs::REORDER_DEFS;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "svgsort.toml";

/// Plugins that can be named in a config file.
const BUILTIN_PLUGINS: &[PluginDescriptor] = &[REORDER_DEFS];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output formatting
    #[serde(default)]
    pub js2svg: Js2Svg,
    /// Plugins to run, in order
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// Output formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Js2Svg {
    /// Put each node on its own line
    pub pretty: bool,
    /// One level of indentation when `pretty` is set
    pub indent: Indent,
}

impl Default for Js2Svg {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: Indent::Spaces(4),
        }
    }
}

/// Indentation unit: a number of spaces (`indent = 2`) or a literal
/// whitespace string (`indent = "\t"`), at most 255 long either way.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentRepr")]
pub enum Indent {
    Spaces(u8),
    Literal(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Spaces(u8),
    Literal(String),
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(repr: IndentRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            IndentRepr::Spaces(n) => Ok(Indent::Spaces(n)),
            IndentRepr::Literal(s) if !s.chars().all(char::is_whitespace) => {
                Err(format!("indent string must be whitespace, got {s:?}"))
            }
            IndentRepr::Literal(s) if s.len() > usize::from(u8::MAX) => {
                Err(format!("indent string is {} bytes, max is 255", s.len()))
            }
            IndentRepr::Literal(s) => Ok(Indent::Literal(s)),
        }
    }
}

impl Indent {
    /// The text written once per nesting level.
    pub fn unit(&self) -> Cow<'_, str> {
        match self {
            Indent::Spaces(n) => Cow::Owned(" ".repeat(usize::from(*n))),
            Indent::Literal(s) => Cow::Borrowed(s),
        }
    }
}

/// One entry of the `plugins` list: a bare name or a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PluginEntry {
    Name(String),
    Configured(PluginTable),
}

/// `[[plugins]]` table form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginTable {
    pub name: String,
    /// Overrides the plugin's own activation flag
    #[serde(default)]
    pub active: Option<bool>,
}

impl PluginEntry {
    pub fn name(&self) -> &str {
        match self {
            PluginEntry::Name(name) => name,
            PluginEntry::Configured(table) => &table.name,
        }
    }

    fn active(&self) -> Option<bool> {
        match self {
            PluginEntry::Name(_) => None,
            PluginEntry::Configured(table) => table.active,
        }
    }
}

impl Default for Config {
    /// Pretty output with two-space indent, running `reorderDefs`.
    fn default() -> Self {
        Self {
            js2svg: Js2Svg {
                pretty: true,
                indent: Indent::Spaces(2),
            },
            plugins: vec![PluginEntry::Name(REORDER_DEFS.name.to_string())],
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text).map_err(|source| SvgsortError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `svgsort.toml` from `dir` if present, otherwise use the defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!(dir = %dir.display(), "no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Map plugin entries to descriptors, applying `active` overrides.
    pub fn resolve_plugins(&self) -> Result<Vec<PluginDescriptor>> {
        self.plugins
            .iter()
            .map(|entry| {
                let plugin = BUILTIN_PLUGINS
                    .iter()
                    .find(|p| p.name == entry.name())
                    .copied()
                    .ok_or_else(|| SvgsortError::UnknownPlugin(entry.name().to_string()))?;
                Ok(match entry.active() {
                    Some(active) => plugin.with_active(active),
                    None => plugin,
                })
            })
            .collect()
    }
}
