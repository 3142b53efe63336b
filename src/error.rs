use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgsortError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),
}

pub type Result<T> = std::result::Result<T, SvgsortError>;
