//! svgsort - Put `<defs>` first in SVG documents
//!
//! svgsort parses an SVG, runs the configured plugins over every element and
//! writes the result back out, optionally pretty-printed.

mod ast;
mod config;
mod error;
mod parse;
mod plugin;
mod reorder_defs;
mod serialize;

pub use ast::*;
pub use config::*;
pub use error::*;
pub use parse::*;
pub use plugin::*;
pub use reorder_defs::*;
pub use serialize::*;

/// Process an SVG string with the default configuration.
pub fn process_default(svg: &str) -> Result<String> {
    process(svg, &Config::default())
}

/// Process an SVG string: parse, run the configured plugins, serialize.
pub fn process(svg: &str, config: &Config) -> Result<String> {
    let plugins = config.resolve_plugins()?;
    let mut doc = parse_svg(svg)?;
    invoke_plugins(&mut doc, &plugins);
    Ok(serialize(&doc, &config.js2svg))
}
