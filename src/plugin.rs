//! Plugin descriptors and the element traversal that drives them.
//!
//! A plugin is a plain record: a name, a description, an activation flag and
//! a factory producing an [`ElementVisitor`]. The host walks the tree once per
//! active plugin, calling `enter` before descending into an element's children
//! and `exit` after.

use tracing::debug;

use crate::ast::{Document, Element};

/// Callback invoked with the element being visited.
pub type ElementCallback = fn(&mut Element);

/// The element hooks a plugin wants called during traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementVisitor {
    pub enter: Option<ElementCallback>,
    pub exit: Option<ElementCallback>,
}

/// A plugin as the host sees it.
#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub active: bool,
    pub factory: fn() -> ElementVisitor,
}

impl PluginDescriptor {
    /// Copy of this descriptor with the activation flag overridden.
    pub fn with_active(self, active: bool) -> Self {
        Self { active, ..self }
    }
}

/// Run every active plugin over the document, one full traversal each, in order.
pub fn invoke_plugins(doc: &mut Document, plugins: &[PluginDescriptor]) {
    for plugin in plugins {
        if !plugin.active {
            debug!(plugin = plugin.name, "skipping inactive plugin");
            continue;
        }
        debug!(plugin = plugin.name, "running plugin");
        let visitor = (plugin.factory)();
        visit(&mut doc.root, &visitor);
    }
}

fn visit(elem: &mut Element, visitor: &ElementVisitor) {
    if let Some(enter) = visitor.enter {
        enter(elem);
    }
    // Children are read after `enter`, so reordering affects the walk order.
    for child in elem.child_elements_mut() {
        visit(child, visitor);
    }
    if let Some(exit) = visitor.exit {
        exit(elem);
    }
}
