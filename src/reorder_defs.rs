//! The `reorderDefs` plugin: place `<defs>` ahead of their siblings.

use tracing::trace;

use crate::ast::{Element, Node};
use crate::plugin::{ElementVisitor, PluginDescriptor};

/// Element name that gets moved to the front.
pub const DEFS: &str = "defs";

pub const REORDER_DEFS: PluginDescriptor = PluginDescriptor {
    name: "reorderDefs",
    description: "place defs at the start of the document",
    active: true,
    factory: reorder_defs_visitor,
};

/// Descriptor for the `reorderDefs` plugin.
pub fn reorder_defs_plugin() -> PluginDescriptor {
    REORDER_DEFS
}

fn reorder_defs_visitor() -> ElementVisitor {
    ElementVisitor {
        enter: Some(reorder_defs_enter),
        exit: None,
    }
}

/// Enter callback: reorder the visited element's immediate children.
pub fn reorder_defs_enter(elem: &mut Element) {
    reorder_defs(&mut elem.children);
}

/// Stable partition: `defs` elements first, everything else after, each group
/// in its original relative order.
///
/// Only element nodes whose full name is exactly `defs` move; `svg:defs`,
/// text and comments count as "everything else".
pub fn reorder_defs(children: &mut Vec<Node>) {
    let (mut defs, rest): (Vec<Node>, Vec<Node>) = std::mem::take(children)
        .into_iter()
        .partition(|child| child.is_element_named(DEFS));

    if !defs.is_empty() && !rest.is_empty() {
        trace!(defs = defs.len(), others = rest.len(), "moving defs first");
    }

    defs.extend(rest);
    *children = defs;
}
