//! Plain-text rendering of an outline and its navigation state.

use rc128_model::NodeKind;

use crate::outline::{Outline, OutlineNode};
use crate::state::NavigationState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `[id]` to every line.
    pub show_ids: bool,
}

/// Render the visible part of `outline`: children of collapsed sections are
/// hidden, expanded sections show `-`, collapsed ones `+`, and active nodes
/// carry a trailing `*`.
pub fn render_outline(outline: &Outline, state: &NavigationState) -> String {
    render_outline_with(outline, state, &RenderOptions::default())
}

pub fn render_outline_with(
    outline: &Outline,
    state: &NavigationState,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    for part in outline.parts() {
        render_node(&mut out, part, state, options);
    }
    out
}

fn render_node(out: &mut String, node: &OutlineNode, state: &NavigationState, options: &RenderOptions) {
    let indent = "  ".repeat(node.kind.depth());
    let expanded = state.is_expanded(node.id.as_str());
    let marker = match node.kind {
        NodeKind::Article => "·",
        _ if expanded => "-",
        _ => "+",
    };
    out.push_str(&indent);
    out.push_str(marker);
    out.push(' ');
    out.push_str(&node.title);
    if options.show_ids {
        out.push_str(" [");
        out.push_str(node.id.as_str());
        out.push(']');
    }
    if state.is_active(node.id.as_str()) {
        out.push_str(" *");
    }
    out.push('\n');

    if node.kind.is_section() && expanded {
        for child in &node.children {
            render_node(out, child, state, options);
        }
    }
}
