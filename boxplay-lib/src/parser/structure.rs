//! The bracket/digit structure notation.
//!
//! `[` opens a container, `]` closes it, and a run of digits `N` stands for
//! `N` items in the current scope. `"[2[1]]"` is a container holding two
//! items and a nested container with one item. The result is a forest: the
//! notation may describe several top-level siblings.

use crate::error::{EditorError, Result};
use crate::preview::{NodeId, NodeKind, PreviewTree};
use log::debug;

/// Largest item count one digit run may stand for.
pub const MAX_ITEM_RUN: usize = 1000;

/// Parse `text` into new nodes of `tree` and return the top-level nodes.
pub fn parse_structure(tree: &mut PreviewTree, text: &str) -> Result<Vec<NodeId>> {
    let mut roots = Vec::new();
    // `None` is the implicit top level.
    let mut scope: Option<NodeId> = None;
    let mut chars = text.chars().enumerate().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '[' => {
                let kind = match scope {
                    None => NodeKind::ROOT_CONTAINER,
                    Some(_) => NodeKind::NESTED_CONTAINER,
                };
                let container = tree.create(kind);
                attach(tree, &mut roots, scope, container);
                scope = Some(container);
            }
            ']' => {
                scope = scope.and_then(|current| tree.node(current).parent());
            }
            digit if digit.is_ascii_digit() => {
                let mut run = String::from(digit);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    run.push(next);
                    chars.next();
                }
                let count = run
                    .parse::<usize>()
                    .ok()
                    .filter(|&count| count <= MAX_ITEM_RUN)
                    .ok_or(EditorError::ItemRunOverflow { position })?;
                for _ in 0..count {
                    let item = tree.create(NodeKind::Item);
                    attach(tree, &mut roots, scope, item);
                }
            }
            other => return Err(EditorError::malformed_structure(other, position)),
        }
    }

    debug!("structure {:?} parsed into {} root(s)", text, roots.len());
    Ok(roots)
}

fn attach(tree: &mut PreviewTree, roots: &mut Vec<NodeId>, scope: Option<NodeId>, node: NodeId) {
    match scope {
        Some(parent) => tree.push(parent, node),
        None => roots.push(node),
    }
}

/// One top-level container holding `item_count` items.
pub fn single_container(tree: &mut PreviewTree, item_count: usize) -> Vec<NodeId> {
    let container = tree.create(NodeKind::ROOT_CONTAINER);
    for _ in 0..item_count {
        let item = tree.create(NodeKind::Item);
        tree.push(container, item);
    }
    vec![container]
}
