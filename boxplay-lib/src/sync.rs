//! Positional reconciliation of the live preview across snippet switches.
//!
//! `prev` and `cur` are the baseline forests of two snippets of the same
//! editor. Slot `i` of one is taken to be the same element as slot `i` of the
//! other, so nodes are paired by index only. Elements whose slot keeps its
//! role stay attached, which keeps the host's in-flight transitions alive.

use crate::preview::{Mount, NodeId, PreviewTree};
use log::{trace, warn};

/// One structural change applied to the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    /// The last element of `mount` was detached.
    Remove { mount: Mount, node: NodeId },
    /// `node` was rendered and attached last in `mount`.
    Append { mount: Mount, node: NodeId },
    /// `new` was rendered and put in slot `index` of `mount` in place of `old`.
    Replace {
        mount: Mount,
        index: usize,
        old: NodeId,
        new: NodeId,
    },
}

/// Bring the elements under `mount` from the shape of `prev` to that of `cur`
/// and return what was changed.
pub fn synchronize(
    tree: &mut PreviewTree,
    prev: &[NodeId],
    cur: &[NodeId],
    mount: Mount,
) -> Vec<Patch> {
    let mut patches = Vec::new();
    sync_children(tree, prev, cur, mount, &mut patches);
    patches
}

fn sync_children(
    tree: &mut PreviewTree,
    prev: &[NodeId],
    cur: &[NodeId],
    mount: Mount,
    patches: &mut Vec<Patch>,
) {
    let shared = prev.len().min(cur.len());

    for _ in shared..prev.len() {
        match tree.remove_last_element(mount) {
            Some(node) => {
                trace!("remove {:?} from {:?}", node, mount);
                patches.push(Patch::Remove { mount, node });
            }
            None => {
                warn!("{:?} has fewer elements than its baseline", mount);
                break;
            }
        }
    }

    for &node in &cur[shared..] {
        tree.render(node);
        tree.append_element(mount, node);
        trace!("append {:?} to {:?}", node, mount);
        patches.push(Patch::Append { mount, node });
    }

    for index in 0..shared {
        let Some(&live) = tree.element_children(mount).get(index) else {
            warn!("{:?} lost slot {} during synchronization", mount, index);
            break;
        };
        let (prev_node, cur_node) = (prev[index], cur[index]);

        if tree.node(prev_node).kind() != tree.node(cur_node).kind() {
            tree.render(cur_node);
            tree.replace_element(mount, live, cur_node);
            trace!("replace {:?} with {:?} in {:?}", live, cur_node, mount);
            patches.push(Patch::Replace {
                mount,
                index,
                old: live,
                new: cur_node,
            });
            // The fresh subtree already mirrors `cur_node`.
            continue;
        }

        let prev_children = tree.node(prev_node).children().to_vec();
        let cur_children = tree.node(cur_node).children().to_vec();
        sync_children(
            tree,
            &prev_children,
            &cur_children,
            Mount::Node(live),
            patches,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::structure::parse_structure;
    use crate::preview::NodeKind;
    use pretty_assertions::assert_eq;

    fn mount_forest(tree: &mut PreviewTree, roots: &[NodeId]) {
        for &root in roots {
            tree.render(root);
            tree.append_element(Mount::Wrapper, root);
        }
    }

    /// Nested element shape below `mount`, as structure notation.
    fn live_shape(tree: &PreviewTree, mount: Mount) -> String {
        let mut out = String::new();
        for &child in tree.element_children(mount) {
            match tree.node(child).kind() {
                NodeKind::Item => out.push('i'),
                NodeKind::Container { .. } => {
                    out.push('[');
                    out.push_str(&live_shape(tree, Mount::Node(child)));
                    out.push(']');
                }
            }
        }
        out
    }

    #[test]
    fn test_same_forest_is_untouched() {
        let mut tree = PreviewTree::new();
        let forest = parse_structure(&mut tree, "[2[3]][1]").unwrap();
        mount_forest(&mut tree, &forest);
        let patches = synchronize(&mut tree, &forest, &forest, Mount::Wrapper);
        assert!(patches.is_empty());
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[ii[iii]][i]");
    }

    #[test]
    fn test_matching_slots_keep_their_elements() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "[3]").unwrap();
        let cur = parse_structure(&mut tree, "[3]").unwrap();
        mount_forest(&mut tree, &prev);
        let kept: Vec<NodeId> = tree.node(prev[0]).children().to_vec();

        let patches = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);

        assert!(patches.is_empty());
        assert_eq!(tree.element_children(Mount::Wrapper), &prev[..]);
        assert_eq!(tree.element(prev[0]).children(), &kept[..]);
    }

    #[test]
    fn test_item_count_changes_touch_only_the_tail() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "[3]").unwrap();
        let cur = parse_structure(&mut tree, "[5]").unwrap();
        mount_forest(&mut tree, &prev);

        let grow = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);
        let cur_items = tree.node(cur[0]).children().to_vec();
        assert_eq!(
            grow,
            vec![
                Patch::Append {
                    mount: Mount::Node(prev[0]),
                    node: cur_items[3]
                },
                Patch::Append {
                    mount: Mount::Node(prev[0]),
                    node: cur_items[4]
                },
            ]
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[iiiii]");

        let shrink = synchronize(&mut tree, &cur, &prev, Mount::Wrapper);
        assert_eq!(
            shrink,
            vec![
                Patch::Remove {
                    mount: Mount::Node(prev[0]),
                    node: cur_items[4]
                },
                Patch::Remove {
                    mount: Mount::Node(prev[0]),
                    node: cur_items[3]
                },
            ]
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[iii]");
    }

    #[test]
    fn test_role_change_replaces_wholesale() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "[3]").unwrap();
        let cur = parse_structure(&mut tree, "[1[2]1]").unwrap();
        mount_forest(&mut tree, &prev);
        let prev_items = tree.node(prev[0]).children().to_vec();
        let cur_items = tree.node(cur[0]).children().to_vec();

        let patches = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);

        assert_eq!(
            patches,
            vec![Patch::Replace {
                mount: Mount::Node(prev[0]),
                index: 1,
                old: prev_items[1],
                new: cur_items[1],
            }]
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[i[ii]i]");
        let live = tree.element(prev[0]).children();
        assert_eq!(live[0], prev_items[0]);
        assert_eq!(live[2], prev_items[2]);
    }

    #[test]
    fn test_replaced_slot_is_not_walked_again() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "[2]").unwrap();
        let cur = parse_structure(&mut tree, "[1[3]]").unwrap();
        mount_forest(&mut tree, &prev);
        let prev_items = tree.node(prev[0]).children().to_vec();
        let nested = tree.node(cur[0]).children()[1];
        let nested_items = tree.node(nested).children().to_vec();

        let patches = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);

        assert_eq!(
            patches,
            vec![Patch::Replace {
                mount: Mount::Node(prev[0]),
                index: 1,
                old: prev_items[1],
                new: nested,
            }]
        );
        assert_eq!(tree.element(nested).children(), &nested_items[..]);
        assert_eq!(
            tree.element(nested).attached_to(),
            Some(Mount::Node(prev[0]))
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[i[iii]]");
    }

    #[test]
    fn test_forest_length_changes() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "[1]").unwrap();
        let cur = parse_structure(&mut tree, "[1][2]").unwrap();
        mount_forest(&mut tree, &prev);

        let patches = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);
        assert_eq!(
            patches,
            vec![Patch::Append {
                mount: Mount::Wrapper,
                node: cur[1]
            }]
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[i][ii]");

        let back = synchronize(&mut tree, &cur, &prev, Mount::Wrapper);
        assert_eq!(
            back,
            vec![Patch::Remove {
                mount: Mount::Wrapper,
                node: cur[1]
            }]
        );
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[i]");
    }

    #[test]
    fn test_top_level_item_against_container() {
        let mut tree = PreviewTree::new();
        let prev = parse_structure(&mut tree, "1").unwrap();
        let cur = parse_structure(&mut tree, "[2]").unwrap();
        mount_forest(&mut tree, &prev);

        let patches = synchronize(&mut tree, &prev, &cur, Mount::Wrapper);
        assert_eq!(patches.len(), 1);
        assert_eq!(live_shape(&tree, Mount::Wrapper), "[ii]");
        assert_eq!(tree.element(prev[0]).attached_to(), None);
    }
}
