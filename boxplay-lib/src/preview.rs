//! The preview tree: container/item nodes and their presentation elements.
//!
//! Nodes live in an arena owned by [`PreviewTree`] and are addressed by
//! [`NodeId`]. Two relations are tracked separately:
//!
//! * the model tree (`children`/`parent`), which is what the structure
//!   notation describes. A node has at most one model parent; the parent link
//!   is only used for navigation.
//! * the presentation tree (`Element::children`), which is what the host
//!   shows. It starts out as a copy of the model tree (see
//!   [`PreviewTree::render`]) but diverges when items are added or removed
//!   through the live preview, and when the synchronizer keeps elements of a
//!   previous snippet in place.
//!
//! Attaching an element that is already attached somewhere else moves it.

use crate::style::matcher;
use crate::style::rules::{Property, StyleRule};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `nested` containers sit inside an item and carry both classes.
    Container { nested: bool },
    Item,
}

impl NodeKind {
    pub const ROOT_CONTAINER: NodeKind = NodeKind::Container { nested: false };
    pub const NESTED_CONTAINER: NodeKind = NodeKind::Container { nested: true };

    pub fn base_classes(self) -> &'static [&'static str] {
        match self {
            NodeKind::Container { nested: false } => &["container"],
            NodeKind::Container { nested: true } => &["item", "container"],
            NodeKind::Item => &["item"],
        }
    }

    pub fn class_name(self) -> String {
        self.base_classes().join(" ")
    }

    pub fn is_item(self) -> bool {
        matches!(self, NodeKind::Item | NodeKind::Container { nested: true })
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Container { .. })
    }
}

/// Where a presentation element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mount {
    /// The preview wrapper holding the top-level elements.
    Wrapper,
    Node(NodeId),
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub style: Vec<Property>,
    children: Vec<NodeId>,
    attached_to: Option<Mount>,
}

impl Element {
    fn for_kind(kind: NodeKind) -> Self {
        Element {
            classes: kind.base_classes().iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attached_to(&self) -> Option<Mount> {
        self.attached_to
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|class| class == class_name)
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn style_attr(&self) -> String {
        matcher::style_text(&self.style)
    }
}

#[derive(Debug, Clone)]
pub struct PreviewNode {
    kind: NodeKind,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// `None` means the text is derived from the node's position.
    text: Option<String>,
    element: Element,
}

impl PreviewNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

/// One line of the HTML code view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlLine {
    Open {
        depth: usize,
        node: NodeId,
        class_name: String,
    },
    Close {
        depth: usize,
        node: NodeId,
    },
    Leaf {
        depth: usize,
        node: NodeId,
        class_name: String,
        text: String,
    },
}

impl fmt::Display for HtmlLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlLine::Open {
                depth, class_name, ..
            } => write!(f, "{}<div class=\"{}\">", "  ".repeat(*depth), class_name),
            HtmlLine::Close { depth, .. } => write!(f, "{}</div>", "  ".repeat(*depth)),
            HtmlLine::Leaf {
                depth,
                class_name,
                text,
                ..
            } => write!(
                f,
                "{}<div class=\"{}\">{}</div>",
                "  ".repeat(*depth),
                class_name,
                text
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct PreviewTree {
    nodes: Vec<PreviewNode>,
    wrapper: Vec<NodeId>,
}

impl PreviewTree {
    pub fn new() -> Self {
        PreviewTree::default()
    }

    /// Allocate a detached node whose element carries the kind's classes.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PreviewNode {
            kind,
            children: Vec::new(),
            parent: None,
            text: None,
            element: Element::for_kind(kind),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &PreviewNode {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0].element
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0].element
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.0].kind = kind;
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<String>) {
        self.nodes[id.0].text = text;
    }

    // ---------------------------------------------------------------------
    // Model tree
    // ---------------------------------------------------------------------

    /// Hand `child` over to `parent`. The child must not have an owner yet.
    pub fn push(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "{:?} already has a parent",
            child
        );
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "{:?} already has a parent",
            child
        );
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Sever `child` from `parent`. Does nothing if it is not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|&c| c == child) {
            Some(index) => {
                children.remove(index);
                self.nodes[child.0].parent = None;
                true
            }
            None => false,
        }
    }

    /// Rebuild the element subtree of `id` from its model children.
    ///
    /// Always a full rebuild; every descendant is rendered again.
    pub fn render(&mut self, id: NodeId) {
        self.clear_elements(Mount::Node(id));
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.render(child);
            self.append_element(Mount::Node(id), child);
        }
    }

    // ---------------------------------------------------------------------
    // Presentation tree
    // ---------------------------------------------------------------------

    pub fn element_children(&self, mount: Mount) -> &[NodeId] {
        match mount {
            Mount::Wrapper => &self.wrapper,
            Mount::Node(id) => &self.nodes[id.0].element.children,
        }
    }

    fn element_children_mut(&mut self, mount: Mount) -> &mut Vec<NodeId> {
        match mount {
            Mount::Wrapper => &mut self.wrapper,
            Mount::Node(id) => &mut self.nodes[id.0].element.children,
        }
    }

    fn clear_elements(&mut self, mount: Mount) {
        let detached = std::mem::take(self.element_children_mut(mount));
        for child in detached {
            self.nodes[child.0].element.attached_to = None;
        }
    }

    /// Take the element of `id` out of whatever it is attached to.
    pub fn detach_element(&mut self, id: NodeId) {
        if let Some(mount) = self.nodes[id.0].element.attached_to.take() {
            self.element_children_mut(mount).retain(|&child| child != id);
        }
    }

    pub fn append_element(&mut self, mount: Mount, child: NodeId) {
        self.detach_element(child);
        self.element_children_mut(mount).push(child);
        self.nodes[child.0].element.attached_to = Some(mount);
    }

    /// Attach `child` before `reference`, or last when there is no reference.
    pub fn insert_element_before(
        &mut self,
        mount: Mount,
        child: NodeId,
        reference: Option<NodeId>,
    ) {
        self.detach_element(child);
        let siblings = self.element_children_mut(mount);
        let index = reference
            .and_then(|reference| siblings.iter().position(|&c| c == reference))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].element.attached_to = Some(mount);
    }

    /// Put `new` where `old` is and detach `old`.
    pub fn replace_element(&mut self, mount: Mount, old: NodeId, new: NodeId) {
        self.insert_element_before(mount, new, Some(old));
        self.detach_element(old);
    }

    pub fn remove_last_element(&mut self, mount: Mount) -> Option<NodeId> {
        let last = *self.element_children(mount).last()?;
        self.detach_element(last);
        Some(last)
    }

    /// Every element below the wrapper, in document order.
    pub fn live_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in &self.wrapper {
            self.collect_elements(root, &mut out);
        }
        out
    }

    fn collect_elements(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.nodes[id.0].element.children {
            self.collect_elements(child, out);
        }
    }

    /// The first live element carrying the `container` class.
    pub fn first_live_container(&self) -> Option<NodeId> {
        self.live_elements()
            .into_iter()
            .find(|&id| self.element(id).has_class("container"))
    }

    // ---------------------------------------------------------------------
    // Derived labels and styling
    // ---------------------------------------------------------------------

    /// Number every live item and container in document order.
    ///
    /// Items get `item<N>` and, when they have no element children, their
    /// literal text or their number as text. Containers get `container<N>`.
    pub fn label_live_elements(&mut self) {
        let mut item_count = 0;
        let mut container_count = 0;
        for id in self.live_elements() {
            let node = &mut self.nodes[id.0];
            let kind = node.kind;
            let mut classes: Vec<String> =
                kind.base_classes().iter().map(|c| c.to_string()).collect();
            if kind.is_item() {
                item_count += 1;
                classes.push(format!("item{}", item_count));
                if node.element.children.is_empty() {
                    node.element.text =
                        Some(node.text.clone().unwrap_or_else(|| item_count.to_string()));
                }
            }
            if kind.is_container() {
                container_count += 1;
                classes.push(format!("container{}", container_count));
            }
            node.element.classes = classes;
        }
    }

    /// Re-derive roles and labels from the model tree below `roots`.
    ///
    /// Nodes with a parent are items; nodes with children, or without a
    /// parent, are containers. Leaves show their literal text or number.
    pub fn label_structure(&mut self, roots: &[NodeId]) {
        let mut counts = LabelCounts {
            item: 1,
            container: 1,
        };
        for &root in roots {
            self.label_structure_node(root, &mut counts);
        }
    }

    fn label_structure_node(&mut self, id: NodeId, counts: &mut LabelCounts) {
        let node = &mut self.nodes[id.0];
        let has_parent = node.parent.is_some();
        let mut classes = Vec::new();
        if has_parent {
            classes.push("item".to_string());
        }
        if !node.children.is_empty() || !has_parent {
            classes.push("container".to_string());
            classes.push(format!("container{}", counts.container));
            counts.container += 1;
            node.kind = NodeKind::Container { nested: has_parent };
        } else {
            node.element.text = Some(
                node.text
                    .clone()
                    .unwrap_or_else(|| counts.item.to_string()),
            );
            classes.push(format!("item{}", counts.item));
            counts.item += 1;
            node.kind = NodeKind::Item;
        }
        node.element.classes = classes;
        let children = node.children.clone();
        for child in children {
            self.label_structure_node(child, counts);
        }
    }

    /// Reset every live element's inline style from `rules`.
    pub fn apply_inline_styles(&mut self, rules: &[StyleRule]) {
        for id in self.live_elements() {
            let element = &mut self.nodes[id.0].element;
            element.style = matcher::compute_inline_style(&element.classes, rules);
        }
    }

    // ---------------------------------------------------------------------
    // Code view
    // ---------------------------------------------------------------------

    /// HTML code view of the model tree below `roots`.
    pub fn html_lines(&self, roots: &[NodeId]) -> Vec<HtmlLine> {
        let mut lines = Vec::new();
        for &root in roots {
            self.push_html_lines(root, 0, &mut lines);
        }
        lines
    }

    fn push_html_lines(&self, id: NodeId, depth: usize, lines: &mut Vec<HtmlLine>) {
        let node = &self.nodes[id.0];
        let class_name = node.element.class_attr();
        if node.children.is_empty() {
            lines.push(HtmlLine::Leaf {
                depth,
                node: id,
                class_name,
                text: node.element.text.clone().unwrap_or_default(),
            });
            return;
        }
        lines.push(HtmlLine::Open {
            depth,
            node: id,
            class_name,
        });
        for &child in &node.children {
            self.push_html_lines(child, depth + 1, lines);
        }
        lines.push(HtmlLine::Close { depth, node: id });
    }
}

struct LabelCounts {
    item: usize,
    container: usize,
}
