//! One mounted editor: its snippets, the working stylesheet and the live preview.
//!
//! Every public method is one host interaction and runs to completion.
//! Snippet baselines (`Snippet::html`, `Snippet::css`) are fixed once the
//! session is built, except through the free-mode structure operations which
//! edit the forest all free-mode snippets share.

use crate::config::{
    EditorConfig, Mode, MountConfig, SnippetSource, DEFAULT_ITEM_COUNT, DEFAULT_STRUCTURE,
    SCOPE_CLASS,
};
use crate::error::{EditorError, Result};
use crate::layout::{self, BoxLayout, LayoutOptions};
use crate::parser::structure::{parse_structure, single_container};
use crate::preview::{HtmlLine, Mount, NodeId, NodeKind, PreviewTree};
use crate::style::properties::{self, PropertyValues};
use crate::style::rules::{Property, StyleRule};
use crate::style::stylesheet::{self, CodeLine};
use crate::sync::{synchronize, Patch};
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Snippet {
    name: String,
    html: Vec<NodeId>,
    css: Vec<StyleRule>,
}

impl Snippet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root nodes of the baseline forest.
    pub fn html(&self) -> &[NodeId] {
        &self.html
    }

    /// Baseline rule list.
    pub fn css(&self) -> &[StyleRule] {
        &self.css
    }
}

#[derive(Debug)]
pub struct EditSession {
    id: usize,
    config: EditorConfig,
    tree: PreviewTree,
    snippets: Vec<Snippet>,
    snippet_index: usize,
    cur_css: Vec<StyleRule>,
    /// Net items added (+) or removed (-) per live container since baseline.
    item_count_delta: HashMap<NodeId, i64>,
    code_lines: Vec<CodeLine>,
    /// Scoped stylesheet text; only maintained in free mode.
    stylesheet: String,
}

impl EditSession {
    /// Build the snippets of one mount and show the first of them.
    pub fn new(id: usize, mount: MountConfig) -> Result<Self> {
        let MountConfig { config, snippets: sources } = mount;
        let first = sources.first().ok_or(EditorError::NoSnippets)?.clone();

        let mut tree = PreviewTree::new();
        // Free-mode snippets share one forest built from the first source.
        let free_html = match config.mode {
            Mode::Snippet => Vec::new(),
            Mode::Free => free_forest(&mut tree, &first)?,
        };
        let mut snippets = Vec::with_capacity(sources.len());
        for source in sources {
            let html = match config.mode {
                Mode::Snippet => snippet_forest(&mut tree, &config, &source)?,
                Mode::Free => free_html.clone(),
            };
            let name = source
                .name
                .clone()
                .unwrap_or_else(|| config.fallback_snippet_name().to_string());
            snippets.push(Snippet {
                name,
                html,
                css: stylesheet::parse(&source.css),
            });
        }

        let mut session = EditSession {
            id,
            cur_css: snippets[0].css.clone(),
            code_lines: Vec::new(),
            stylesheet: String::new(),
            config,
            tree,
            snippets,
            snippet_index: 0,
            item_count_delta: HashMap::new(),
        };
        if session.config.mode == Mode::Free {
            session.stylesheet = stylesheet::scoped_stylesheet(&first.css, &session.scope());
        }

        let roots = session.snippets[0].html.clone();
        for root in roots {
            session.tree.render(root);
            session.tree.append_element(Mount::Wrapper, root);
        }
        session.code_lines = stylesheet::serialize(&session.cur_css, session.config.mode);
        session.relabel();
        session.restyle();

        info!(
            "mounted editor {} ({:?} mode, {} snippet(s))",
            id,
            session.config.mode,
            session.snippets.len()
        );
        Ok(session)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn preview(&self) -> &PreviewTree {
        &self.tree
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn snippet_index(&self) -> usize {
        self.snippet_index
    }

    pub fn current_snippet(&self) -> &Snippet {
        &self.snippets[self.snippet_index]
    }

    /// The working copy of the active snippet's rules.
    pub fn cur_css(&self) -> &[StyleRule] {
        &self.cur_css
    }

    /// Net items added to or removed from `container` since the last switch.
    pub fn item_count_delta(&self, container: NodeId) -> i64 {
        self.item_count_delta.get(&container).copied().unwrap_or(0)
    }

    pub fn code_lines(&self) -> &[CodeLine] {
        &self.code_lines
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Class prefix restricting the scoped stylesheet to this mount.
    pub fn scope(&self) -> String {
        format!(".{}.editor-{}", SCOPE_CLASS, self.id)
    }

    // ---------------------------------------------------------------------
    // Snippets and items
    // ---------------------------------------------------------------------

    /// Switch to snippet `index`, reusing every live element whose slot keeps
    /// its role. Returns the structural patches applied to the preview.
    pub fn select_snippet(&mut self, index: usize) -> Vec<Patch> {
        let prev_html = self.snippets[self.snippet_index].html.clone();
        let cur_html = self.snippets[index].html.clone();
        debug!(
            "editor {}: snippet {} -> {}",
            self.id, self.snippet_index, index
        );

        self.restore_item_counts();
        self.snippet_index = index;
        self.cur_css = self.snippets[index].css.clone();
        let patches = synchronize(&mut self.tree, &prev_html, &cur_html, Mount::Wrapper);
        self.update_css_code();
        self.relabel();
        self.restyle();
        patches
    }

    /// Append one item to the first live container.
    ///
    /// Snippet mode only; free mode edits items through the structure
    /// operations and gets `None` here.
    pub fn add_item(&mut self) -> Option<NodeId> {
        if !self.item_buttons_enabled() {
            return None;
        }
        let container = self.tree.first_live_container()?;
        let item = self.tree.create(NodeKind::Item);
        self.tree.append_element(Mount::Node(container), item);
        self.adjust_item_count(container, 1);
        self.relabel();
        self.restyle();
        Some(item)
    }

    /// Drop the last element of the first live container, if it has any.
    /// Snippet mode only, like [`EditSession::add_item`].
    pub fn remove_item(&mut self) -> Option<NodeId> {
        if !self.item_buttons_enabled() {
            return None;
        }
        let container = self.tree.first_live_container()?;
        let removed = self.tree.remove_last_element(Mount::Node(container))?;
        self.adjust_item_count(container, -1);
        self.relabel();
        self.restyle();
        Some(removed)
    }

    fn item_buttons_enabled(&self) -> bool {
        if self.config.mode != Mode::Snippet {
            debug!("editor {}: item buttons are not offered in free mode", self.id);
            return false;
        }
        true
    }

    fn adjust_item_count(&mut self, container: NodeId, variation: i64) {
        *self.item_count_delta.entry(container).or_insert(0) += variation;
    }

    /// Undo every add/remove so the live preview has its baseline shape again.
    pub fn restore_item_counts(&mut self) {
        for (container, delta) in self.item_count_delta.drain() {
            let mount = Mount::Node(container);
            let mut remaining = delta;
            while remaining > 0 {
                if self.tree.remove_last_element(mount).is_none() {
                    break;
                }
                remaining -= 1;
            }
            while remaining < 0 {
                let item = self.tree.create(NodeKind::Item);
                self.tree.append_element(mount, item);
                remaining += 1;
            }
            debug!("restored {:?} by {}", container, -delta);
        }
    }

    // ---------------------------------------------------------------------
    // Stylesheet editing
    // ---------------------------------------------------------------------

    /// Insert a blank rule before rule `index`.
    pub fn insert_rule(&mut self, index: usize) {
        self.cur_css.insert(index, StyleRule::placeholder());
        self.update_css_code();
    }

    pub fn delete_rule(&mut self, index: usize) {
        self.cur_css.remove(index);
        self.update_css_code();
    }

    /// Insert a blank property directly after property `after` of `rule`.
    pub fn insert_property(&mut self, rule: usize, after: usize) {
        self.cur_css[rule]
            .properties
            .insert(after + 1, Property::placeholder());
        self.update_css_code();
    }

    pub fn delete_property(&mut self, rule: usize, property: usize) {
        self.cur_css[rule].properties.remove(property);
        self.update_css_code();
    }

    /// Point `rule` at `.class_name`. A different rule with that selector
    /// absorbs the properties and `rule` goes away.
    pub fn rename_selector(&mut self, rule: usize, class_name: &str) {
        let selector = format!(".{}", class_name);
        let duplicate = self
            .cur_css
            .iter()
            .enumerate()
            .position(|(index, other)| index != rule && other.selector == selector);
        match duplicate {
            Some(target) => {
                let moved = std::mem::take(&mut self.cur_css[rule].properties);
                self.cur_css[target].properties.extend(moved);
                self.cur_css.remove(rule);
                debug!("merged rule {} into {}", rule, selector);
            }
            None => self.cur_css[rule].selector = selector,
        }
        self.update_css_code();
    }

    pub fn set_property_name(&mut self, rule: usize, property: usize, name: &str) {
        self.cur_css[rule].properties[property].name = name.to_string();
        self.update_css_code();
    }

    pub fn set_property_value(&mut self, rule: usize, property: usize, value: &str) {
        self.cur_css[rule].properties[property].value = value.to_string();
        self.update_css_code();
    }

    /// The code view as editable text.
    pub fn css_text(&self) -> String {
        stylesheet::to_text(&self.code_lines)
    }

    /// Replace the working rules with what `text` parses to.
    pub fn commit_css_text(&mut self, text: &str) {
        self.cur_css = stylesheet::parse(text);
        self.prune_empty_rules();
        self.code_lines = stylesheet::serialize(&self.cur_css, self.config.mode);
        if self.config.mode == Mode::Free {
            self.stylesheet = stylesheet::scoped_stylesheet(text, &self.scope());
        }
        self.restyle();
    }

    fn prune_empty_rules(&mut self) {
        self.cur_css.retain(|rule| !rule.properties.is_empty());
    }

    fn update_css_code(&mut self) {
        self.prune_empty_rules();
        self.code_lines = stylesheet::serialize(&self.cur_css, self.config.mode);
        if self.config.mode == Mode::Free {
            let text = stylesheet::to_text(&self.code_lines);
            self.stylesheet = stylesheet::scoped_stylesheet(&text, &self.scope());
        }
        self.restyle();
    }

    // ---------------------------------------------------------------------
    // Choices offered by the code view
    // ---------------------------------------------------------------------

    /// Class names a selector can be switched to, without the leading dot.
    pub fn selector_choices(&self) -> Vec<String> {
        let live = self.tree.live_elements();
        let containers = live
            .iter()
            .filter(|&&id| self.tree.element(id).has_class("container"))
            .count();
        let items = live
            .iter()
            .filter(|&&id| self.tree.element(id).has_class("item"))
            .count();

        let mut choices = Vec::with_capacity(containers + items);
        if containers > 1 {
            choices.extend((1..=containers).map(|n| format!("container{}", n)));
        } else {
            choices.push("container".to_string());
        }
        choices.extend((1..=items).map(|n| format!("item{}", n)));
        choices
    }

    pub fn property_choices(&self) -> Vec<&'static str> {
        properties::property_names().collect()
    }

    pub fn value_choices(&self, rule: usize, property: usize) -> Result<PropertyValues> {
        properties::value_choices(&self.cur_css[rule].properties[property].name)
    }

    // ---------------------------------------------------------------------
    // Structure editing (free mode)
    // ---------------------------------------------------------------------

    pub fn html_code_lines(&self) -> Vec<HtmlLine> {
        self.tree.html_lines(&self.snippets[self.snippet_index].html)
    }

    /// Add an empty top-level container after the existing ones.
    pub fn append_root_container(&mut self) -> NodeId {
        self.assert_free_mode();
        let container = self.tree.create(NodeKind::ROOT_CONTAINER);
        self.edit_roots(|roots| roots.push(container));
        self.tree.render(container);
        self.tree.append_element(Mount::Wrapper, container);
        self.update_html_code();
        container
    }

    /// Add a node right after `node`: a container at top level, an item elsewhere.
    ///
    /// Panics if `node` is no longer part of the forest, e.g. after
    /// [`EditSession::delete_node`].
    pub fn insert_sibling(&mut self, node: NodeId) -> NodeId {
        self.assert_free_mode();
        let new_node = match self.tree.node(node).parent() {
            Some(parent) => {
                let new_node = self.tree.create(NodeKind::Item);
                let siblings = self.tree.node(parent).children();
                let index = position_of(siblings, node)
                    .unwrap_or_else(|| panic!("{:?} is not a child of {:?}", node, parent));
                let next = siblings.get(index + 1).copied();
                self.tree.insert_child(parent, index + 1, new_node);
                self.tree.render(new_node);
                self.tree
                    .insert_element_before(Mount::Node(parent), new_node, next);
                new_node
            }
            None => {
                let new_node = self.tree.create(NodeKind::ROOT_CONTAINER);
                let roots = &self.snippets[self.snippet_index].html;
                let index = position_of(roots, node)
                    .unwrap_or_else(|| panic!("{:?} is not a top-level node", node));
                let next = roots.get(index + 1).copied();
                self.edit_roots(|roots| roots.insert(index + 1, new_node));
                self.tree.render(new_node);
                self.tree
                    .insert_element_before(Mount::Wrapper, new_node, next);
                new_node
            }
        };
        self.update_html_code();
        new_node
    }

    /// Add an item in front of `node`'s children. `node` loses its literal text.
    pub fn insert_first_child(&mut self, node: NodeId) -> NodeId {
        self.assert_free_mode();
        let new_node = self.tree.create(NodeKind::Item);
        let first = self.tree.node(node).children().first().copied();
        self.tree.set_text(node, None);
        if first.is_none() {
            self.tree.element_mut(node).text = None;
        }
        self.tree.insert_child(node, 0, new_node);
        self.tree.render(new_node);
        self.tree
            .insert_element_before(Mount::Node(node), new_node, first);
        self.update_html_code();
        new_node
    }

    /// Remove `node` and its subtree.
    pub fn delete_node(&mut self, node: NodeId) {
        self.assert_free_mode();
        match self.tree.node(node).parent() {
            Some(parent) => {
                self.tree.remove_child(parent, node);
            }
            None => self.edit_roots(|roots| roots.retain(|&root| root != node)),
        }
        self.tree.detach_element(node);
        self.update_html_code();
    }

    /// Give a leaf literal text in place of its number.
    pub fn set_node_text(&mut self, node: NodeId, text: &str) {
        self.assert_free_mode();
        self.tree.set_text(node, Some(text.to_string()));
        self.update_html_code();
    }

    /// Apply a top-level edit to every snippet; they all show the same forest.
    fn edit_roots(&mut self, edit: impl Fn(&mut Vec<NodeId>)) {
        for snippet in &mut self.snippets {
            edit(&mut snippet.html);
        }
    }

    fn update_html_code(&mut self) {
        self.relabel();
        self.restyle();
        debug!(
            "editor {}: structure now has {} html line(s)",
            self.id,
            self.html_code_lines().len()
        );
    }

    fn assert_free_mode(&self) {
        debug_assert_eq!(
            self.config.mode,
            Mode::Free,
            "structure editing edits the baseline and is reserved for free mode"
        );
    }

    // ---------------------------------------------------------------------
    // Derived presentation
    // ---------------------------------------------------------------------

    fn relabel(&mut self) {
        match self.config.mode {
            Mode::Snippet => self.tree.label_live_elements(),
            Mode::Free => {
                let roots = self.snippets[self.snippet_index].html.clone();
                self.tree.label_structure(&roots);
            }
        }
    }

    /// Inline styling is snippet-mode only; free mode relies on the scoped
    /// stylesheet.
    fn restyle(&mut self) {
        if self.config.mode == Mode::Snippet {
            self.tree.apply_inline_styles(&self.cur_css);
        }
    }

    pub fn layout(&self, options: &LayoutOptions) -> Result<Vec<BoxLayout>> {
        layout::compute_layout(&self.tree, options)
    }
}

fn position_of(nodes: &[NodeId], node: NodeId) -> Option<usize> {
    nodes.iter().position(|&candidate| candidate == node)
}

fn snippet_forest(
    tree: &mut PreviewTree,
    config: &EditorConfig,
    source: &SnippetSource,
) -> Result<Vec<NodeId>> {
    if let Some(structure) = &source.structure {
        return parse_structure(tree, structure);
    }
    let count = source
        .item_count
        .or(config.default_item_count)
        .unwrap_or(DEFAULT_ITEM_COUNT);
    Ok(single_container(tree, count))
}

fn free_forest(tree: &mut PreviewTree, first: &SnippetSource) -> Result<Vec<NodeId>> {
    match first.item_count {
        Some(count) => Ok(single_container(tree, count)),
        None => parse_structure(tree, first.structure.as_deref().unwrap_or(DEFAULT_STRUCTURE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snippet_session(sources: Vec<SnippetSource>) -> EditSession {
        EditSession::new(0, MountConfig::new(EditorConfig::new(Mode::Snippet), sources)).unwrap()
    }

    fn live_classes(session: &EditSession) -> Vec<String> {
        session
            .preview()
            .live_elements()
            .into_iter()
            .map(|id| session.preview().element(id).class_attr())
            .collect()
    }

    #[test]
    fn test_mount_shows_first_snippet() {
        let session = snippet_session(vec![
            SnippetSource::new(".container { display: flex; }").named("row"),
            SnippetSource::new("").with_item_count(5),
        ]);
        assert_eq!(session.snippets()[0].name(), "row");
        assert_eq!(session.snippets()[1].name(), "Untitled");
        assert_eq!(
            live_classes(&session),
            vec![
                "container container1",
                "item item1",
                "item item2",
                "item item3"
            ]
        );
        let root = session.preview().element_children(Mount::Wrapper)[0];
        assert_eq!(
            session.preview().element(root).style,
            vec![Property::new("display", "flex")]
        );
        assert!(session.stylesheet().is_empty());
    }

    #[test]
    fn test_empty_mount_is_rejected() {
        let result = EditSession::new(0, MountConfig::new(EditorConfig::default(), vec![]));
        assert_eq!(result.unwrap_err(), EditorError::NoSnippets);
    }

    #[test]
    fn test_item_counts_fall_back_to_editor_default() {
        let config = EditorConfig::new(Mode::Snippet).with_default_item_count(2);
        let session =
            EditSession::new(0, MountConfig::new(config, vec![SnippetSource::new("")])).unwrap();
        assert_eq!(session.preview().live_elements().len(), 3);
    }

    #[test]
    fn test_add_and_remove_items_track_delta() {
        let mut session = snippet_session(vec![SnippetSource::new(".item3 { order: -1; }")]);
        let container = session.preview().first_live_container().unwrap();

        let added = session.add_item().unwrap();
        assert_eq!(session.item_count_delta(container), 1);
        assert_eq!(session.preview().element(added).class_attr(), "item item4");
        assert_eq!(session.preview().element(added).text.as_deref(), Some("4"));

        assert_eq!(session.remove_item(), Some(added));
        assert!(session.remove_item().is_some());
        assert_eq!(session.item_count_delta(container), -1);

        session.restore_item_counts();
        assert_eq!(session.item_count_delta(container), 0);
        assert_eq!(session.preview().element(container).children().len(), 3);
    }

    #[test]
    fn test_remove_item_on_empty_container() {
        let mut session = snippet_session(vec![SnippetSource::new("").with_item_count(0)]);
        let container = session.preview().first_live_container().unwrap();
        assert_eq!(session.remove_item(), None);
        assert_eq!(session.item_count_delta(container), 0);
    }

    #[test]
    fn test_selector_choices_follow_live_preview() {
        let mut session = snippet_session(vec![SnippetSource::new("").with_item_count(2)]);
        assert_eq!(session.selector_choices(), vec!["container", "item1", "item2"]);

        let nested = snippet_session(vec![SnippetSource::new("").with_structure("[1[1]]")]);
        assert_eq!(
            nested.selector_choices(),
            vec!["container1", "container2", "item1", "item2", "item3"]
        );

        session.add_item();
        assert_eq!(session.selector_choices().len(), 4);
    }

    #[test]
    fn test_insert_rule_and_property_use_placeholders() {
        let mut session = snippet_session(vec![SnippetSource::new(".item { order: 1; }")]);
        session.insert_rule(0);
        assert_eq!(session.cur_css()[0], StyleRule::placeholder());
        session.insert_property(1, 0);
        assert_eq!(session.cur_css()[1].properties[1], Property::placeholder());
        assert_eq!(session.cur_css().len(), 2);
    }

    #[test]
    fn test_property_edits_restyle_the_preview() {
        let mut session = snippet_session(vec![SnippetSource::new(".item2 { order: 1; }")]);
        let second = session.preview().live_elements()[2];
        session.set_property_value(0, 0, "-1");
        assert_eq!(
            session.preview().element(second).style,
            vec![Property::new("order", "-1")]
        );
        session.set_property_name(0, 0, "flex-grow");
        assert_eq!(session.preview().element(second).style_attr(), "flex-grow:-1;");
    }

    #[test]
    fn test_value_choices() {
        let session = snippet_session(vec![SnippetSource::new(
            ".container { display: flex; width: 10px; bogus: 1; }",
        )]);
        assert!(matches!(
            session.value_choices(0, 0),
            Ok(PropertyValues::Options(options)) if options.contains(&"flex")
        ));
        assert_eq!(session.value_choices(0, 1), Ok(PropertyValues::FreeText));
        assert_eq!(
            session.value_choices(0, 2),
            Err(EditorError::UnknownProperty("bogus".into()))
        );
    }

    #[test]
    fn test_commit_css_text_reparses() {
        let mut session = snippet_session(vec![SnippetSource::new(".item { order: 1; }")]);
        session.commit_css_text(".container { gap: 4px; }\n.item1 {}");
        assert_eq!(
            session.cur_css(),
            &[StyleRule::new(".container", vec![Property::new("gap", "4px")])]
        );
        assert!(session.css_text().starts_with(".container {\n  gap: 4px;\n}"));
    }

    #[test]
    fn test_free_mode_scoped_stylesheet() {
        let config = EditorConfig::new(Mode::Free).with_title("Playground");
        let mut session = EditSession::new(
            7,
            MountConfig::new(config, vec![SnippetSource::new(".item { order: 1; }")]),
        )
        .unwrap();
        assert_eq!(session.snippets()[0].name(), "main");
        assert!(session.stylesheet().contains(".fg-editor.editor-7 .item"));

        session.rename_selector(0, "item2");
        assert!(session.stylesheet().contains(".fg-editor.editor-7 .item2"));
        let live = session.preview().live_elements();
        assert!(session.preview().element(live[1]).style.is_empty());
    }

    #[test]
    fn test_item_buttons_are_snippet_mode_only() {
        let mut session = EditSession::new(
            0,
            MountConfig::new(
                EditorConfig::new(Mode::Free),
                vec![SnippetSource::new("").with_structure("[2]")],
            ),
        )
        .unwrap();
        let container = session.preview().first_live_container().unwrap();

        assert_eq!(session.add_item(), None);
        assert_eq!(session.remove_item(), None);
        assert_eq!(session.item_count_delta(container), 0);
        assert_eq!(session.preview().element(container).children().len(), 2);
        assert_eq!(session.selector_choices(), vec!["container", "item1", "item2"]);
        let last = session.preview().element(container).children()[1];
        assert_eq!(session.preview().element(last).class_attr(), "item item2");
    }

    #[test]
    #[should_panic(expected = "is not a top-level node")]
    fn test_insert_sibling_of_deleted_node() {
        let mut session = EditSession::new(
            0,
            MountConfig::new(
                EditorConfig::new(Mode::Free),
                vec![SnippetSource::new("").with_structure("[1]")],
            ),
        )
        .unwrap();
        let root = session.current_snippet().html()[0];
        let item = session.preview().node(root).children()[0];
        session.delete_node(item);
        session.insert_sibling(item);
    }

    #[test]
    fn test_free_mode_snippets_share_one_forest() {
        let mut session = EditSession::new(
            0,
            MountConfig::new(
                EditorConfig::new(Mode::Free),
                vec![
                    SnippetSource::new(".item { order: 1; }").with_structure("[2]"),
                    SnippetSource::new(".item { order: 2; }").named("alt"),
                ],
            ),
        )
        .unwrap();
        assert_eq!(session.snippets()[0].html(), session.snippets()[1].html());

        let root = session.current_snippet().html()[0];
        let added = session.insert_sibling(root);
        assert!(session.select_snippet(1).is_empty());
        assert_eq!(session.current_snippet().html(), &[root, added]);
        assert!(session.stylesheet().contains("order: 2"));
    }
}
