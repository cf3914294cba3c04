use crate::error::{EditorError, Result};
use crate::preview::{Mount, NodeId, PreviewTree};
use crate::style::rules::Property;
use log::trace;
use std::collections::HashMap;
use taffy::{
    AlignContent, AlignItems, AvailableSpace, Dimension, Display, FlexDirection, FlexWrap,
    LengthPercentage, Size, Style, TaffyTree,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Width of the preview wrapper in pixels.
    pub width: f32,
    /// Minimum edge of an element without element children.
    pub item_size: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            width: 600.0,
            item_size: 40.0,
        }
    }
}

/// Absolute box of one live element, relative to the wrapper's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    pub node: NodeId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Lay out the live preview using each element's inline declarations.
/// Boxes come back in document order.
pub fn compute_layout(tree: &PreviewTree, options: &LayoutOptions) -> Result<Vec<BoxLayout>> {
    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let mut handles = HashMap::new();

    let mut root_children = Vec::new();
    for &child in tree.element_children(Mount::Wrapper) {
        root_children.push(convert_element(&mut taffy, tree, child, options, &mut handles)?);
    }
    let root_style = Style {
        display: Display::Block,
        size: Size {
            width: Dimension::Length(options.width),
            height: Dimension::Auto,
        },
        ..Default::default()
    };
    let root = taffy
        .new_with_children(root_style, &root_children)
        .map_err(layout_error)?;

    taffy
        .compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(options.width),
                height: AvailableSpace::MaxContent,
            },
        )
        .map_err(layout_error)?;

    let mut boxes = Vec::with_capacity(handles.len());
    for &child in tree.element_children(Mount::Wrapper) {
        collect_boxes(&taffy, tree, child, &handles, (0.0, 0.0), &mut boxes)?;
    }
    Ok(boxes)
}

fn layout_error(err: taffy::TaffyError) -> EditorError {
    EditorError::Layout(format!("{:?}", err))
}

fn convert_element(
    taffy: &mut TaffyTree<()>,
    tree: &PreviewTree,
    id: NodeId,
    options: &LayoutOptions,
    handles: &mut HashMap<NodeId, taffy::NodeId>,
) -> Result<taffy::NodeId> {
    let element = tree.element(id);
    let mut style = style_from_declarations(&element.style);

    let handle = if element.children().is_empty() {
        style.min_size = Size {
            width: Dimension::Length(options.item_size),
            height: Dimension::Length(options.item_size),
        };
        taffy.new_leaf(style).map_err(layout_error)?
    } else {
        let mut children = Vec::with_capacity(element.children().len());
        for &child in element.children() {
            children.push(convert_element(taffy, tree, child, options, handles)?);
        }
        taffy
            .new_with_children(style, &children)
            .map_err(layout_error)?
    };
    handles.insert(id, handle);
    Ok(handle)
}

fn collect_boxes(
    taffy: &TaffyTree<()>,
    tree: &PreviewTree,
    id: NodeId,
    handles: &HashMap<NodeId, taffy::NodeId>,
    origin: (f32, f32),
    boxes: &mut Vec<BoxLayout>,
) -> Result<()> {
    let handle = handles
        .get(&id)
        .copied()
        .ok_or_else(|| EditorError::Layout(format!("{:?} was not laid out", id)))?;
    let layout = taffy.layout(handle).map_err(layout_error)?;
    let x = origin.0 + layout.location.x;
    let y = origin.1 + layout.location.y;
    boxes.push(BoxLayout {
        node: id,
        x,
        y,
        width: layout.size.width,
        height: layout.size.height,
    });
    for &child in tree.element(id).children() {
        collect_boxes(taffy, tree, child, handles, (x, y), boxes)?;
    }
    Ok(())
}

/// Elements are block boxes unless their declarations say otherwise.
/// Later declarations win.
fn style_from_declarations(declarations: &[Property]) -> Style {
    let mut style = Style {
        display: Display::Block,
        ..Default::default()
    };
    for declaration in declarations {
        apply_declaration(&mut style, &declaration.name, declaration.value.trim());
    }
    style
}

fn apply_declaration(style: &mut Style, name: &str, value: &str) {
    match name {
        "display" => {
            if let Some(display) = parse_display(value) {
                style.display = display;
            }
        }
        "flex-direction" => {
            if let Some(direction) = parse_flex_direction(value) {
                style.flex_direction = direction;
            }
        }
        "flex-wrap" => {
            if let Some(wrap) = parse_flex_wrap(value) {
                style.flex_wrap = wrap;
            }
        }
        "justify-content" => style.justify_content = parse_align_content(value),
        "align-content" => style.align_content = parse_align_content(value),
        "align-items" => style.align_items = parse_align_items(value),
        "align-self" => style.align_self = parse_align_items(value),
        "gap" => {
            if let Some(gap) = parse_length_percentage(value) {
                style.gap = Size {
                    width: gap,
                    height: gap,
                };
            }
        }
        "row-gap" => {
            if let Some(gap) = parse_length_percentage(value) {
                style.gap.height = gap;
            }
        }
        "column-gap" => {
            if let Some(gap) = parse_length_percentage(value) {
                style.gap.width = gap;
            }
        }
        "width" => {
            if let Some(width) = parse_dimension(value) {
                style.size.width = width;
            }
        }
        "height" => {
            if let Some(height) = parse_dimension(value) {
                style.size.height = height;
            }
        }
        "flex-grow" => {
            if let Ok(grow) = value.parse::<f32>() {
                style.flex_grow = grow;
            }
        }
        "flex-shrink" => {
            if let Ok(shrink) = value.parse::<f32>() {
                style.flex_shrink = shrink;
            }
        }
        "flex-basis" => {
            if let Some(basis) = parse_dimension(value) {
                style.flex_basis = basis;
            }
        }
        // Only the `flex: <number>` form.
        "flex" => {
            if let Ok(grow) = value.parse::<f32>() {
                style.flex_grow = grow;
                style.flex_shrink = 1.0;
                style.flex_basis = Dimension::Percent(0.0);
            }
        }
        _ => trace!("layout ignores `{}: {}`", name, value),
    }
}

fn parse_display(value: &str) -> Option<Display> {
    match value {
        "block" => Some(Display::Block),
        "flex" => Some(Display::Flex),
        "grid" => Some(Display::Grid),
        "none" => Some(Display::None),
        _ => None,
    }
}

fn parse_flex_direction(value: &str) -> Option<FlexDirection> {
    match value {
        "row" => Some(FlexDirection::Row),
        "row-reverse" => Some(FlexDirection::RowReverse),
        "column" => Some(FlexDirection::Column),
        "column-reverse" => Some(FlexDirection::ColumnReverse),
        _ => None,
    }
}

fn parse_flex_wrap(value: &str) -> Option<FlexWrap> {
    match value {
        "nowrap" => Some(FlexWrap::NoWrap),
        "wrap" => Some(FlexWrap::Wrap),
        "wrap-reverse" => Some(FlexWrap::WrapReverse),
        _ => None,
    }
}

/// `normal` and anything unrecognized leave the property unset.
fn parse_align_content(value: &str) -> Option<AlignContent> {
    match value {
        "center" => Some(AlignContent::Center),
        "flex-start" => Some(AlignContent::FlexStart),
        "flex-end" => Some(AlignContent::FlexEnd),
        "start" => Some(AlignContent::Start),
        "end" => Some(AlignContent::End),
        "stretch" => Some(AlignContent::Stretch),
        "space-between" => Some(AlignContent::SpaceBetween),
        "space-around" => Some(AlignContent::SpaceAround),
        "space-evenly" => Some(AlignContent::SpaceEvenly),
        _ => None,
    }
}

fn parse_align_items(value: &str) -> Option<AlignItems> {
    match value {
        "center" => Some(AlignItems::Center),
        "flex-start" => Some(AlignItems::FlexStart),
        "flex-end" => Some(AlignItems::FlexEnd),
        "start" => Some(AlignItems::Start),
        "end" => Some(AlignItems::End),
        "baseline" => Some(AlignItems::Baseline),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    }
}

fn parse_length_percentage(value: &str) -> Option<LengthPercentage> {
    if let Some(percent) = value.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f32>()
            .ok()
            .map(|p| LengthPercentage::Percent(p / 100.0));
    }
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().map(LengthPercentage::Length)
}

fn parse_dimension(value: &str) -> Option<Dimension> {
    if value == "auto" {
        return Some(Dimension::Auto);
    }
    parse_length_percentage(value).map(|length| match length {
        LengthPercentage::Length(px) => Dimension::Length(px),
        LengthPercentage::Percent(fraction) => Dimension::Percent(fraction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::structure::parse_structure;

    fn flex_row_tree() -> (PreviewTree, NodeId) {
        let mut tree = PreviewTree::new();
        let roots = parse_structure(&mut tree, "[3]").unwrap();
        let container = roots[0];
        tree.render(container);
        tree.append_element(Mount::Wrapper, container);
        tree.element_mut(container).style = vec![
            Property::new("display", "flex"),
            Property::new("gap", "10px"),
        ];
        (tree, container)
    }

    #[test]
    fn test_parse_lengths() {
        assert_eq!(parse_dimension("120px"), Some(Dimension::Length(120.0)));
        assert_eq!(parse_dimension("50%"), Some(Dimension::Percent(0.5)));
        assert_eq!(parse_dimension("auto"), Some(Dimension::Auto));
        assert_eq!(parse_dimension("wide"), None);
        assert_eq!(
            parse_length_percentage("0"),
            Some(LengthPercentage::Length(0.0))
        );
    }

    #[test]
    fn test_declarations_map_onto_style() {
        let style = style_from_declarations(&[
            Property::new("display", "flex"),
            Property::new("flex-direction", "column"),
            Property::new("justify-content", "space-between"),
            Property::new("align-items", "normal"),
            Property::new("unknown", "1"),
        ]);
        assert_eq!(style.display, Display::Flex);
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(style.justify_content, Some(AlignContent::SpaceBetween));
        assert_eq!(style.align_items, None);
    }

    #[test]
    fn test_flex_row_places_items_side_by_side() {
        let (tree, container) = flex_row_tree();
        let options = LayoutOptions::default();
        let boxes = compute_layout(&tree, &options).unwrap();

        assert_eq!(boxes.len(), 4);
        assert_eq!(boxes[0].node, container);
        assert_eq!(boxes[0].width, options.width);
        let xs: Vec<f32> = boxes[1..].iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert!(boxes[1..].iter().all(|b| b.width == options.item_size));
    }

    #[test]
    fn test_block_container_stacks_items() {
        let (mut tree, container) = flex_row_tree();
        tree.element_mut(container).style.clear();
        let boxes = compute_layout(&tree, &LayoutOptions::default()).unwrap();
        let ys: Vec<f32> = boxes[1..].iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![0.0, 40.0, 80.0]);
    }
}
