use crate::style::rules::{Property, StyleRule};

/// True when `selector` is exactly one dot-class token naming one of `classes`.
///
/// Compound and descendant selectors, and anything carrying a pseudo suffix,
/// never match here: they are kept in the rule list for display only.
pub fn matches_selector(classes: &[String], selector: &str) -> bool {
    match selector.strip_prefix('.') {
        Some(class_name) => classes.iter().any(|class| class == class_name),
        None => false,
    }
}

/// Declarations of every matching rule, in rule order.
pub fn compute_inline_style(classes: &[String], rules: &[StyleRule]) -> Vec<Property> {
    let mut declarations = Vec::new();
    for rule in rules {
        if matches_selector(classes, &rule.selector) {
            declarations.extend(rule.properties.iter().cloned());
        }
    }
    declarations
}

/// `name:value;` pairs as they would sit in a `style` attribute.
pub fn style_text(declarations: &[Property]) -> String {
    declarations
        .iter()
        .map(|declaration| format!("{};", declaration))
        .collect()
}
