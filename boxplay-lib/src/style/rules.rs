// src/style/rules.rs: the owned rule model shared by the parser, the code view and the matcher.
use std::fmt;

/// Blank run used for freshly inserted selectors and properties so the host
/// has something visible to click on.
const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// e.g. ".container", ".item2:hover", ".container .item"
    pub selector: String,
    /// Ordered; duplicates allowed, later entries win when applied.
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, properties: Vec<Property>) -> Self {
        StyleRule {
            selector: selector.into(),
            properties,
        }
    }

    /// A rule with a blank selector and one blank property.
    pub fn placeholder() -> Self {
        let mut selector = String::from(".");
        selector.extend(std::iter::repeat(NBSP).take(8));
        StyleRule::new(selector, vec![Property::placeholder()])
    }

    /// Selector text without its leading dot, as offered in selector choices.
    pub fn class_name(&self) -> &str {
        self.selector.strip_prefix('.').unwrap_or(&self.selector)
    }
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn placeholder() -> Self {
        let blank: String = std::iter::repeat(NBSP).take(4).collect();
        Property::new(blank.clone(), blank)
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for property in &self.properties {
            writeln!(f, "  {}: {};", property.name, property.value)?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholders_are_blank() {
        let rule = StyleRule::placeholder();
        assert!(rule.selector.starts_with('.'));
        assert!(rule.class_name().trim().is_empty());
        assert_eq!(rule.properties.len(), 1);
        assert!(rule.properties[0].name.trim().is_empty());
        assert!(rule.properties[0].value.trim().is_empty());
    }

    #[test]
    fn test_display_forms() {
        let rule = StyleRule::new(
            ".container",
            vec![
                Property::new("display", "flex"),
                Property::new("gap", "8px"),
            ],
        );
        assert_eq!(
            rule.to_string(),
            ".container {\n  display: flex;\n  gap: 8px;\n}\n"
        );
        assert_eq!(rule.properties[0].to_string(), "display:flex");
        assert_eq!(rule.class_name(), "container");
    }
}
