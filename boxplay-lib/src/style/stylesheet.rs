//! The restricted stylesheet language.
//!
//! Only rules whose selectors are built from `.container`, `.container<N>`,
//! `.item` and `.item<N>` class tokens (optionally followed by one
//! pseudo-class and one pseudo-element) are recognized. Anything else is
//! dropped, so parsing never fails: the editor has to cope with text that is
//! half-typed.

use crate::config::Mode;
use crate::style::rules::{Property, StyleRule};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// One rule block: class-token selectors, then `{ ... }` without nested braces.
static RULE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"((\.((container[0-9]*)|(item[0-9]*)))+(:[0-9A-Za-z_\-]*)?(::[0-9A-Za-z_\-]*)?\s*)+\{[^{}]*\}",
    )
    .expect("rule block pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Blank lines kept after the last rule in snippet mode.
pub const EXTRA_CODE_LINES: usize = 3;

/// One line of the CSS code view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLine {
    Selector {
        rule: usize,
        selector: String,
    },
    Property {
        rule: usize,
        property: usize,
        name: String,
        value: String,
    },
    Closing {
        rule: usize,
    },
    /// `insert_at` is the rule index a new rule typed here would take.
    Blank {
        insert_at: usize,
    },
}

impl fmt::Display for CodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeLine::Selector { selector, .. } => write!(f, "{} {{", selector),
            CodeLine::Property { name, value, .. } => write!(f, "  {}: {};", name, value),
            CodeLine::Closing { .. } => write!(f, "}}"),
            CodeLine::Blank { .. } => Ok(()),
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Parse stylesheet text into its ordered rule list.
pub fn parse(css_text: &str) -> Vec<StyleRule> {
    let normalized = normalize_whitespace(css_text);
    let rules: Vec<StyleRule> = RULE_BLOCK
        .find_iter(&normalized)
        .filter_map(|block| parse_rule_block(block.as_str()))
        .collect();
    debug!("parsed {} style rule(s)", rules.len());
    rules
}

fn parse_rule_block(block: &str) -> Option<StyleRule> {
    let (selector, body) = block.split_once('{')?;
    let body = body.strip_suffix('}').unwrap_or(body);
    let properties = body
        .trim()
        .split(';')
        .filter_map(|segment| {
            let (name, value) = segment.split_once(':')?;
            Some(Property::new(name.trim(), value.trim()))
        })
        .collect();
    Some(StyleRule::new(selector.trim(), properties))
}

/// Lay the rules out as code view lines.
///
/// Every rule contributes its selector line, one line per property, a closing
/// line and a blank separator. Snippet mode then appends [`EXTRA_CODE_LINES`]
/// blanks; free mode only emits a single blank when there is nothing else.
pub fn serialize(rules: &[StyleRule], mode: Mode) -> Vec<CodeLine> {
    let mut lines = Vec::new();
    for (rule_index, rule) in rules.iter().enumerate() {
        lines.push(CodeLine::Selector {
            rule: rule_index,
            selector: rule.selector.clone(),
        });
        for (property_index, property) in rule.properties.iter().enumerate() {
            lines.push(CodeLine::Property {
                rule: rule_index,
                property: property_index,
                name: property.name.clone(),
                value: property.value.clone(),
            });
        }
        lines.push(CodeLine::Closing { rule: rule_index });
        lines.push(CodeLine::Blank {
            insert_at: rule_index + 1,
        });
    }
    match mode {
        Mode::Snippet => {
            for _ in 0..EXTRA_CODE_LINES {
                lines.push(CodeLine::Blank {
                    insert_at: rules.len(),
                });
            }
        }
        Mode::Free => {
            if lines.is_empty() {
                lines.push(CodeLine::Blank { insert_at: 0 });
            }
        }
    }
    lines
}

/// Render code lines as editable text, one line per entry.
pub fn to_text(lines: &[CodeLine]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every recognized rule with `scope` so the stylesheet only reaches
/// one editor mount, then pretty-print it.
///
/// Unrecognized text is passed through untouched. If the result cannot be
/// normalized the raw scoped text is returned.
pub fn scoped_stylesheet(css_text: &str, scope: &str) -> String {
    let normalized = normalize_whitespace(css_text);
    let scoped = RULE_BLOCK
        .replace_all(&normalized, |caps: &Captures<'_>| format!("{} {}", scope, &caps[0]))
        .into_owned();
    match print_normalized(&scoped) {
        Some(printed) => printed,
        None => scoped,
    }
}

fn print_normalized(css_text: &str) -> Option<String> {
    let sheet = match StyleSheet::parse(css_text, ParserOptions::default()) {
        Ok(sheet) => sheet,
        Err(err) => {
            warn!("scoped stylesheet left unnormalized: {}", err);
            return None;
        }
    };
    match sheet.to_css(PrinterOptions::default()) {
        Ok(result) => Some(result.code),
        Err(err) => {
            warn!("scoped stylesheet could not be printed: {}", err);
            None
        }
    }
}
