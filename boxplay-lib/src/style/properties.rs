//! Known layout properties and the values offered for each of them.

use crate::error::{EditorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValues {
    /// Any text; edited through a free input.
    FreeText,
    /// One of a fixed set of keywords.
    Options(&'static [&'static str]),
}

const ALIGNMENTS: &[&str] = &[
    "center",
    "flex-end",
    "flex-start",
    "normal",
    "space-around",
    "space-between",
    "space-evenly",
];

/// Table order is the order property choices are offered in.
pub const KNOWN_PROPERTIES: &[(&str, PropertyValues)] = &[
    ("align-content", PropertyValues::Options(ALIGNMENTS)),
    (
        "align-items",
        PropertyValues::Options(&["center", "flex-end", "flex-start", "normal"]),
    ),
    ("align-self", PropertyValues::Options(ALIGNMENTS)),
    ("column-gap", PropertyValues::FreeText),
    ("display", PropertyValues::Options(&["block", "flex"])),
    ("flex", PropertyValues::FreeText),
    ("flex-basis", PropertyValues::FreeText),
    (
        "flex-direction",
        PropertyValues::Options(&["column", "column-reverse", "row", "row-reverse"]),
    ),
    ("flex-grow", PropertyValues::FreeText),
    ("flex-shrink", PropertyValues::FreeText),
    (
        "flex-wrap",
        PropertyValues::Options(&["nowrap", "wrap", "wrap-reverse"]),
    ),
    ("gap", PropertyValues::FreeText),
    ("grid", PropertyValues::FreeText),
    ("grid-area", PropertyValues::Options(&[])),
    ("grid-auto-columns", PropertyValues::Options(&[])),
    ("grid-auto-rows", PropertyValues::Options(&[])),
    ("grid-column", PropertyValues::Options(&[])),
    ("grid-column-end", PropertyValues::Options(&[])),
    ("grid-column-start", PropertyValues::Options(&[])),
    ("grid-template-areas", PropertyValues::Options(&[])),
    ("grid-template-columns", PropertyValues::Options(&[])),
    ("grid-template-rows", PropertyValues::Options(&[])),
    ("grid-row", PropertyValues::Options(&[])),
    ("grid-row-end", PropertyValues::Options(&[])),
    ("grid-row-start", PropertyValues::Options(&[])),
    ("height", PropertyValues::FreeText),
    ("justify-content", PropertyValues::Options(ALIGNMENTS)),
    ("order", PropertyValues::FreeText),
    ("row-gap", PropertyValues::FreeText),
    ("width", PropertyValues::FreeText),
];

pub fn property_names() -> impl Iterator<Item = &'static str> {
    KNOWN_PROPERTIES.iter().map(|(name, _)| *name)
}

pub fn lookup(name: &str) -> Option<PropertyValues> {
    KNOWN_PROPERTIES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, values)| *values)
}

/// Values to offer for `name`. Asking for a property outside the table is a
/// caller error.
pub fn value_choices(name: &str) -> Result<PropertyValues> {
    lookup(name).ok_or_else(|| EditorError::unknown_property(name))
}
