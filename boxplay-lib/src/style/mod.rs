pub mod matcher;
pub mod properties;
pub mod rules;
pub mod stylesheet;
