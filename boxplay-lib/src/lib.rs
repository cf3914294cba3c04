pub mod config;
pub mod error;
pub mod layout;
pub mod parser;
pub mod playground;
pub mod preview;
pub mod session;
pub mod style;
pub mod sync;

pub use error::{EditorError, Result};
