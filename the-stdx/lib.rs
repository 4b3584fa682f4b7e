//! Small, dependency-light helpers shared by the text engine crates.

pub mod buf;
pub mod env;
pub mod utf16;
pub mod utf8;
