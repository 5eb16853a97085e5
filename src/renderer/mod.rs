//! Line renderer for the token stream
//!
//! This module takes the tokenizer's output and produces indented output
//! lines according to the formatting options.

pub mod config;
pub mod lines;

pub use config::{FormatOptions, IndentSpec};
pub use lines::render;
