//! CLI library components for tabstream.

pub mod commands;
pub mod logging;
pub mod output;
