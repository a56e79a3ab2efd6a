//! Library side of the `empirica` command.

pub mod config;
pub mod logging;
pub mod pipeline;
