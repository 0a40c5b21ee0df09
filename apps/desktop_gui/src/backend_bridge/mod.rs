//! Worker thread that owns the async runtime and answers UI commands.

pub mod commands;
pub mod runtime;
