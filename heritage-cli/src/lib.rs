//! Heritage CLI - browse the heritage directory and 3D model catalog.
//!
//! The binary in `main.rs` parses [`Cli`], builds a [`commands::Context`]
//! and hands the subcommand to [`commands::run`].

pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Commands};
pub use commands::{Context, EXIT_FAILURE, EXIT_NOT_FOUND, EXIT_SUCCESS};
