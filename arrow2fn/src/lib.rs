//! Core library for the arrow2fn source rewriter.
//!
//! This library turns arrow-function variable declarations in JavaScript
//! into named function declarations, leaving every other byte of the source
//! untouched. The entry point for library users is [`transform`] or, for
//! configured and repeated use, [`Transformer`].

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the Tree-sitter based concrete syntax tree.
/// This is the syntax tree provider the rewrite engine reads.
pub mod cst;

/// Module containing the byte-range rewriter that applies edits.
pub mod fix;

/// Module containing the rewrite engine (detection and edit application).
pub mod transform;

/// Module containing shared grammar constants and file names.
pub mod constants;

/// Module for loading configuration.
pub mod config;

/// Module for setting up `tracing` output.
pub mod logging;

/// Module for rich CLI output formatting with colored text.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling the file-level command and its execution logic.
pub mod commands;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

pub use transform::{
    transform, Rewrite, SiblingPolicy, TransformError, TransformOptions, TransformOutput,
    Transformer,
};
