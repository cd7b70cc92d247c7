//! CST (Concrete Syntax Tree) module for precise source mapping.
//!
//! This module provides Tree-sitter based CST parsing for JavaScript:
//! - Precise byte-range extraction for every node
//! - Field-name lookup (`name`, `value`, `parameters`, `body`, ...)
//! - Ordered named children, skipping punctuation tokens
//!
//! # Design Principles
//!
//! - **Owned snapshot**: the tree-sitter tree is copied into plain `CstNode`s
//!   so the rewrite engine never touches parser lifetimes
//! - **Byte-range anchored**: every node carries its half-open byte range into
//!   the original source
//! - **Best effort**: malformed input still produces a tree; error regions are
//!   flagged, not rejected

mod parser;

pub use parser::{CstError, CstNode, CstParser, CstTree, Point};
