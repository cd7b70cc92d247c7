//! Tree-sitter based CST parser for JavaScript source code.
//!
//! Provides precise byte-range information for safe code rewriting.

use tree_sitter::{Parser, TreeCursor};

use crate::constants::MAX_TREE_DEPTH;

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "lexical_declaration", "arrow_function")
    pub kind: String,
    /// Grammar field binding this node in its parent (e.g., "name", "body")
    pub field_name: Option<&'static str>,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point (row, column)
    pub start_point: Point,
    /// Whether this is a named node (vs anonymous like punctuation)
    pub is_named: bool,
    /// Whether the parser inserted this node to recover from an error
    pub is_missing: bool,
    /// Child nodes, named and anonymous, in source order
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// Create a `CstNode` from the node under a tree-sitter cursor.
    ///
    /// `depth` is the cursor's distance from the root. Trees nested deeper
    /// than [`MAX_TREE_DEPTH`] are rejected so recursion stays bounded.
    fn from_cursor(cursor: &mut TreeCursor<'_>, depth: usize) -> Result<Self, CstError> {
        if depth > MAX_TREE_DEPTH {
            return Err(CstError::TooDeep {
                limit: MAX_TREE_DEPTH,
            });
        }
        let node = cursor.node();
        let field_name = cursor.field_name();

        let mut children = Vec::with_capacity(node.child_count());
        if cursor.goto_first_child() {
            loop {
                children.push(Self::from_cursor(cursor, depth + 1)?);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }

        Ok(Self {
            kind: node.kind().to_owned(),
            field_name,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            is_named: node.is_named(),
            is_missing: node.is_missing(),
            children,
        })
    }

    /// Check if this node is of the given kind
    #[must_use]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Child bound to the given grammar field, if any
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<&CstNode> {
        self.children
            .iter()
            .find(|child| child.field_name == Some(field))
    }

    /// Semantically meaningful children, skipping punctuation and keywords
    pub fn named_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children.iter().filter(|child| child.is_named)
    }

    /// Exact source text spanned by this node
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start_byte..self.end_byte]
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST
    pub root: CstNode,
    /// Original source code
    pub source: String,
    /// Whether the parser had to recover from syntax errors
    pub has_errors: bool,
}

/// Error during CST parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstError {
    /// Failed to create parser
    ParserCreation(String),
    /// Failed to parse source
    ParseFailed,
    /// Source nests deeper than the tree walk supports
    TooDeep {
        /// Maximum supported depth
        limit: usize,
    },
}

impl std::fmt::Display for CstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParserCreation(msg) => write!(f, "Failed to create CST parser: {msg}"),
            Self::ParseFailed => write!(f, "Failed to parse source as JavaScript"),
            Self::TooDeep { limit } => {
                write!(f, "Source nests deeper than {limit} syntax tree levels")
            }
        }
    }
}

impl std::error::Error for CstError {}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl std::fmt::Debug for CstParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CstParser")
            .field("language", &"javascript")
            .finish()
    }
}

impl CstParser {
    /// Create a new CST parser for JavaScript
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by tree-sitter-javascript crate
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if parsing fails or the tree is nested too deeply
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        let root_node = tree.root_node();
        let has_errors = root_node.has_error();
        let root = CstNode::from_cursor(&mut tree.walk(), 0)?;

        Ok(CstTree {
            root,
            source: source.to_owned(),
            has_errors,
        })
    }
}
