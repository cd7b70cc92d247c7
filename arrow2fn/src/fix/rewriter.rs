//! Byte-range safe code rewriter.
//!
//! This module provides a reusable rewriter that applies code edits
//! using byte ranges, preserving formatting and rejecting overlaps.
//!
//! # Usage
//!
//! ```
//! use arrow2fn::fix::{ByteRangeRewriter, Edit};
//!
//! let source = "const f = () => 1;";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::new(0, source.len(), "function f() { return 1; }"));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "function f() { return 1; }");
//! ```

use std::fmt;

/// A single edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional description for logging
    pub description: Option<String>,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: None,
        }
    }

    /// Create an edit with description
    #[must_use]
    pub fn with_description(
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: Some(description.into()),
        }
    }

    /// Length of the range being replaced
    #[must_use]
    pub const fn range_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    /// Re-anchor this edit to a slice of the source starting at `base`.
    ///
    /// `base` must not be greater than `start_byte`.
    #[must_use]
    pub fn relative_to(mut self, base: usize) -> Self {
        self.start_byte -= base;
        self.end_byte -= base;
        self
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit range ends before it starts
    InvertedRange {
        /// Index of the bad edit
        edit_index: usize,
    },
    /// Edit boundary falls inside a multi-byte character
    NotCharBoundary {
        /// Index of the bad edit
        edit_index: usize,
        /// Offending byte offset
        byte: usize,
    },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingEdits { edit_a, edit_b } => {
                write!(f, "Overlapping edits at indices {edit_a} and {edit_b}")
            }
            Self::OutOfBounds {
                edit_index,
                end_byte,
                source_len,
            } => {
                write!(
                    f,
                    "Edit {edit_index} out of bounds: end_byte {end_byte} > source length {source_len}"
                )
            }
            Self::InvertedRange { edit_index } => {
                write!(f, "Edit {edit_index} ends before it starts")
            }
            Self::NotCharBoundary { edit_index, byte } => {
                write!(
                    f,
                    "Edit {edit_index} splits a UTF-8 character at byte {byte}"
                )
            }
        }
    }
}

impl std::error::Error for RewriteError {}

/// Safe code rewriter using byte ranges
///
/// All edits are anchored to the original source. They are validated as a
/// set and then spliced in a single left-to-right pass.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    /// Original source code
    source: String,
    /// Pending edits
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        let source_len = self.source.len();

        for (i, edit) in self.edits.iter().enumerate() {
            if edit.end_byte > source_len {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end_byte: edit.end_byte,
                    source_len,
                });
            }
            if edit.start_byte > edit.end_byte {
                return Err(RewriteError::InvertedRange { edit_index: i });
            }
            for byte in [edit.start_byte, edit.end_byte] {
                if !self.source.is_char_boundary(byte) {
                    return Err(RewriteError::NotCharBoundary {
                        edit_index: i,
                        byte,
                    });
                }
            }
        }

        // Neighbours in start order are the only candidates for overlap
        let order = self.sorted_indices();
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if self.edits[a].overlaps(&self.edits[b]) {
                return Err(RewriteError::OverlappingEdits {
                    edit_a: a.min(b),
                    edit_b: a.max(b),
                });
            }
        }

        Ok(())
    }

    /// Edit indices ordered by start position, ties broken by insertion order
    fn sorted_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by_key(|&i| (self.edits[i].start_byte, self.edits[i].end_byte));
        order
    }

    /// Apply all edits and return the modified source
    ///
    /// Untouched spans and replacements are copied into one output buffer
    /// in ascending offset order, so no offset is ever read from a partially
    /// rewritten string.
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        if self.edits.is_empty() {
            return Ok(self.source);
        }

        let removed: usize = self.edits.iter().map(Edit::range_len).sum();
        let inserted: usize = self.edits.iter().map(|e| e.replacement.len()).sum();
        let mut result = String::with_capacity(self.source.len() - removed + inserted);

        let mut cursor = 0;
        for i in self.sorted_indices() {
            let edit = &self.edits[i];
            result.push_str(&self.source[cursor..edit.start_byte]);
            result.push_str(&edit.replacement);
            cursor = edit.end_byte;
        }
        result.push_str(&self.source[cursor..]);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replacement() {
        let source = "hello world";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(0, 5, "hi"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "hi world");
    }

    #[test]
    fn test_multiple_non_overlapping_edits() {
        let source = "aaa bbb ccc";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(8, 11, "CCC"));
        rewriter.add_edit(Edit::new(0, 3, "AAA"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "AAA bbb CCC");
    }

    #[test]
    fn test_overlapping_edits_error() {
        let source = "hello world";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(5, 10, "there"));
        rewriter.add_edit(Edit::new(0, 8, "hi"));

        let result = rewriter.apply();
        assert_eq!(
            result,
            Err(RewriteError::OverlappingEdits {
                edit_a: 0,
                edit_b: 1
            })
        );
    }

    #[test]
    fn test_identical_ranges_overlap() {
        let source = "const a = () => 1, b = () => 2;";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(0, source.len(), "function a() { return 1; }"));
        rewriter.add_edit(Edit::new(0, source.len(), "function b() { return 2; }"));

        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let source = "short";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(0, 100, "long"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_inverted_range_error() {
        let mut rewriter = ByteRangeRewriter::new("abcdef");
        rewriter.add_edit(Edit::new(4, 2, "x"));

        assert_eq!(
            rewriter.validate(),
            Err(RewriteError::InvertedRange { edit_index: 0 })
        );
    }

    #[test]
    fn test_char_boundary_error() {
        let source = "const s = \"héllo\";";
        let inside = source.find('é').unwrap() + 1;
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(0, inside, "x"));

        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::NotCharBoundary { byte, .. }) if byte == inside
        ));
    }

    #[test]
    fn test_multibyte_text_around_edits() {
        let source = "// ünïcödé\nconst f = () => 1;\n// ✓\n";
        let start = source.find("const").unwrap();
        let end = source.find(";\n// ✓").unwrap() + 1;
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(start, end, "function f() { return 1; }"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "// ünïcödé\nfunction f() { return 1; }\n// ✓\n");
    }

    #[test]
    fn test_statement_replacement_keeps_neighbours() {
        let source = "import x from 'x';\n\nconst f = (a) => a;\n\nexport default f;\n";
        let start = source.find("const").unwrap();
        let end = source.find("\n\nexport").unwrap();
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::with_description(
            start,
            end,
            "function f(a) { return a; }",
            "f",
        ));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(
            result,
            "import x from 'x';\n\nfunction f(a) { return a; }\n\nexport default f;\n"
        );
    }

    #[test]
    fn test_relative_to() {
        let edit = Edit::new(10, 15, "x").relative_to(4);
        assert_eq!((edit.start_byte, edit.end_byte), (6, 11));
        assert_eq!(edit.range_len(), 5);
    }

    #[test]
    fn test_empty_edits() {
        let source = "hello world";
        let rewriter = ByteRangeRewriter::new(source);
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, source);
    }

    #[test]
    fn test_adjacent_non_overlapping_edits() {
        let source = "abcdef";
        let mut rewriter = ByteRangeRewriter::new(source);
        // Replace "abc" and "def" adjacently
        rewriter.add_edits([Edit::new(3, 6, "YYY"), Edit::new(0, 3, "XXX")]);

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "XXXYYY");
    }
}
