//! Byte-range rewriting infrastructure.
//!
//! The rewrite engine computes every edit against offsets into the original
//! source. `ByteRangeRewriter` validates such a set (bounds, character
//! boundaries, no overlaps) and splices it into a new string.

mod rewriter;

pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
