//! Rewrite engine: arrow-function declarations to function declarations.
//!
//! `const f = (x) => x + 1;` becomes `function f(x) { return x + 1; }`.
//! All text outside the rewritten declaration statements is preserved byte for
//! byte.
//!
//! # Usage
//!
//! ```
//! let out = arrow2fn::transform("const f = (x) => x + 1;").expect("should transform");
//! assert_eq!(out, "function f(x) { return x + 1; }");
//! ```
//!
//! # Limitations
//!
//! Malformed input is parsed best-effort. Regions the parser could not make
//! sense of are left as they are; nothing reports them beyond a log warning.

mod detect;
mod synth;

pub use detect::{detect, Plan};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cst::{CstError, CstParser};
use crate::fix::{ByteRangeRewriter, Edit, RewriteError};

/// What happens to non-arrow bindings sharing a statement with an arrow
/// binding, e.g. `a = 1` in `const a = 1, f = () => 2;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingPolicy {
    /// Re-emit them as their own declaration, in source order
    #[default]
    Preserve,
    /// Discard them, keeping only the synthesized functions
    Drop,
}

/// Knobs for the rewrite engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Handling of non-arrow bindings in a rewritten statement
    pub siblings: SiblingPolicy,
    /// Also rewrite `var` declarations, not just `const`/`let`
    pub include_var: bool,
}

/// One rewritten declaration statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    /// Names of the function declarations produced
    pub functions: Vec<String>,
    /// 1-based line of the declaration in the original source
    pub line: usize,
    /// Start byte of the declaration in the original source
    pub start_byte: usize,
    /// End byte of the declaration in the original source
    pub end_byte: usize,
    /// Bindings removed under [`SiblingPolicy::Drop`]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped_bindings: Vec<String>,
}

/// Result of one transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The rewritten source
    pub text: String,
    /// Every rewritten declaration, outermost first
    pub rewrites: Vec<Rewrite>,
}

impl TransformOutput {
    /// Whether any declaration was rewritten
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// Errors from the rewrite engine.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The syntax tree provider failed.
    #[error(transparent)]
    Parse(#[from] CstError),
    /// The planned edits could not be applied.
    #[error("failed to apply rewrites: {0}")]
    Rewrite(#[from] RewriteError),
}

/// Parser plus options, reusable across many sources.
#[derive(Debug)]
pub struct Transformer {
    parser: CstParser,
    options: TransformOptions,
}

impl Transformer {
    /// Create a transformer with the JavaScript grammar loaded
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new(options: TransformOptions) -> Result<Self, TransformError> {
        Ok(Self {
            parser: CstParser::new()?,
            options,
        })
    }

    /// Options this transformer was built with
    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Rewrite every arrow-initialized declaration in `source`
    ///
    /// # Errors
    /// Returns error if parsing fails or the planned edits are inconsistent
    pub fn transform(&mut self, source: &str) -> Result<TransformOutput, TransformError> {
        let tree = self.parser.parse(source)?;
        if tree.has_errors {
            warn!("source contains syntax errors; unparseable regions are left unchanged");
        }

        let plan = detect(&tree, &self.options)?;
        debug!(
            edits = plan.edits.len(),
            rewrites = plan.rewrites.len(),
            "detection finished"
        );

        let text = apply_edits(source, plan.edits)?;
        Ok(TransformOutput {
            text,
            rewrites: plan.rewrites,
        })
    }
}

/// Splice `edits` into `source`.
///
/// # Errors
/// Returns error if any edit is out of bounds or two edits overlap
pub fn apply_edits(source: &str, edits: Vec<Edit>) -> Result<String, RewriteError> {
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(edits);
    rewriter.apply()
}

/// Rewrite `source` with default options.
///
/// # Errors
/// Returns error if parsing fails
pub fn transform(source: &str) -> Result<String, TransformError> {
    Ok(Transformer::new(TransformOptions::default())?
        .transform(source)?
        .text)
}
