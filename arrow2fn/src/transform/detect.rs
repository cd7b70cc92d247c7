//! Detection pass: find arrow-initialized declarations and plan their edits.
//!
//! The walk is pre-order over named children. A declaration statement that
//! contains at least one arrow-initialized binding becomes exactly one edit
//! spanning the whole statement. Targets nested inside that statement (for
//! instance in the arrow's own body) are rewritten into the replacement text
//! rather than emitted separately, which keeps the edit set non-overlapping.

use tracing::{debug, warn};

use super::synth::{self, Body, FunctionParts};
use super::{Rewrite, SiblingPolicy, TransformError, TransformOptions};
use crate::constants::{
    fields, ARROW_FUNCTION, ASYNC_KEYWORD, EXPORT_STATEMENT, FOR_STATEMENT, IDENTIFIER,
    LEXICAL_DECLARATION, STATEMENT_BLOCK, VARIABLE_DECLARATION, VARIABLE_DECLARATOR,
};
use crate::cst::{CstNode, CstTree};
use crate::fix::{ByteRangeRewriter, Edit};

/// Edits for one source text plus a record of every rewritten declaration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Non-overlapping edits against the original source
    pub edits: Vec<Edit>,
    /// Rewritten declarations in pre-order, nested ones included
    pub rewrites: Vec<Rewrite>,
}

/// Compute the edits that turn every arrow-initialized declaration in `tree`
/// into a function declaration.
///
/// # Errors
/// Returns an error if rewriting a nested fragment produces invalid edits.
pub fn detect(tree: &CstTree, options: &TransformOptions) -> Result<Plan, TransformError> {
    Planner {
        source: &tree.source,
        options,
    }
    .plan(&tree.root)
}

/// Parameter list of an arrow function.
#[derive(Clone, Copy)]
enum Params<'n> {
    /// `(a, b)`
    List(&'n CstNode),
    /// `a` in `a => ...`
    Bare(&'n CstNode),
}

/// Pieces of a declarator whose initializer is an arrow function.
struct ArrowBinding<'n> {
    name: &'n CstNode,
    params: Params<'n>,
    body: &'n CstNode,
    is_async: bool,
}

impl<'n> ArrowBinding<'n> {
    fn from_declarator(declarator: &'n CstNode) -> Option<Self> {
        let name = declarator.child_by_field(fields::NAME)?;
        let value = declarator.child_by_field(fields::VALUE)?;
        if !value.is_kind(ARROW_FUNCTION) || !name.is_kind(IDENTIFIER) || name.is_missing {
            return None;
        }

        let params = value
            .child_by_field(fields::PARAMETERS)
            .map(Params::List)
            .or_else(|| value.child_by_field(fields::PARAMETER).map(Params::Bare))?;
        let body = value
            .child_by_field(fields::BODY)
            .filter(|body| !body.is_missing)?;
        let is_async = value
            .children
            .first()
            .is_some_and(|first| !first.is_named && first.is_kind(ASYNC_KEYWORD));

        Some(Self {
            name,
            params,
            body,
            is_async,
        })
    }
}

struct Planner<'a> {
    source: &'a str,
    options: &'a TransformOptions,
}

impl Planner<'_> {
    fn plan(&self, node: &CstNode) -> Result<Plan, TransformError> {
        let mut plan = Plan::default();
        self.visit(node, None, &mut plan)?;
        Ok(plan)
    }

    fn visit(
        &self,
        node: &CstNode,
        parent: Option<&CstNode>,
        plan: &mut Plan,
    ) -> Result<(), TransformError> {
        if self.is_candidate(node, parent) {
            let exported = parent.is_some_and(|p| p.is_kind(EXPORT_STATEMENT));
            if let Some((edit, rewrites)) = self.rewrite_declaration(node, exported)? {
                plan.edits.push(edit);
                plan.rewrites.extend(rewrites);
                return Ok(());
            }
        }

        for child in node.named_children() {
            self.visit(child, Some(node), plan)?;
        }
        Ok(())
    }

    fn is_candidate(&self, node: &CstNode, parent: Option<&CstNode>) -> bool {
        let is_declaration = match node.kind.as_str() {
            LEXICAL_DECLARATION => true,
            VARIABLE_DECLARATION => self.options.include_var,
            _ => false,
        };
        // A function declaration is not a valid `for (init; ...)` clause
        let in_for_header = node.field_name == Some(fields::INITIALIZER)
            && parent.is_some_and(|p| p.is_kind(FOR_STATEMENT));
        is_declaration && !in_for_header
    }

    /// Plan the single edit replacing `declaration`, or `None` if none of its
    /// bindings is arrow-initialized.
    fn rewrite_declaration(
        &self,
        declaration: &CstNode,
        exported: bool,
    ) -> Result<Option<(Edit, Vec<Rewrite>)>, TransformError> {
        let declarators: Vec<(&CstNode, Option<ArrowBinding<'_>>)> = declaration
            .named_children()
            .filter(|child| child.is_kind(VARIABLE_DECLARATOR))
            .map(|declarator| (declarator, ArrowBinding::from_declarator(declarator)))
            .collect();
        if declarators.iter().all(|(_, binding)| binding.is_none()) {
            return Ok(None);
        }

        let keyword = declaration
            .child_by_field(fields::KIND)
            .or_else(|| declaration.children.first())
            .map_or("const", |token| token.text(self.source));

        let mut record = Rewrite {
            functions: Vec::new(),
            line: declaration.start_point.row + 1,
            start_byte: declaration.start_byte,
            end_byte: declaration.end_byte,
            dropped_bindings: Vec::new(),
        };
        let mut nested = Vec::new();
        let mut statements = Vec::new();
        let mut pending = Vec::new();

        for (declarator, binding) in declarators {
            match binding {
                Some(binding) => {
                    if !pending.is_empty() {
                        statements.push(synth::declaration_group(keyword, &pending));
                        pending.clear();
                    }
                    record.functions.push(binding.name.text(self.source).to_owned());
                    statements.push(self.function_for(&binding, &mut nested)?);
                }
                None => match self.options.siblings {
                    SiblingPolicy::Preserve => {
                        let (text, inner) = self.render(declarator)?;
                        pending.push(text);
                        nested.extend(inner);
                    }
                    SiblingPolicy::Drop => {
                        let name = declarator
                            .child_by_field(fields::NAME)
                            .unwrap_or(declarator);
                        record.dropped_bindings.push(name.text(self.source).to_owned());
                    }
                },
            }
        }
        if !pending.is_empty() {
            statements.push(synth::declaration_group(keyword, &pending));
        }

        debug!(
            functions = ?record.functions,
            line = record.line,
            "rewriting arrow declaration"
        );
        if !record.dropped_bindings.is_empty() {
            warn!(
                dropped = ?record.dropped_bindings,
                line = record.line,
                "dropping non-arrow bindings that share a declaration with an arrow function"
            );
        }

        let replacement = synth::join_statements(&statements, exported);
        let edit = Edit::with_description(
            declaration.start_byte,
            declaration.end_byte,
            replacement,
            record.functions.join(", "),
        );

        let mut rewrites = Vec::with_capacity(nested.len() + 1);
        rewrites.push(record);
        rewrites.extend(nested);
        Ok(Some((edit, rewrites)))
    }

    fn function_for(
        &self,
        binding: &ArrowBinding<'_>,
        nested: &mut Vec<Rewrite>,
    ) -> Result<String, TransformError> {
        let params = match binding.params {
            Params::List(list) => {
                let (text, inner) = self.render(list)?;
                nested.extend(inner);
                text
            }
            Params::Bare(param) => synth::parenthesize(param.text(self.source)),
        };

        let (body_text, inner) = self.render(binding.body)?;
        nested.extend(inner);
        let body = if binding.body.is_kind(STATEMENT_BLOCK) {
            Body::Block(body_text)
        } else {
            Body::Expression(body_text)
        };

        Ok(synth::function_declaration(FunctionParts {
            is_async: binding.is_async,
            name: binding.name.text(self.source),
            params,
            body,
        }))
    }

    /// Source text of `node` with every target inside it already rewritten.
    fn render(&self, node: &CstNode) -> Result<(String, Vec<Rewrite>), TransformError> {
        let plan = self.plan(node)?;
        let mut rewriter = ByteRangeRewriter::new(node.text(self.source));
        rewriter.add_edits(
            plan.edits
                .into_iter()
                .map(|edit| edit.relative_to(node.start_byte)),
        );
        Ok((rewriter.apply()?, plan.rewrites))
    }
}
