//! Replacement text synthesis.
//!
//! Everything here works on already-extracted (and already-rewritten) source
//! fragments; no tree access happens in this module.

/// Source fragments of one arrow-initialized binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionParts<'a> {
    /// Arrow was declared `async`
    pub is_async: bool,
    /// Binding name
    pub name: &'a str,
    /// Parameter list including its parentheses
    pub params: String,
    /// Body text, braced or bare expression
    pub body: Body,
}

/// Arrow function body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Body {
    /// `{ ... }` block, copied as is
    Block(String),
    /// Expression with implicit return
    Expression(String),
}

impl Body {
    fn into_block(self) -> String {
        match self {
            Self::Block(block) => block,
            Self::Expression(expr) => format!("{{ return {expr}; }}"),
        }
    }
}

/// `function <name><params> <body>`, with `async` carried over.
pub(crate) fn function_declaration(parts: FunctionParts<'_>) -> String {
    let prefix = if parts.is_async { "async " } else { "" };
    format!(
        "{prefix}function {}{} {}",
        parts.name,
        parts.params,
        parts.body.into_block()
    )
}

/// Bare `x` parameter as a parenthesized list.
pub(crate) fn parenthesize(param: &str) -> String {
    format!("({param})")
}

/// `<keyword> a = 1, b = 2;`
pub(crate) fn declaration_group(keyword: &str, declarators: &[String]) -> String {
    format!("{keyword} {};", declarators.join(", "))
}

/// Joins the statements that replace a single declaration.
///
/// Every statement after the first gets `export ` when the declaration was
/// exported, since only the first one sits behind the original keyword.
pub(crate) fn join_statements(statements: &[String], exported: bool) -> String {
    let mut joined = String::new();
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
            if exported {
                joined.push_str("export ");
            }
        }
        joined.push_str(statement);
    }
    joined
}
