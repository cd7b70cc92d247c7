//! Grammar node kinds, field names and file names shared across modules.

/// `const` / `let` declaration statement.
pub const LEXICAL_DECLARATION: &str = "lexical_declaration";
/// `var` declaration statement.
pub const VARIABLE_DECLARATION: &str = "variable_declaration";
/// One `name = value` binding inside a declaration statement.
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
/// Arrow function expression.
pub const ARROW_FUNCTION: &str = "arrow_function";
/// Braced block body.
pub const STATEMENT_BLOCK: &str = "statement_block";
/// Plain identifier.
pub const IDENTIFIER: &str = "identifier";
/// Classic three-clause `for` loop.
pub const FOR_STATEMENT: &str = "for_statement";
/// `export <declaration>` statement.
pub const EXPORT_STATEMENT: &str = "export_statement";
/// `async` keyword token.
pub const ASYNC_KEYWORD: &str = "async";

/// Deepest syntax tree the parser snapshot and the detection walk accept.
pub const MAX_TREE_DEPTH: usize = 1000;

/// Grammar field names used by the rewrite engine.
pub mod fields {
    /// Binding name of a declarator.
    pub const NAME: &str = "name";
    /// Initializer of a declarator.
    pub const VALUE: &str = "value";
    /// Parenthesized parameter list of an arrow function.
    pub const PARAMETERS: &str = "parameters";
    /// Bare single parameter of an arrow function (`x => x`).
    pub const PARAMETER: &str = "parameter";
    /// Arrow function body.
    pub const BODY: &str = "body";
    /// Declaration keyword (`const` / `let`).
    pub const KIND: &str = "kind";
    /// Initializer clause of a `for` statement.
    pub const INITIALIZER: &str = "initializer";
}

/// Dedicated configuration file name.
pub const CONFIG_FILENAME: &str = ".arrow2fn.toml";
/// npm manifest, read for an `"arrow2fn"` key.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";
/// Key of the configuration section in both file formats.
pub const CONFIG_SECTION: &str = "arrow2fn";

/// Log filter environment variable, takes priority over `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "ARROW2FN_LOG";
