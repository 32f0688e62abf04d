/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - node: The node sum type, typed handle views and builder mutators
/// - expressions: Definitions for the expression nodes
/// - declarations: Variable, function and class declarations
/// - statements: Definitions for the statement nodes
/// - types: Type syntax as written in the source
/// - builder: Prefix/postfix chain assembly
/// - eval: Constant folding for array sizes
/// - display: S-expression rendering
pub mod builder;
pub mod declarations;
pub mod display;
pub mod eval;
pub mod expressions;
pub mod node;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
