/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` capability shared by every tree node and rendering helpers
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants and the `Program` root
pub mod ast;
pub mod expressions;
pub mod statements;
