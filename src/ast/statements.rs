use std::{
    fmt::{Display, Formatter, Result},
    slice::Iter,
};

use super::{
    ast::{write_statements, Node},
    expressions::{Expression, Identifier},
};

/// Statement
///
/// The closed set of statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Statement {
    fn token_literal(&self) -> String {
        match self {
            Statement::Let(_) => String::from("let"),
            Statement::Return(_) => String::from("return"),
            Statement::Expression(stmt) => stmt.expression.token_literal(),
            Statement::Block(block) => block.token_literal(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => write!(f, "return {};", value),
                None => write!(f, "return;"),
            },
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Identifier,
    pub value: Expression,
}

/// Return Statement
/// `value` is absent for a bare `return;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expression,
}

/// Block Statement
/// The `{ ... }` body of an `if` branch or a function literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Statement>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Node for BlockStmt {
    fn token_literal(&self) -> String {
        String::from("{")
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.body.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_statements(f, &self.body)?;
        write!(f, " }}")
    }
}

/// Program
/// The root of every parse; statements are in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(|statement| statement.token_literal())
            .unwrap_or_default()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_statements(f, &self.statements)
    }
}
