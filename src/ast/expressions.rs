use std::fmt::{Display, Formatter, Result};

use super::{
    ast::{write_list, Node},
    statements::BlockStmt,
};

/// Expression
///
/// The closed set of expression forms. Every child is owned, so a parsed tree
/// has a single owner and no sharing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
    Array(ArrayLiteral),
    Index(IndexExpr),
    Hash(HashLiteral),
}

impl Node for Expression {
    fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(identifier) => identifier.value.clone(),
            Expression::Integer(integer) => integer.value.to_string(),
            Expression::String(string) => string.value.clone(),
            Expression::Boolean(boolean) => boolean.value.to_string(),
            Expression::Prefix(prefix) => prefix.operator.clone(),
            Expression::Infix(infix) => infix.operator.clone(),
            Expression::If(_) => String::from("if"),
            Expression::Function(_) => String::from("fn"),
            Expression::Call(_) => String::from("("),
            Expression::Array(_) | Expression::Index(_) => String::from("["),
            Expression::Hash(_) => String::from("{"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{}", identifier),
            Expression::Integer(integer) => write!(f, "{}", integer.value),
            Expression::String(string) => write!(f, "\"{}\"", string.value),
            Expression::Boolean(boolean) => write!(f, "{}", boolean.value),
            Expression::Prefix(prefix) => write!(f, "({}{})", prefix.operator, prefix.right),
            Expression::Infix(infix) => {
                write!(f, "({} {} {})", infix.left, infix.operator, infix.right)
            }
            Expression::If(if_expr) => {
                write!(f, "if ({}) {}", if_expr.condition, if_expr.consequence)?;
                if let Some(alternative) = &if_expr.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function(function) => {
                write!(f, "fn(")?;
                write_list(f, &function.parameters)?;
                write!(f, ") {}", function.body)
            }
            Expression::Call(call) => {
                write!(f, "{}(", call.function)?;
                write_list(f, &call.arguments)?;
                write!(f, ")")
            }
            Expression::Array(array) => {
                write!(f, "[")?;
                write_list(f, &array.elements)?;
                write!(f, "]")
            }
            Expression::Index(index) => write!(f, "({}[{}])", index.left, index.index),
            Expression::Hash(hash) => {
                write!(f, "{{")?;
                for (position, (key, value)) in hash.pairs.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// LITERALS

/// Identifier
/// A name; also used for `let` targets and function parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier {
            value: value.into(),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
}

// COMPLEX

/// Prefix Expression
/// `!` or `-` applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: String,
    pub right: Box<Expression>,
}

/// Infix Expression
/// A binary operation; `operator` is the source lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expression>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStmt,
}

/// Call Expression
/// `function` is any expression that evaluates to something callable.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

/// Hash Literal
/// Pairs are kept in source order so rendering is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub pairs: Vec<(Expression, Expression)>,
}

impl HashLiteral {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
