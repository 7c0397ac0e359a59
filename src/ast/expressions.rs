use crate::lexer::tokens::Token;

use super::ast::Expression;
use super::statements::BlockStatement;
use super::types::{Type, Types};

#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
    /// Filled in for identifiers whose type is known at parse time;
    /// otherwise resolved by the walker.
    pub types: Types,
}

#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone)]
pub struct NullLiteral {
    pub token: Token,
}

/// `NA`, the typed NA variants, `Inf` and `NaN`.
#[derive(Debug, Clone)]
pub struct KeywordLiteral {
    pub token: Token,
    pub types: Types,
}

/// A parenthesised list of expressions, all of the same type.
#[derive(Debug, Clone)]
pub struct VectorLiteral {
    pub token: Token,
    pub values: Vec<Expression>,
}

#[derive(Debug, Clone)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

/// The right-hand side is absent when the parser recovered from a missing
/// operand; the walker reports it.
#[derive(Debug, Clone)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Option<Box<Expression>>,
}

#[derive(Debug, Clone)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// A function: named declaration, method (receiver present) or anonymous
/// literal (no name).
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub name: Option<String>,
    pub method: Option<Method>,
    pub parameters: Vec<Parameter>,
    pub return_types: Types,
    pub body: BlockStatement,
}

/// The typed receiver that makes a function a method on that type.
#[derive(Debug, Clone)]
pub struct Method {
    pub token: Token,
    pub name: String,
    pub tipe: Type,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub token: Token,
    pub name: String,
    pub types: Types,
    pub default: Option<Expression>,
    pub variadic: bool,
}

#[derive(Debug, Clone)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    /// Callee name when the callee is a plain identifier; empty otherwise.
    pub name: String,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub token: Token,
    pub name: Option<String>,
    pub value: Expression,
}

/// `x[...]` or `x[[...]]`.
#[derive(Debug, Clone)]
pub struct SquareExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub double: bool,
    pub contents: Vec<Expression>,
}
