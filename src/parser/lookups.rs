use std::collections::HashMap;

use crate::ast::ast::{Expression, Statement};
use crate::diagnostics::diagnostics::Diagnostic;
use crate::lexer::tokens::TokenKind;

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest to highest.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Logical,
    Equality,
    Relational,
    Pipe,
    Range,
    Additive,
    Multiplicative,
    Power,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Diagnostic>;
pub type NudHandler = fn(&mut Parser) -> Result<Expression, Diagnostic>;
pub type LedHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, Diagnostic>;

// Lookup tables inside the parser struct, keyed by token kind
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NudLookup = HashMap<TokenKind, NudHandler>;
pub type LedLookup = HashMap<TokenKind, LedHandler>;
pub type BpLookup = HashMap<TokenKind, BindingPower>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment, right-associative; `=` and `<-` share a token kind
    parser.led(TokenKind::Assign, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Equality
    parser.led(TokenKind::DoubleEqual, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEqual, BindingPower::Equality, parse_binary_expr);

    // Ordering
    parser.led(TokenKind::LessThan, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterThan, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessOrEqual, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterOrEqual, BindingPower::Relational, parse_binary_expr);

    parser.led(TokenKind::Pipe, BindingPower::Pipe, parse_binary_expr);
    parser.led(TokenKind::Range, BindingPower::Range, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Multiply, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Divide, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Modulus, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Infix, BindingPower::Multiplicative, parse_binary_expr);

    // `^` is right-associative
    parser.led(TokenKind::Power, BindingPower::Power, parse_power_expr);

    // Call and indexing
    parser.led(TokenKind::LeftParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::LeftSquare, BindingPower::Call, parse_square_expr);
    parser.led(TokenKind::DoubleLeftSquare, BindingPower::Call, parse_square_expr);

    // Member and namespace access
    parser.led(TokenKind::Dollar, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::Namespace, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::NamespaceInternal, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::Ident, parse_primary_expr);
    parser.nud(TokenKind::Types, parse_primary_expr);
    parser.nud(TokenKind::ThreeDot, parse_primary_expr);
    parser.nud(TokenKind::CallNative, parse_primary_expr);
    parser.nud(TokenKind::CNative, parse_primary_expr);
    parser.nud(TokenKind::FortranNative, parse_primary_expr);
    parser.nud(TokenKind::Bool, parse_bool_expr);
    parser.nud(TokenKind::Null, parse_null_expr);
    parser.nud(TokenKind::Na, parse_keyword_expr);
    parser.nud(TokenKind::NaInteger, parse_keyword_expr);
    parser.nud(TokenKind::NaCharacter, parse_keyword_expr);
    parser.nud(TokenKind::NaReal, parse_keyword_expr);
    parser.nud(TokenKind::NaComplex, parse_keyword_expr);
    parser.nud(TokenKind::Inf, parse_keyword_expr);
    parser.nud(TokenKind::Nan, parse_keyword_expr);
    parser.nud(TokenKind::DoubleQuote, parse_string_expr);
    parser.nud(TokenKind::SingleQuote, parse_string_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::LeftParen, parse_paren_expr);
    parser.nud(TokenKind::If, parse_if_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Const, parse_const_stmt);
    parser.stmt(TokenKind::TypeDecl, parse_type_stmt);
    parser.stmt(TokenKind::Function, parse_function_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Repeat, parse_repeat_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Next, parse_next_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Comment, parse_comment_stmt);
    parser.stmt(TokenKind::SpecialComment, parse_special_comment_stmt);
    parser.stmt(TokenKind::Decorator, parse_decorator_stmt);
}
