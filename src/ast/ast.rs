use crate::lexer::tokens::Token;

use super::expressions::{
    BooleanLiteral, CallExpression, FloatLiteral, FunctionLiteral, Identifier, IfExpression,
    InfixExpression, IntegerLiteral, KeywordLiteral, NullLiteral, PrefixExpression,
    SquareExpression, StringLiteral, VectorLiteral,
};
use super::statements::{
    BlockStatement, BreakStatement, CommentStatement, ConstStatement, DecoratorClass,
    DecoratorDefault, DecoratorGeneric, ExpressionStatement, ForStatement, LetStatement,
    NextStatement, RepeatStatement, ReturnStatement, SpecialComment, TypeStatement,
    WhileStatement,
};

/// A whole source unit: an ordered sequence of top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub enum Statement {
    Let(LetStatement),
    Const(ConstStatement),
    TypeDecl(TypeStatement),
    Return(ReturnStatement),
    Block(BlockStatement),
    Function(FunctionLiteral),
    For(ForStatement),
    While(WhileStatement),
    Repeat(RepeatStatement),
    Break(BreakStatement),
    Next(NextStatement),
    Comment(CommentStatement),
    Special(SpecialComment),
    DecoratorClass(DecoratorClass),
    DecoratorGeneric(DecoratorGeneric),
    DecoratorDefault(DecoratorDefault),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Let(s) => &s.token,
            Statement::Const(s) => &s.token,
            Statement::TypeDecl(s) => &s.token,
            Statement::Return(s) => &s.token,
            Statement::Block(s) => &s.token,
            Statement::Function(s) => &s.token,
            Statement::For(s) => &s.token,
            Statement::While(s) => &s.token,
            Statement::Repeat(s) => &s.token,
            Statement::Break(s) => &s.token,
            Statement::Next(s) => &s.token,
            Statement::Comment(s) => &s.token,
            Statement::Special(s) => &s.token,
            Statement::DecoratorClass(s) => &s.token,
            Statement::DecoratorGeneric(s) => &s.token,
            Statement::DecoratorDefault(s) => &s.token,
            Statement::Expression(s) => &s.token,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    Keyword(KeywordLiteral),
    Vector(VectorLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(Box<FunctionLiteral>),
    Call(CallExpression),
    Square(SquareExpression),
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(e) => &e.token,
            Expression::Integer(e) => &e.token,
            Expression::Float(e) => &e.token,
            Expression::Str(e) => &e.token,
            Expression::Boolean(e) => &e.token,
            Expression::Null(e) => &e.token,
            Expression::Keyword(e) => &e.token,
            Expression::Vector(e) => &e.token,
            Expression::Prefix(e) => &e.token,
            Expression::Infix(e) => &e.token,
            Expression::If(e) => &e.token,
            Expression::Function(e) => &e.token,
            Expression::Call(e) => &e.token,
            Expression::Square(e) => &e.token,
        }
    }
}
