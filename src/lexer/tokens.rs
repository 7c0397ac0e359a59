use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// Reserved lexemes recognised by the identifier state.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("func", TokenKind::Function);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("type", TokenKind::TypeDecl);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("break", TokenKind::Break);
        map.insert("next", TokenKind::Next);
        map.insert("in", TokenKind::In);
        map.insert("TRUE", TokenKind::Bool);
        map.insert("FALSE", TokenKind::Bool);
        map.insert("NULL", TokenKind::Null);
        map.insert("NA", TokenKind::Na);
        map.insert("NA_integer_", TokenKind::NaInteger);
        map.insert("NA_character_", TokenKind::NaCharacter);
        map.insert("NA_real_", TokenKind::NaReal);
        map.insert("NA_complex_", TokenKind::NaComplex);
        map.insert("Inf", TokenKind::Inf);
        map.insert("NaN", TokenKind::Nan);
        map.insert(".Call", TokenKind::CallNative);
        map.insert(".C", TokenKind::CNative);
        map.insert(".Fortran", TokenKind::FortranNative);
        map
    };

    /// Built-in type names; these lex as `Types` rather than `Ident`.
    pub static ref BASE_TYPES: Vec<&'static str> = vec![
        "factor",
        "int",
        "any",
        "num",
        "char",
        "bool",
        "null",
        "na",
        "na_char",
        "na_int",
        "na_real",
        "na_complex",
        "nan",
        "list",
        "object",
        "matrix",
        "dataframe",
        "struct",
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Error,
    Eof,
    Eol,

    Ident,
    Integer,
    Float,
    String,

    DoubleQuote,
    SingleQuote,
    Backtick,

    Comment,
    SpecialComment,

    Dollar,
    Comma,
    Question,
    ThreeDot,

    Pipe,   // |>
    Assign, // = and <-
    Arrow,  // =>
    Range,  // ..

    Namespace,         // ::
    NamespaceInternal, // :::
    Colon,

    Plus,
    Minus,
    Divide,
    Multiply,
    Power,
    Modulus, // %%
    Infix,   // %...%

    DoubleEqual,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,

    And,  // &
    Or,   // |
    Bang, // !

    LeftCurly,
    RightCurly,
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    DoubleLeftSquare,
    DoubleRightSquare,

    // Reserved
    If,
    Else,
    Return,
    Break,
    For,
    Repeat,
    While,
    Next,
    In,
    Function,
    Let,
    Const,
    TypeDecl,

    Bool,
    Null,
    Na,
    NaInteger,
    NaCharacter,
    NaReal,
    NaComplex,
    Inf,
    Nan,

    CallNative,    // .Call
    CNative,       // .C
    FortranNative, // .Fortran

    Decorator, // @class, @generic, @default

    // Type annotations
    Types,
    TypesOr,   // |
    TypesList, // []

    // Reserved for future use, never emitted
    Vector,
    Dataframe,
    List,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    /// Placeholder for entries without a declaring source site, such as
    /// the preinstalled base types.
    pub fn null() -> Self {
        Token {
            kind: TokenKind::Error,
            value: String::new(),
            position: Position::null(),
        }
    }

    pub fn is_na(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Na
                | TokenKind::NaInteger
                | TokenKind::NaCharacter
                | TokenKind::NaReal
                | TokenKind::NaComplex
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.kind, self.value)
    }
}
