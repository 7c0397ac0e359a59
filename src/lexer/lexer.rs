use std::rc::Rc;

use crate::diagnostics::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Position, MK_TOKEN};

use super::tokens::{Token, TokenKind, BASE_TYPES, RESERVED_LOOKUP};

const STRING_NUMBER: &str = "0123456789";
const STRING_MATH_OP: &str = "+-*/^";

/// A lexer state: inspects peeked runes, emits zero or more tokens,
/// advances the cursor and returns the next state. `None` terminates the
/// machine after `Eof` has been emitted.
pub struct StateFn(pub fn(&mut Lexer) -> Option<StateFn>);

pub struct Lexer {
    input: Vec<char>,
    coords: Vec<(u32, u32)>,
    start: usize,
    pos: usize,
    quote: char,
    file: Rc<String>,
    tokens: Vec<Token>,
    diagnostics: Diagnostics,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<memory>"))
        };

        let input: Vec<char> = source.chars().collect();

        // line/column of every rune, with one extra slot for EOF
        let mut coords = Vec::with_capacity(input.len() + 1);
        let (mut line, mut col) = (1u32, 1u32);
        for &c in &input {
            coords.push((line, col));
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        coords.push((line, col));

        Lexer {
            input,
            coords,
            start: 0,
            pos: 0,
            quote: '"',
            file: file_name,
            tokens: vec![],
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn run(&mut self) {
        let mut state = Some(StateFn(lex_default));
        while let Some(StateFn(f)) = state {
            state = f(self);
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn position_at(&self, index: usize) -> Position {
        let (line, column) = self.coords[index.min(self.coords.len() - 1)];
        Position::new(line, column, Rc::clone(&self.file))
    }

    fn next(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Peek the nth rune ahead without advancing, 1-based.
    fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.pos + n - 1).copied()
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// The currently accepted lexeme.
    fn token(&self) -> String {
        self.input[self.start..self.pos].iter().collect()
    }

    fn emit(&mut self, kind: TokenKind) {
        // skip empty tokens
        if self.start == self.pos {
            return;
        }

        let value = self.token();
        let position = self.position_at(self.start);
        self.tokens.push(MK_TOKEN!(kind, value, position));
        self.start = self.pos;
    }

    fn emit_eof(&mut self) {
        let position = self.position_at(self.pos);
        self.tokens
            .push(MK_TOKEN!(TokenKind::Eof, String::from("EOF"), position));
    }

    fn accept(&mut self, valid: &str) -> bool {
        if let Some(c) = self.peek(1) {
            if valid.contains(c) {
                self.next();
                return true;
            }
        }
        false
    }

    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    fn accept_while(&mut self, pred: fn(char) -> bool) {
        while let Some(c) = self.peek(1) {
            if !pred(c) {
                break;
            }
            self.next();
        }
    }
}

fn is_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_type_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lex_default(l: &mut Lexer) -> Option<StateFn> {
    let r1 = match l.peek(1) {
        Some(r) => r,
        None => {
            l.emit_eof();
            return None;
        }
    };

    if r1 == '"' {
        l.next();
        l.emit(TokenKind::DoubleQuote);
        l.quote = '"';
        return Some(StateFn(lex_string));
    }

    if r1 == '\'' {
        l.next();
        l.emit(TokenKind::SingleQuote);
        l.quote = '\'';
        return Some(StateFn(lex_string));
    }

    if r1 == '#' {
        return Some(StateFn(lex_comment));
    }

    // strings are parsed above: plain spacing can be skipped
    if r1 == ' ' || r1 == '\t' || r1 == '\r' {
        l.next();
        l.ignore();
        return Some(StateFn(lex_default));
    }

    if r1 == '\n' || r1 == ';' {
        l.next();
        l.emit(TokenKind::Eol);
        return Some(StateFn(lex_default));
    }

    let r2 = l.peek(2);
    let r3 = l.peek(3);

    if r1 == ':' && r2 == Some(':') && r3 == Some(':') {
        l.next();
        l.next();
        l.next();
        l.emit(TokenKind::NamespaceInternal);
        return Some(StateFn(lex_identifier));
    }

    if r1 == ':' && r2 == Some(':') {
        l.next();
        l.next();
        l.emit(TokenKind::Namespace);
        return Some(StateFn(lex_identifier));
    }

    // a colon outside `::` introduces a type annotation
    if r1 == ':' {
        l.next();
        l.emit(TokenKind::Colon);
        return Some(StateFn(lex_type));
    }

    if r1 == '.' && r2 == Some('.') && r3 == Some('.') {
        l.next();
        l.next();
        l.next();
        l.emit(TokenKind::ThreeDot);
        return Some(StateFn(lex_default));
    }

    if r1 == '.' && r2 == Some('.') {
        l.next();
        l.next();
        l.emit(TokenKind::Range);
        return Some(StateFn(lex_default));
    }

    // .Call, .C, .Fortran
    if r1 == '.' && r2.map(|c| c.is_ascii_alphabetic()).unwrap_or(false) {
        return Some(StateFn(lex_identifier));
    }

    if r1 == '%' && r2 == Some('%') {
        l.next();
        l.next();
        l.emit(TokenKind::Modulus);
        return Some(StateFn(lex_default));
    }

    // any other %...% is a user-defined infix operator
    if r1 == '%' {
        return Some(StateFn(lex_infix));
    }

    if r1 == '=' && r2 == Some('=') {
        l.next();
        l.next();
        l.emit(TokenKind::DoubleEqual);
        return Some(StateFn(lex_default));
    }

    if r1 == '=' && r2 == Some('>') {
        l.next();
        l.next();
        l.emit(TokenKind::Arrow);
        return Some(StateFn(lex_default));
    }

    if r1 == '=' {
        l.next();
        l.emit(TokenKind::Assign);
        return Some(StateFn(lex_default));
    }

    if r1 == '!' && r2 == Some('=') {
        l.next();
        l.next();
        l.emit(TokenKind::NotEqual);
        return Some(StateFn(lex_default));
    }

    if r1 == '!' {
        l.next();
        l.emit(TokenKind::Bang);
        return Some(StateFn(lex_default));
    }

    if r1 == '>' && r2 == Some('=') {
        l.next();
        l.next();
        l.emit(TokenKind::GreaterOrEqual);
        return Some(StateFn(lex_default));
    }

    if r1 == '>' {
        l.next();
        l.emit(TokenKind::GreaterThan);
        return Some(StateFn(lex_default));
    }

    if r1 == '<' && r2 == Some('-') {
        l.next();
        l.next();
        l.emit(TokenKind::Assign);
        return Some(StateFn(lex_default));
    }

    if r1 == '<' && r2 == Some('=') {
        l.next();
        l.next();
        l.emit(TokenKind::LessOrEqual);
        return Some(StateFn(lex_default));
    }

    if r1 == '<' {
        l.next();
        l.emit(TokenKind::LessThan);
        return Some(StateFn(lex_default));
    }

    if r1 == '|' && r2 == Some('>') {
        l.next();
        l.next();
        l.emit(TokenKind::Pipe);
        return Some(StateFn(lex_default));
    }

    if r1 == '|' {
        l.next();
        l.emit(TokenKind::Or);
        return Some(StateFn(lex_default));
    }

    if r1 == '&' {
        l.next();
        l.emit(TokenKind::And);
        return Some(StateFn(lex_default));
    }

    if r1 == '$' {
        l.next();
        l.emit(TokenKind::Dollar);
        return Some(StateFn(lex_default));
    }

    if r1 == ',' {
        l.next();
        l.emit(TokenKind::Comma);
        return Some(StateFn(lex_default));
    }

    if r1 == '?' {
        l.next();
        l.emit(TokenKind::Question);
        return Some(StateFn(lex_default));
    }

    if r1 == '`' {
        l.next();
        l.emit(TokenKind::Backtick);
        return Some(StateFn(lex_default));
    }

    if r1 == '@' {
        return Some(StateFn(lex_decorator));
    }

    if r1 == '(' {
        l.next();
        l.emit(TokenKind::LeftParen);
        return Some(StateFn(lex_default));
    }

    if r1 == ')' {
        l.next();
        l.emit(TokenKind::RightParen);
        return Some(StateFn(lex_default));
    }

    if r1 == '{' {
        l.next();
        l.emit(TokenKind::LeftCurly);
        return Some(StateFn(lex_default));
    }

    if r1 == '}' {
        l.next();
        l.emit(TokenKind::RightCurly);
        return Some(StateFn(lex_default));
    }

    if r1 == '[' && r2 == Some('[') {
        l.next();
        l.next();
        l.emit(TokenKind::DoubleLeftSquare);
        return Some(StateFn(lex_default));
    }

    if r1 == '[' {
        l.next();
        l.emit(TokenKind::LeftSquare);
        return Some(StateFn(lex_default));
    }

    if r1 == ']' && r2 == Some(']') {
        l.next();
        l.next();
        l.emit(TokenKind::DoubleRightSquare);
        return Some(StateFn(lex_default));
    }

    if r1 == ']' {
        l.next();
        l.emit(TokenKind::RightSquare);
        return Some(StateFn(lex_default));
    }

    if r1.is_ascii_digit() {
        return Some(StateFn(lex_number));
    }

    if STRING_MATH_OP.contains(r1) {
        return Some(StateFn(lex_math_op));
    }

    if r1.is_ascii_alphabetic() {
        return Some(StateFn(lex_identifier));
    }

    // stray rune: report it, skip it, keep lexing
    let position = l.position_at(l.pos);
    l.diagnostics
        .add_fatal(DiagnosticKind::UnrecognisedCharacter { character: r1 }, position);
    l.next();
    l.ignore();
    Some(StateFn(lex_default))
}

fn lex_math_op(l: &mut Lexer) -> Option<StateFn> {
    l.accept(STRING_MATH_OP);

    match l.token().as_str() {
        "+" => l.emit(TokenKind::Plus),
        "-" => l.emit(TokenKind::Minus),
        "*" => l.emit(TokenKind::Multiply),
        "/" => l.emit(TokenKind::Divide),
        "^" => l.emit(TokenKind::Power),
        _ => {}
    }

    Some(StateFn(lex_default))
}

fn lex_number(l: &mut Lexer) -> Option<StateFn> {
    l.accept_run(STRING_NUMBER);

    if l.peek(1) == Some('e') {
        l.next();
        l.accept_run(STRING_NUMBER);
    }

    // `1..10` is integer, range, integer; never a float
    if l.peek(1) == Some('.') && l.peek(2) == Some('.') {
        l.emit(TokenKind::Integer);
        l.next();
        l.next();
        l.emit(TokenKind::Range);
        return Some(StateFn(lex_number));
    }

    if l.accept(".") {
        l.accept_run(STRING_NUMBER);
        l.emit(TokenKind::Float);
        return Some(StateFn(lex_default));
    }

    l.emit(TokenKind::Integer);
    Some(StateFn(lex_default))
}

fn lex_comment(l: &mut Lexer) -> Option<StateFn> {
    if l.peek(2) == Some('\'') {
        l.next(); // #
        l.next(); // '
        l.emit(TokenKind::SpecialComment);
        return Some(StateFn(lex_special_comment));
    }

    while let Some(r) = l.peek(1) {
        if r == '\n' {
            break;
        }
        l.next();
    }

    l.emit(TokenKind::Comment);
    Some(StateFn(lex_default))
}

fn lex_special_comment(l: &mut Lexer) -> Option<StateFn> {
    if l.peek(1) == Some(' ') {
        l.next();
        l.ignore();
    }

    while let Some(r) = l.peek(1) {
        if r == '\n' {
            break;
        }
        l.next();
    }

    l.emit(TokenKind::SpecialComment);
    Some(StateFn(lex_default))
}

fn lex_string(l: &mut Lexer) -> Option<StateFn> {
    let closing = l.quote;

    loop {
        match l.peek(1) {
            None => {
                l.next();
                let found = l.token();
                let position = l.position_at(l.start);
                l.diagnostics
                    .add_fatal(DiagnosticKind::UnterminatedString { found }, position);
                l.emit_eof();
                return None;
            }
            Some(c) if c == closing => break,
            // a backslash escapes the next rune; both are preserved
            Some('\\') => {
                l.next();
                l.next();
            }
            Some(_) => {
                l.next();
            }
        }
    }

    l.emit(TokenKind::String);

    l.next();
    if closing == '"' {
        l.emit(TokenKind::DoubleQuote);
    } else {
        l.emit(TokenKind::SingleQuote);
    }

    Some(StateFn(lex_default))
}

fn lex_infix(l: &mut Lexer) -> Option<StateFn> {
    l.next();

    loop {
        match l.peek(1) {
            None => {
                l.next();
                let found = l.token();
                let position = l.position_at(l.start);
                l.diagnostics
                    .add_fatal(DiagnosticKind::UnterminatedInfix { found }, position);
                l.emit_eof();
                return None;
            }
            Some('%') => break,
            Some(_) => {
                l.next();
            }
        }
    }

    l.next();
    l.emit(TokenKind::Infix);

    Some(StateFn(lex_default))
}

fn lex_identifier(l: &mut Lexer) -> Option<StateFn> {
    l.accept_while(is_identifier);

    let tk = l.token();

    if let Some(kind) = RESERVED_LOOKUP.get(tk.as_str()) {
        l.emit(*kind);
        return Some(StateFn(lex_default));
    }

    if BASE_TYPES.contains(&tk.as_str()) {
        l.emit(TokenKind::Types);
        return Some(StateFn(lex_default));
    }

    l.emit(TokenKind::Ident);
    Some(StateFn(lex_default))
}

fn lex_decorator(l: &mut Lexer) -> Option<StateFn> {
    l.next(); // @
    l.ignore();
    l.accept_while(is_type_name);
    l.emit(TokenKind::Decorator);
    Some(StateFn(lex_default))
}

/// Annotation sub-state entered after a colon: recognises type names,
/// `|` separators and the `[]` list marker, then falls back to default.
fn lex_type(l: &mut Lexer) -> Option<StateFn> {
    loop {
        while l.accept(" ") {
            l.ignore();
        }

        if l.peek(1) == Some('[') && l.peek(2) == Some(']') {
            l.next();
            l.next();
            l.emit(TokenKind::TypesList);
        }

        l.accept_while(is_type_name);
        l.emit(TokenKind::Types);

        // continue on a union separator, optionally spaced
        let mut lookahead = 1;
        while l.peek(lookahead) == Some(' ') {
            lookahead += 1;
        }

        if l.peek(lookahead) == Some('|') && l.peek(lookahead + 1) != Some('>') {
            while l.accept(" ") {
                l.ignore();
            }
            l.next();
            l.emit(TokenKind::TypesOr);
            continue;
        }

        return Some(StateFn(lex_default));
    }
}

/// Lex a whole source file, returning the token stream and the
/// diagnostics collected along the way.
pub fn tokenize(source: &str, file: Option<String>) -> (Vec<Token>, Diagnostics) {
    let mut lexer = Lexer::new(source, file);
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}
