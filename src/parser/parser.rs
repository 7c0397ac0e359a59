use std::collections::HashMap;

use crate::ast::ast::{Program, Statement};
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
use crate::lexer::tokens::{Token, TokenKind};
use crate::Position;

use super::lookups::{
    create_token_lookups, BindingPower, BpLookup, LedHandler, LedLookup, NudHandler, NudLookup,
    StmtHandler, StmtLookup,
};
use super::stmt::parse_stmt;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NudLookup,
    led_lookup: LedLookup,
    binding_power_lookup: BpLookup,
    pub(super) diagnostics: Diagnostics,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream ends with EOF"))
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the nth token ahead of the cursor, 1-based.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// The nth token ahead of the cursor, 1-based.
    pub fn peek_token(&self, n: usize) -> &Token {
        self.tokens
            .get(self.pos + n)
            .unwrap_or_else(|| self.tokens.last().expect("token stream ends with EOF"))
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Diagnostic>,
    ) -> Result<Token, Diagnostic> {
        if self.current_token_kind() != expected_kind {
            let token = self.current_token();
            match error {
                Some(error) => Err(error),
                None => Err(Diagnostic::new(
                    DiagnosticKind::ExpectedToken {
                        expected: expected_kind.to_string(),
                        found: token.value.clone(),
                    },
                    Severity::Fatal,
                    token.position.clone(),
                )),
            }
        } else {
            Ok(self.advance())
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Diagnostic> {
        self.expect_error(expected_kind, None)
    }

    /// A name position accepts plain identifiers and base type names,
    /// which lex as `Types`.
    pub fn expect_name(&mut self) -> Result<Token, Diagnostic> {
        match self.current_token_kind() {
            TokenKind::Ident | TokenKind::Types => Ok(self.advance()),
            _ => {
                let token = self.current_token();
                Err(Diagnostic::new(
                    DiagnosticKind::ExpectedToken {
                        expected: String::from("a name"),
                        found: token.value.clone(),
                    },
                    Severity::Fatal,
                    token.position.clone(),
                ))
            }
        }
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::Eof
    }

    pub fn skip_eol(&mut self) {
        while self.current_token_kind() == TokenKind::Eol {
            self.advance();
        }
    }

    /// A statement ends at an end-of-line, end-of-file or before a
    /// closing brace.
    pub fn end_statement(&mut self) -> Result<(), Diagnostic> {
        match self.current_token_kind() {
            TokenKind::Eol => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::RightCurly => Ok(()),
            _ => {
                let token = self.current_token();
                Err(Diagnostic::new(
                    DiagnosticKind::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    Severity::Fatal,
                    token.position.clone(),
                ))
            }
        }
    }

    /// Resynchronise at the next statement boundary after an error. A
    /// closing brace is left for the enclosing block, unless nothing was
    /// consumed at all (a stray closer would stall the parse loop).
    pub fn synchronize(&mut self) {
        let start = self.pos;
        while self.has_tokens() {
            match self.current_token_kind() {
                TokenKind::Eol => {
                    self.advance();
                    return;
                }
                TokenKind::RightCurly => {
                    if self.pos == start {
                        self.advance();
                    }
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NudLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LedLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BpLookup {
        &self.binding_power_lookup
    }

    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LedHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NudHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_position(&self) -> Position {
        self.current_token().position.clone()
    }
}

/// Parse a token stream into a program, recovering at statement
/// boundaries so a single malformed statement does not hide the rest.
pub fn parse(tokens: Vec<Token>) -> (Program, Diagnostics) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut statements = vec![];

    while parser.has_tokens() {
        parser.skip_eol();
        if !parser.has_tokens() {
            break;
        }

        match parse_stmt(&mut parser) {
            Ok(stmt) => statements.push(stmt),
            Err(diagnostic) => {
                parser.diagnostics.add(diagnostic);
                parser.synchronize();
            }
        }
    }

    (Program { statements }, parser.diagnostics)
}

/// Statements inside `{ ... }` blocks share the top-level recovery rule.
pub fn parse_statements_until(
    parser: &mut Parser,
    closing: TokenKind,
) -> Vec<Statement> {
    let mut statements = vec![];

    loop {
        parser.skip_eol();
        if !parser.has_tokens() || parser.current_token_kind() == closing {
            break;
        }

        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(diagnostic) => {
                parser.diagnostics.add(diagnostic);
                parser.synchronize();
            }
        }
    }

    statements
}
