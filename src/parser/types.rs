use crate::ast::types::{Type, Types};
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::lexer::tokens::TokenKind;

use super::parser::Parser;

fn expect_type_name(parser: &mut Parser) -> Result<String, Diagnostic> {
    match parser.current_token_kind() {
        TokenKind::Types | TokenKind::Ident => Ok(parser.advance().value),
        _ => {
            let token = parser.current_token();
            Err(Diagnostic::new(
                DiagnosticKind::ExpectedToken {
                    expected: String::from("a type name"),
                    found: token.value.clone(),
                },
                Severity::Fatal,
                token.position.clone(),
            ))
        }
    }
}

/// A type expression after a colon: a non-empty `|`-separated list of
/// alternatives, each optionally prefixed by the `[]` list marker.
pub fn parse_type_list(parser: &mut Parser) -> Result<Types, Diagnostic> {
    let mut types = vec![];

    loop {
        let mut list = false;
        if parser.current_token_kind() == TokenKind::TypesList {
            parser.advance();
            list = true;
        }

        let name = expect_type_name(parser)?;
        types.push(Type { name, list });

        if parser.current_token_kind() == TokenKind::TypesOr {
            parser.advance();
            continue;
        }

        break;
    }

    Ok(types)
}

/// A type expression inside braces, where the lexer ran in its default
/// state: the union separator arrives as `Or` and the list marker as a
/// square-bracket pair.
pub fn parse_braced_types(parser: &mut Parser) -> Result<Types, Diagnostic> {
    let mut types = vec![];

    loop {
        parser.skip_eol();

        let mut list = false;
        if parser.current_token_kind() == TokenKind::LeftSquare
            && parser.peek_kind(1) == TokenKind::RightSquare
        {
            parser.advance();
            parser.advance();
            list = true;
        }
        if parser.current_token_kind() == TokenKind::TypesList {
            parser.advance();
            list = true;
        }

        let name = expect_type_name(parser)?;
        types.push(Type { name, list });

        if matches!(
            parser.current_token_kind(),
            TokenKind::Or | TokenKind::TypesOr
        ) {
            parser.advance();
            continue;
        }

        break;
    }

    Ok(types)
}
