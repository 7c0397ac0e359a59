use crate::ast::ast::{Expression, Statement};
use crate::ast::expressions::{
    Argument, BooleanLiteral, CallExpression, FloatLiteral, FunctionLiteral, Identifier,
    IfExpression, InfixExpression, IntegerLiteral, KeywordLiteral, NullLiteral, PrefixExpression,
    SquareExpression, StringLiteral, VectorLiteral,
};
use crate::ast::statements::{BlockStatement, ExpressionStatement};
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::lexer::tokens::TokenKind;

use super::lookups::BindingPower;
use super::parser::Parser;
use super::stmt::{parse_block, parse_parameters};
use super::types::parse_type_list;

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Diagnostic> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            let token = parser.current_token();
            return Err(Diagnostic::new(
                DiagnosticKind::UnexpectedToken {
                    token: token.value.clone(),
                },
                Severity::Fatal,
                token.position.clone(),
            ));
        }
    };

    let mut left = nud(parser)?;

    // While a LED exists and the next token binds tighter, keep extending
    loop {
        let kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&kind)
            .unwrap_or(&BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&kind) {
            Some(handler) => *handler,
            None => break,
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

// a missing right-hand side is recorded in the AST, not repaired;
// the walker reports it
fn rhs_missing(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Eol | TokenKind::Eof | TokenKind::RightCurly
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            let token = parser.advance();
            // integers with an exponent ("1e10") overflow the direct parse
            let value = token
                .value
                .parse::<i64>()
                .or_else(|_| token.value.parse::<f64>().map(|f| f as i64));

            match value {
                Ok(value) => Ok(Expression::Integer(IntegerLiteral { token, value })),
                Err(_) => Err(Diagnostic::new(
                    DiagnosticKind::InvalidNumber {
                        value: token.value.clone(),
                    },
                    Severity::Fatal,
                    token.position,
                )),
            }
        }
        TokenKind::Float => {
            let token = parser.advance();
            match token.value.parse::<f64>() {
                Ok(value) => Ok(Expression::Float(FloatLiteral { token, value })),
                Err(_) => Err(Diagnostic::new(
                    DiagnosticKind::InvalidNumber {
                        value: token.value.clone(),
                    },
                    Severity::Fatal,
                    token.position,
                )),
            }
        }
        TokenKind::Ident
        | TokenKind::Types
        | TokenKind::ThreeDot
        | TokenKind::CallNative
        | TokenKind::CNative
        | TokenKind::FortranNative => {
            let token = parser.advance();
            Ok(Expression::Identifier(Identifier {
                value: token.value.clone(),
                token,
                types: vec![],
            }))
        }
        _ => {
            let token = parser.current_token();
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

pub fn parse_bool_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance();
    let value = token.value == "TRUE";
    Ok(Expression::Boolean(BooleanLiteral { token, value }))
}

pub fn parse_null_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance();
    Ok(Expression::Null(NullLiteral { token }))
}

pub fn parse_keyword_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance();
    let name = match token.kind {
        TokenKind::Na => "na",
        TokenKind::NaInteger => "na_int",
        TokenKind::NaCharacter => "na_char",
        TokenKind::NaReal => "na_real",
        TokenKind::NaComplex => "na_complex",
        TokenKind::Nan => "nan",
        _ => "num", // Inf
    };

    Ok(Expression::Keyword(KeywordLiteral {
        token,
        types: vec![crate::ast::types::Type::new(name)],
    }))
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let open = parser.advance();

    let mut value = String::new();
    if parser.current_token_kind() == TokenKind::String {
        value = parser.advance().value;
    }

    parser.expect(open.kind)?;

    Ok(Expression::Str(StringLiteral { token: open, value }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expression::Prefix(PrefixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator_token = parser.advance();

    let right = if rhs_missing(parser) {
        None
    } else {
        Some(Box::new(parse_expr(parser, bp)?))
    };

    Ok(Expression::Infix(InfixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right,
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator_token = parser.advance();

    // right-associative: re-enter at the lowest level
    let right = if rhs_missing(parser) {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    Ok(Expression::Infix(InfixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right,
    }))
}

pub fn parse_power_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator_token = parser.advance();

    // right-associative: bind one level below
    let right = if rhs_missing(parser) {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Multiplicative)?))
    };

    Ok(Expression::Infix(InfixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right,
    }))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator_token = parser.advance();

    let right = if rhs_missing(parser) {
        None
    } else {
        Some(Box::new(parse_expr(parser, bp)?))
    };

    Ok(Expression::Infix(InfixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right,
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let token = parser.advance(); // (

    let name = match &left {
        Expression::Identifier(ident) => ident.value.clone(),
        _ => String::new(),
    };

    let mut arguments = vec![];

    loop {
        parser.skip_eol();

        if parser.current_token_kind() == TokenKind::RightParen || !parser.has_tokens() {
            break;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        // NAME = EXPR is a named argument, not an assignment
        if matches!(
            parser.current_token_kind(),
            TokenKind::Ident | TokenKind::Types
        ) && parser.peek_kind(1) == TokenKind::Assign
            && parser.peek_token(1).value == "="
        {
            let name_token = parser.advance();
            parser.advance(); // =
            let value = parse_expr(parser, BindingPower::Default)?;
            arguments.push(Argument {
                name: Some(name_token.value.clone()),
                token: name_token,
                value,
            });
            continue;
        }

        let value = parse_expr(parser, BindingPower::Default)?;
        arguments.push(Argument {
            token: value.token().clone(),
            name: None,
            value,
        });
    }

    parser.expect(TokenKind::RightParen)?;

    Ok(Expression::Call(CallExpression {
        token,
        function: Box::new(left),
        name,
        arguments,
    }))
}

pub fn parse_square_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let token = parser.advance();
    let double = token.kind == TokenKind::DoubleLeftSquare;
    let closing = if double {
        TokenKind::DoubleRightSquare
    } else {
        TokenKind::RightSquare
    };

    let mut contents = vec![];

    loop {
        parser.skip_eol();

        if parser.current_token_kind() == closing || !parser.has_tokens() {
            break;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        contents.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(closing)?;

    Ok(Expression::Square(SquareExpression {
        token,
        left: Box::new(left),
        double,
        contents,
    }))
}

/// `(` opens a grouping, a vector literal or an anonymous function;
/// an annotation after the matching closer picks the function reading.
fn is_anonymous_function(parser: &Parser) -> bool {
    let mut depth = 0usize;
    let mut offset = 0usize;

    loop {
        let kind = if offset == 0 {
            parser.current_token_kind()
        } else {
            parser.peek_kind(offset)
        };

        match kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return parser.peek_kind(offset + 1) == TokenKind::Colon;
                }
            }
            TokenKind::Eof => return false,
            _ => {}
        }

        offset += 1;
    }
}

fn parse_anonymous_function(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance(); // (
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::RightParen)?;
    parser.expect(TokenKind::Colon)?;
    let return_types = parse_type_list(parser)?;
    parser.expect(TokenKind::Arrow)?;
    let body = parse_block(parser)?;

    Ok(Expression::Function(Box::new(FunctionLiteral {
        token,
        name: None,
        method: None,
        parameters,
        return_types,
        body,
    })))
}

pub fn parse_paren_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    if is_anonymous_function(parser) {
        return parse_anonymous_function(parser);
    }

    let token = parser.advance(); // (

    if parser.current_token_kind() == TokenKind::RightParen {
        parser.advance();
        return Ok(Expression::Vector(VectorLiteral {
            token,
            values: vec![],
        }));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    // a comma makes it a vector literal, otherwise plain grouping
    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::RightParen)?;
        return Ok(first);
    }

    let mut values = vec![first];

    loop {
        parser.skip_eol();

        if parser.current_token_kind() == TokenKind::RightParen || !parser.has_tokens() {
            break;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::RightParen)?;

    Ok(Expression::Vector(VectorLiteral { token, values }))
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance(); // if
    parser.expect(TokenKind::LeftParen)?;
    let condition = Box::new(parse_expr(parser, BindingPower::Default)?);
    parser.expect(TokenKind::RightParen)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        if parser.current_token_kind() == TokenKind::If {
            // `else if` chains re-enter as a nested if-expression
            let nested = parse_if_expr(parser)?;
            let nested_token = nested.token().clone();
            Some(BlockStatement {
                token: nested_token.clone(),
                statements: vec![Statement::Expression(ExpressionStatement {
                    token: nested_token,
                    expression: nested,
                })],
            })
        } else {
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Expression::If(IfExpression {
        token,
        condition,
        consequence,
        alternative,
    }))
}
