use crate::ast::ast::Statement;
use crate::ast::expressions::{FunctionLiteral, Method, Parameter};
use crate::ast::statements::{
    Attribute, BlockStatement, BreakStatement, CommentStatement, ConstStatement, DecoratorClass,
    DecoratorDefault, DecoratorGeneric, ExpressionStatement, ForStatement, LetStatement,
    NextStatement, RepeatStatement, ReturnStatement, SpecialComment, TypeStatement,
    WhileStatement,
};
use crate::ast::types::{Type, TypeKind, Types};
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::lexer::tokens::{Token, TokenKind};

use super::expr::parse_expr;
use super::lookups::BindingPower;
use super::parser::{parse_statements_until, Parser};
use super::types::{parse_braced_types, parse_type_list};

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    let token = expression.token().clone();

    parser.end_statement()?;

    Ok(Statement::Expression(ExpressionStatement {
        token,
        expression,
    }))
}

fn parse_decl(parser: &mut Parser, is_const: bool) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // let / const

    let name_token = parser.expect_name()?;
    let name = name_token.value.clone();

    // the annotation is not optional
    if parser.current_token_kind() != TokenKind::Colon {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingTypeAnnotation { name },
            Severity::Fatal,
            name_token.position,
        ));
    }
    parser.advance();

    let types = parse_type_list(parser)?;

    let mut value = None;
    if parser.current_token_kind() == TokenKind::Assign && parser.current_token().value == "=" {
        parser.advance();
        value = Some(parse_expr(parser, BindingPower::Default)?);
    }

    if is_const && value.is_none() {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingInitialiser { name },
            Severity::Fatal,
            name_token.position,
        ));
    }

    parser.end_statement()?;

    if is_const {
        Ok(Statement::Const(ConstStatement {
            token,
            name,
            types,
            value,
        }))
    } else {
        Ok(Statement::Let(LetStatement {
            token,
            name,
            types,
            value,
        }))
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    parse_decl(parser, false)
}

pub fn parse_const_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    parse_decl(parser, true)
}

fn parse_attributes(
    parser: &mut Parser,
    form: &str,
    allow_positional: bool,
) -> Result<(Types, Vec<Attribute>), Diagnostic> {
    parser.expect(TokenKind::LeftCurly)?;

    let mut types: Types = vec![];
    let mut attributes = vec![];

    loop {
        parser.skip_eol();

        if parser.current_token_kind() == TokenKind::RightCurly || !parser.has_tokens() {
            break;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        // a bare type is the single unnamed positional entry
        if matches!(
            parser.current_token_kind(),
            TokenKind::Types | TokenKind::Ident | TokenKind::LeftSquare | TokenKind::TypesList
        ) && parser.peek_kind(1) != TokenKind::Colon
        {
            let token = parser.current_token().clone();
            let entry = parse_braced_types(parser)?;

            if !allow_positional || !types.is_empty() {
                parser.diagnostics.add(Diagnostic::new(
                    DiagnosticKind::UnnamedField {
                        form: form.to_string(),
                    },
                    Severity::Fatal,
                    token.position,
                ));
                continue;
            }

            types = entry;
            continue;
        }

        let name_token = parser.expect_name()?;
        parser.expect(TokenKind::Colon)?;
        let attribute_types = parse_type_list(parser)?;

        attributes.push(Attribute {
            name: name_token.value.clone(),
            token: name_token,
            types: attribute_types,
        });
    }

    parser.expect(TokenKind::RightCurly)?;

    Ok((types, attributes))
}

pub fn parse_type_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // type

    let name = parser.expect_name()?.value;
    parser.expect(TokenKind::Colon)?;

    let current = parser.current_token().clone();

    // the braced structural forms
    if current.kind == TokenKind::Types && parser.peek_kind(1) == TokenKind::LeftCurly {
        let (kind, allow_positional) = match current.value.as_str() {
            "struct" => (TypeKind::Struct, true),
            "object" => (TypeKind::Object, false),
            "dataframe" => (TypeKind::Dataframe, false),
            "list" => (TypeKind::List, false),
            _ => {
                return Err(Diagnostic::new(
                    DiagnosticKind::UnexpectedToken {
                        token: current.value.clone(),
                    },
                    Severity::Fatal,
                    current.position,
                ))
            }
        };
        parser.advance();

        if kind == TypeKind::List {
            parser.expect(TokenKind::LeftCurly)?;
            parser.skip_eol();
            let types = parse_braced_types(parser)?;
            parser.skip_eol();
            parser.expect(TokenKind::RightCurly)?;
            parser.end_statement()?;

            return Ok(Statement::TypeDecl(TypeStatement {
                token,
                name,
                kind,
                types,
                attributes: vec![],
            }));
        }

        let (types, attributes) = parse_attributes(parser, &current.value, allow_positional)?;
        parser.end_statement()?;

        return Ok(Statement::TypeDecl(TypeStatement {
            token,
            name,
            kind,
            types,
            attributes,
        }));
    }

    // alias or list-of form
    let types = parse_type_list(parser)?;
    let kind = if types.len() == 1 && types[0].list {
        TypeKind::ListOf
    } else {
        TypeKind::Alias
    };

    parser.end_statement()?;

    Ok(Statement::TypeDecl(TypeStatement {
        token,
        name,
        kind,
        types,
        attributes: vec![],
    }))
}

pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Diagnostic> {
    let mut parameters: Vec<Parameter> = vec![];

    loop {
        parser.skip_eol();

        if parser.current_token_kind() == TokenKind::RightParen || !parser.has_tokens() {
            break;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        if parser.current_token_kind() == TokenKind::ThreeDot {
            let token = parser.advance();

            if parameters.iter().any(|p| p.variadic) {
                parser.diagnostics.add(Diagnostic::new(
                    DiagnosticKind::DuplicateVariadic,
                    Severity::Fatal,
                    token.position.clone(),
                ));
            }

            let mut types: Types = vec![];
            if parser.current_token_kind() == TokenKind::Colon {
                parser.advance();
                types = parse_type_list(parser)?;
            }

            parameters.push(Parameter {
                name: token.value.clone(),
                token,
                types,
                default: None,
                variadic: true,
            });
            continue;
        }

        let name_token = parser.expect_name()?;
        parser.expect(TokenKind::Colon)?;
        let types = parse_type_list(parser)?;

        let mut default = None;
        if parser.current_token_kind() == TokenKind::Assign && parser.current_token().value == "=" {
            parser.advance();
            default = Some(parse_expr(parser, BindingPower::Default)?);
        }

        parameters.push(Parameter {
            name: name_token.value.clone(),
            token: name_token,
            types,
            default,
            variadic: false,
        });
    }

    Ok(parameters)
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, Diagnostic> {
    let token = parser.expect(TokenKind::LeftCurly)?;
    let statements = parse_statements_until(parser, TokenKind::RightCurly);
    parser.expect(TokenKind::RightCurly)?;

    Ok(BlockStatement { token, statements })
}

fn parse_function_literal(parser: &mut Parser) -> Result<FunctionLiteral, Diagnostic> {
    let token = parser.advance(); // func

    // a parenthesised receiver makes the function a method
    let method = if parser.current_token_kind() == TokenKind::LeftParen {
        parser.advance();
        let receiver_token = parser.expect_name()?;
        parser.expect(TokenKind::Colon)?;

        let mut list = false;
        if parser.current_token_kind() == TokenKind::TypesList {
            parser.advance();
            list = true;
        }
        let type_token = parser.expect_name()?;
        parser.expect(TokenKind::RightParen)?;

        Some(Method {
            name: receiver_token.value.clone(),
            token: receiver_token,
            tipe: Type {
                name: type_token.value,
                list,
            },
        })
    } else {
        None
    };

    let name = parser.expect_name()?.value;

    parser.expect(TokenKind::LeftParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::RightParen)?;

    parser.expect(TokenKind::Colon)?;
    let return_types = parse_type_list(parser)?;

    let body = parse_block(parser)?;

    Ok(FunctionLiteral {
        token,
        name: Some(name),
        method,
        parameters,
        return_types,
        body,
    })
}

pub fn parse_function_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let literal = parse_function_literal(parser)?;
    parser.end_statement()?;
    Ok(Statement::Function(literal))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // for
    parser.expect(TokenKind::LeftParen)?;

    let let_token = parser.expect(TokenKind::Let)?;
    let name = parser.expect_name()?.value;
    parser.expect(TokenKind::Colon)?;
    let types = parse_type_list(parser)?;

    let variable = LetStatement {
        token: let_token,
        name,
        types,
        value: None,
    };

    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RightParen)?;

    let body = parse_block(parser)?;
    parser.end_statement()?;

    Ok(Statement::For(ForStatement {
        token,
        variable,
        iterable,
        body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // while
    parser.expect(TokenKind::LeftParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RightParen)?;
    let body = parse_block(parser)?;
    parser.end_statement()?;

    Ok(Statement::While(WhileStatement {
        token,
        condition,
        body,
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // repeat
    let body = parse_block(parser)?;
    parser.end_statement()?;

    Ok(Statement::Repeat(RepeatStatement { token, body }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance();
    parser.end_statement()?;
    Ok(Statement::Break(BreakStatement { token }))
}

pub fn parse_next_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance();
    parser.end_statement()?;
    Ok(Statement::Next(NextStatement { token }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance();

    let value = if matches!(
        parser.current_token_kind(),
        TokenKind::Eol | TokenKind::Eof | TokenKind::RightCurly
    ) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.end_statement()?;

    Ok(Statement::Return(ReturnStatement { token, value }))
}

pub fn parse_comment_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance();
    Ok(Statement::Comment(CommentStatement {
        value: token.value.clone(),
        token,
    }))
}

pub fn parse_special_comment_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // #' marker

    let mut value = String::new();
    if parser.current_token_kind() == TokenKind::SpecialComment {
        value = parser.advance().value;
    }

    Ok(Statement::Special(SpecialComment { token, value }))
}

fn decorator_error(token: &Token) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DecoratorTarget {
            decorator: token.value.clone(),
        },
        Severity::Fatal,
        token.position.clone(),
    )
}

pub fn parse_decorator_stmt(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let token = parser.advance(); // decorator name

    let mut arguments = vec![];
    if parser.current_token_kind() == TokenKind::LeftParen {
        parser.advance();
        while parser.current_token_kind() != TokenKind::RightParen && parser.has_tokens() {
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            arguments.push(parser.advance().value);
        }
        parser.expect(TokenKind::RightParen)?;
    }

    parser.end_statement()?;
    parser.skip_eol();

    match token.value.as_str() {
        "class" => {
            if parser.current_token_kind() != TokenKind::TypeDecl {
                return Err(decorator_error(&token));
            }
            match parse_type_stmt(parser)? {
                Statement::TypeDecl(tipe) => Ok(Statement::DecoratorClass(DecoratorClass {
                    token,
                    classes: arguments,
                    tipe: Box::new(tipe),
                })),
                _ => Err(decorator_error(&token)),
            }
        }
        "generic" => {
            if parser.current_token_kind() != TokenKind::Function {
                return Err(decorator_error(&token));
            }
            let func = parse_function_literal(parser)?;
            parser.end_statement()?;
            Ok(Statement::DecoratorGeneric(DecoratorGeneric {
                name: arguments.into_iter().next().unwrap_or_default(),
                token,
                func: Box::new(func),
            }))
        }
        "default" => {
            if parser.current_token_kind() != TokenKind::Function {
                return Err(decorator_error(&token));
            }
            let func = parse_function_literal(parser)?;
            parser.end_statement()?;
            Ok(Statement::DecoratorDefault(DecoratorDefault {
                token,
                arguments,
                func: Box::new(func),
            }))
        }
        _ => Err(decorator_error(&token)),
    }
}
