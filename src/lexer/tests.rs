//! Unit tests for the lexer module.
//!
//! Covers tokenization of keywords, identifiers, numeric literals,
//! strings with escape sequences, operators, type annotations, comments
//! and error cases.

use super::lexer::tokenize;
use super::tokens::TokenKind;

#[test]
fn test_tokenize_keywords() {
    let source = "let const func if else while for repeat break next in return type";
    let (tokens, diagnostics) = tokenize(source, Some("test.vp".to_string()));

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Const);
    assert_eq!(tokens[2].kind, TokenKind::Function);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::While);
    assert_eq!(tokens[6].kind, TokenKind::For);
    assert_eq!(tokens[7].kind, TokenKind::Repeat);
    assert_eq!(tokens[8].kind, TokenKind::Break);
    assert_eq!(tokens[9].kind, TokenKind::Next);
    assert_eq!(tokens[10].kind, TokenKind::In);
    assert_eq!(tokens[11].kind, TokenKind::Return);
    assert_eq!(tokens[12].kind, TokenKind::TypeDecl);
    assert_eq!(tokens[13].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_constants() {
    let source = "NA NULL TRUE FALSE Inf NaN NA_integer_ NA_character_ NA_real_";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Na);
    assert_eq!(tokens[1].kind, TokenKind::Null);
    assert_eq!(tokens[2].kind, TokenKind::Bool);
    assert_eq!(tokens[2].value, "TRUE");
    assert_eq!(tokens[3].kind, TokenKind::Bool);
    assert_eq!(tokens[3].value, "FALSE");
    assert_eq!(tokens[4].kind, TokenKind::Inf);
    assert_eq!(tokens[5].kind, TokenKind::Nan);
    assert_eq!(tokens[6].kind, TokenKind::NaInteger);
    assert_eq!(tokens[7].kind, TokenKind::NaCharacter);
    assert_eq!(tokens[8].kind, TokenKind::NaReal);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar2 baz_qux x.y";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].value, "bar2");
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[2].value, "baz_qux");
    assert_eq!(tokens[3].kind, TokenKind::Ident);
    assert_eq!(tokens[3].value, "x.y");
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_native_interfaces() {
    let source = ".Call .C .Fortran";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::CallNative);
    assert_eq!(tokens[1].kind, TokenKind::CNative);
    assert_eq!(tokens[2].kind, TokenKind::FortranNative);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 1e10 100.5";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "1e10");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "100.5");
}

#[test]
fn test_tokenize_range_after_integer() {
    // never a float: digits followed by `..` split into integer and range
    let source = "1..10";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[1].kind, TokenKind::Range);
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "10");
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" 'world'"#;
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::DoubleQuote);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "hello");
    assert_eq!(tokens[2].kind, TokenKind::DoubleQuote);
    assert_eq!(tokens[3].kind, TokenKind::SingleQuote);
    assert_eq!(tokens[4].kind, TokenKind::String);
    assert_eq!(tokens[4].value, "world");
    assert_eq!(tokens[5].kind, TokenKind::SingleQuote);
}

#[test]
fn test_tokenize_escaped_quote_in_string() {
    // escapes are preserved in the token value
    let source = r#""quote\"test""#;
    let (tokens, diagnostics) = tokenize(source, None);

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, r#"quote\"test"#);
    assert_eq!(tokens[2].kind, TokenKind::DoubleQuote);
}

#[test]
fn test_tokenize_string_of_only_escaped_quotes() {
    let source = r#""\"\"""#;
    let (tokens, diagnostics) = tokenize(source, None);

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, r#"\"\""#);
}

#[test]
fn test_tokenize_unterminated_string() {
    let source = r#""never closed"#;
    let (tokens, diagnostics) = tokenize(source, None);

    assert!(diagnostics.has_error());
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / ^ %% == != <= >= <- |> & | $ ?";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Minus);
    assert_eq!(tokens[2].kind, TokenKind::Multiply);
    assert_eq!(tokens[3].kind, TokenKind::Divide);
    assert_eq!(tokens[4].kind, TokenKind::Power);
    assert_eq!(tokens[5].kind, TokenKind::Modulus);
    assert_eq!(tokens[6].kind, TokenKind::DoubleEqual);
    assert_eq!(tokens[7].kind, TokenKind::NotEqual);
    assert_eq!(tokens[8].kind, TokenKind::LessOrEqual);
    assert_eq!(tokens[9].kind, TokenKind::GreaterOrEqual);
    assert_eq!(tokens[10].kind, TokenKind::Assign);
    assert_eq!(tokens[10].value, "<-");
    assert_eq!(tokens[11].kind, TokenKind::Pipe);
    assert_eq!(tokens[12].kind, TokenKind::And);
    assert_eq!(tokens[13].kind, TokenKind::Or);
    assert_eq!(tokens[14].kind, TokenKind::Dollar);
    assert_eq!(tokens[15].kind, TokenKind::Question);
}

#[test]
fn test_tokenize_three_dot_before_range() {
    let source = "... ..";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::ThreeDot);
    assert_eq!(tokens[1].kind, TokenKind::Range);
}

#[test]
fn test_tokenize_user_infix() {
    let source = "a %in% b";
    let (tokens, diagnostics) = tokenize(source, None);

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Infix);
    assert_eq!(tokens[1].value, "%in%");
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn test_tokenize_unterminated_infix() {
    let source = "a %in b";
    let (_, diagnostics) = tokenize(source, None);

    assert!(diagnostics.has_error());
}

#[test]
fn test_tokenize_namespace() {
    let source = "pkg::exported pkg:::internal";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Namespace);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[3].kind, TokenKind::Ident);
    assert_eq!(tokens[4].kind, TokenKind::NamespaceInternal);
    assert_eq!(tokens[5].kind, TokenKind::Ident);
}

#[test]
fn test_tokenize_type_annotation() {
    let source = "let x: int | na = 1";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[2].kind, TokenKind::Colon);
    assert_eq!(tokens[3].kind, TokenKind::Types);
    assert_eq!(tokens[3].value, "int");
    assert_eq!(tokens[4].kind, TokenKind::TypesOr);
    assert_eq!(tokens[5].kind, TokenKind::Types);
    assert_eq!(tokens[5].value, "na");
    assert_eq!(tokens[6].kind, TokenKind::Assign);
    assert_eq!(tokens[7].kind, TokenKind::Integer);
}

#[test]
fn test_tokenize_list_type_annotation() {
    let source = "let x: []int = (1, 2)";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[3].kind, TokenKind::TypesList);
    assert_eq!(tokens[4].kind, TokenKind::Types);
    assert_eq!(tokens[4].value, "int");
    assert_eq!(tokens[5].kind, TokenKind::Assign);
    assert_eq!(tokens[6].kind, TokenKind::LeftParen);
}

#[test]
fn test_tokenize_user_type_annotation() {
    let source = "func (p: person) name(): char { }";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[1].kind, TokenKind::LeftParen);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[3].kind, TokenKind::Colon);
    assert_eq!(tokens[4].kind, TokenKind::Types);
    assert_eq!(tokens[4].value, "person");
    assert_eq!(tokens[5].kind, TokenKind::RightParen);
}

#[test]
fn test_tokenize_parens_and_squares() {
    let source = "( ) { } [ ] [[ ]]";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::LeftParen);
    assert_eq!(tokens[1].kind, TokenKind::RightParen);
    assert_eq!(tokens[2].kind, TokenKind::LeftCurly);
    assert_eq!(tokens[3].kind, TokenKind::RightCurly);
    assert_eq!(tokens[4].kind, TokenKind::LeftSquare);
    assert_eq!(tokens[5].kind, TokenKind::RightSquare);
    assert_eq!(tokens[6].kind, TokenKind::DoubleLeftSquare);
    assert_eq!(tokens[7].kind, TokenKind::DoubleRightSquare);
}

#[test]
fn test_tokenize_end_of_line() {
    let source = "a\nb;c";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Eol);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[3].kind, TokenKind::Eol);
    assert_eq!(tokens[4].kind, TokenKind::Ident);
}

#[test]
fn test_tokenize_comments() {
    let source = "# plain comment\n#' doc comment";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].value, "# plain comment");
    assert_eq!(tokens[1].kind, TokenKind::Eol);
    assert_eq!(tokens[2].kind, TokenKind::SpecialComment);
    assert_eq!(tokens[2].value, "#'");
    assert_eq!(tokens[3].kind, TokenKind::SpecialComment);
    assert_eq!(tokens[3].value, "doc comment");
}

#[test]
fn test_tokenize_decorator() {
    let source = "@class(tibble, df)";
    let (tokens, _) = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Decorator);
    assert_eq!(tokens[0].value, "class");
    assert_eq!(tokens[1].kind, TokenKind::LeftParen);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[2].value, "tibble");
}

#[test]
fn test_tokenize_empty_input() {
    let (tokens, diagnostics) = tokenize("", None);

    assert!(diagnostics.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_positions() {
    let source = "let x\nlet y";
    let (tokens, _) = tokenize(source, Some("pos.vp".to_string()));

    assert_eq!(tokens[0].position.line, 1);
    assert_eq!(tokens[0].position.column, 1);
    assert_eq!(tokens[1].position.line, 1);
    assert_eq!(tokens[1].position.column, 5);
    // past the end of line 1
    assert_eq!(tokens[3].position.line, 2);
    assert_eq!(tokens[3].position.column, 1);
    assert_eq!(*tokens[0].position.file, "pos.vp");
}

#[test]
fn test_tokenize_stray_rune() {
    let source = "let ~ x";
    let (tokens, diagnostics) = tokenize(source, None);

    assert!(diagnostics.has_error());
    // lexing continues past the stray rune
    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].value, "x");
}

#[test]
fn test_relex_token_values_round_trips() {
    let source = "let x: int = 1 + 2";
    let (tokens, _) = tokenize(source, None);

    let rebuilt = tokens
        .iter()
        .take(tokens.len() - 1)
        .map(|t| t.value.clone())
        .collect::<Vec<_>>()
        .join(" ");
    let (again, _) = tokenize(&rebuilt, None);

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    let again_kinds: Vec<_> = again.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, again_kinds);
}
