//! Unit tests for the environment module.

use crate::ast::expressions::FunctionLiteral;
use crate::ast::statements::BlockStatement;
use crate::ast::types::{Type, TypeKind};
use crate::lexer::tokens::Token;

use super::environment::{Environment, Type as TypeEntry, Variable};

fn variable(name: &str, used: bool) -> Variable {
    let mut token = Token::null();
    token.value = name.to_string();
    Variable {
        token,
        types: vec![Type::new("int")],
        is_const: false,
        can_miss: false,
        used,
    }
}

fn function_literal(name: &str) -> FunctionLiteral {
    FunctionLiteral {
        token: Token::null(),
        name: Some(name.to_string()),
        method: None,
        parameters: vec![],
        return_types: vec![Type::new("int")],
        body: BlockStatement {
            token: Token::null(),
            statements: vec![],
        },
    }
}

#[test]
fn test_base_types_are_preinstalled() {
    let env = Environment::new();

    for name in ["int", "num", "char", "bool", "null", "na", "factor", "list", "object", "dataframe"] {
        assert!(env.get_type(name, false).is_some(), "missing base type {}", name);
    }
}

#[test]
fn test_type_key_mangling() {
    let mut env = Environment::new();

    // `int` and `[]int` are distinct entries sharing a surface name
    assert!(env.get_type("int", false).is_some());
    assert!(env.get_type("int", true).is_none());

    env.set_type(
        "int",
        true,
        TypeEntry {
            token: Token::null(),
            kind: TypeKind::ListOf,
            types: vec![Type::list("int")],
            attributes: vec![],
            used: false,
        },
    );

    assert!(env.get_type("int", true).is_some());
    assert_eq!(env.get_type("int", false).unwrap().kind, TypeKind::Alias);
}

#[test]
fn test_variable_scoping() {
    let mut env = Environment::new();
    env.set_variable("x", variable("x", false));

    env.enclose(None);
    assert!(env.get_variable("x", true).is_some());
    assert!(env.get_variable("x", false).is_none());

    // shadowing in the inner frame
    env.set_variable("x", variable("x", true));
    assert!(env.get_variable("x", false).is_some());

    env.open();
    assert!(!env.get_variable("x", false).unwrap().used);
}

#[test]
fn test_mark_used_climbs() {
    let mut env = Environment::new();
    env.set_variable("x", variable("x", false));

    env.enclose(None);
    env.set_variable_used("x");
    env.open();

    assert!(env.get_variable("x", false).unwrap().used);
}

#[test]
fn test_unused_variables() {
    let mut env = Environment::new();
    env.enclose(None);
    env.set_variable("used", variable("used", true));
    env.set_variable("unused", variable("unused", false));
    env.set_variable("...", variable("...", false));

    let unused = env.unused_variables();
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].token.value, "unused");
}

#[test]
fn test_enclosing_function() {
    let mut env = Environment::new();
    assert!(env.enclosing_function().is_none());

    env.enclose(Some(function_literal("f")));
    env.enclose(None); // a nested if-scope, say

    let function = env.enclosing_function().expect("function in scope chain");
    assert_eq!(function.name.as_deref(), Some("f"));

    env.open();
    env.open();
    assert!(env.enclosing_function().is_none());
}

#[test]
fn test_scopes_are_lifo() {
    let mut env = Environment::new();
    assert_eq!(env.depth(), 1);

    env.enclose(None);
    env.enclose(None);
    assert_eq!(env.depth(), 3);

    env.open();
    env.open();
    assert_eq!(env.depth(), 1);

    // the root frame is never popped
    env.open();
    assert_eq!(env.depth(), 1);
}
