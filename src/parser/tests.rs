//! Unit tests for the parser module.
//!
//! Covers declarations, type declarations in every form, functions and
//! methods, control flow, decorators, expression precedence and
//! statement-level error recovery.

use crate::ast::ast::{Expression, Program, Statement};
use crate::ast::types::TypeKind;
use crate::diagnostics::diagnostics::Diagnostics;
use crate::lexer::lexer::tokenize;

use super::parser::parse;

fn parse_code(source: &str) -> (Program, Diagnostics) {
    let (tokens, diagnostics) = tokenize(source, Some("test.vp".to_string()));
    assert!(
        !diagnostics.has_error(),
        "lexer failed: {}",
        diagnostics.render()
    );
    parse(tokens)
}

fn parse_ok(source: &str) -> Program {
    let (program, diagnostics) = parse_code(source);
    assert!(
        !diagnostics.has_error(),
        "parser failed: {}",
        diagnostics.render()
    );
    program
}

#[test]
fn test_parse_let_declaration() {
    let program = parse_ok("let x: int = 42\n");

    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Let(node) => {
            assert_eq!(node.name, "x");
            assert_eq!(node.types.len(), 1);
            assert_eq!(node.types[0].name, "int");
            assert!(!node.types[0].list);
            assert!(matches!(node.value, Some(Expression::Integer(_))));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_without_value() {
    let program = parse_ok("let x: int\n");

    match &program.statements[0] {
        Statement::Let(node) => assert!(node.value.is_none()),
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_requires_annotation() {
    let (_, diagnostics) = parse_code("let x = 1\n");
    assert!(diagnostics.has_error());
}

#[test]
fn test_parse_const_requires_value() {
    let (_, diagnostics) = parse_code("const x: int\n");
    assert!(diagnostics.has_error());
}

#[test]
fn test_parse_union_types() {
    let program = parse_ok("let x: int | na = 1\n");

    match &program.statements[0] {
        Statement::Let(node) => {
            assert_eq!(node.types.len(), 2);
            assert_eq!(node.types[0].name, "int");
            assert_eq!(node.types[1].name, "na");
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_list_type() {
    let program = parse_ok("let x: []char = (\"a\", \"b\")\n");

    match &program.statements[0] {
        Statement::Let(node) => {
            assert_eq!(node.types.len(), 1);
            assert!(node.types[0].list);
            assert_eq!(node.types[0].name, "char");
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_alias() {
    let program = parse_ok("type id: int | na\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.name, "id");
            assert_eq!(node.kind, TypeKind::Alias);
            assert_eq!(node.types.len(), 2);
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_list_of() {
    let program = parse_ok("type ids: []int\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.kind, TypeKind::ListOf);
            assert!(node.types[0].list);
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_struct() {
    let program = parse_ok("type person: struct {\n  int,\n  name: char\n}\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.kind, TypeKind::Struct);
            // the single unnamed positional entry
            assert_eq!(node.types.len(), 1);
            assert_eq!(node.types[0].name, "int");
            assert_eq!(node.attributes.len(), 1);
            assert_eq!(node.attributes[0].name, "name");
            assert_eq!(node.attributes[0].types[0].name, "char");
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_object() {
    let program = parse_ok("type config: object {\n  name: char,\n  count: int\n}\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.kind, TypeKind::Object);
            assert_eq!(node.attributes.len(), 2);
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_object_rejects_unnamed_fields() {
    let (_, diagnostics) = parse_code("type config: object {\n  int\n}\n");
    assert!(diagnostics.has_error());
}

#[test]
fn test_parse_type_list_form() {
    let program = parse_ok("type mixed: list { int | char }\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.kind, TypeKind::List);
            assert_eq!(node.types.len(), 2);
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_type_dataframe() {
    let program = parse_ok("type persons: dataframe {\n  name: char,\n  age: int\n}\n");

    match &program.statements[0] {
        Statement::TypeDecl(node) => {
            assert_eq!(node.kind, TypeKind::Dataframe);
            assert_eq!(node.attributes.len(), 2);
        }
        other => panic!("expected type statement, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok("func add(x: int, y: int = 2): int {\n  return x + y\n}\n");

    match &program.statements[0] {
        Statement::Function(node) => {
            assert_eq!(node.name.as_deref(), Some("add"));
            assert!(node.method.is_none());
            assert_eq!(node.parameters.len(), 2);
            assert_eq!(node.parameters[0].name, "x");
            assert!(node.parameters[0].default.is_none());
            assert!(node.parameters[1].default.is_some());
            assert_eq!(node.return_types[0].name, "int");
            assert_eq!(node.body.statements.len(), 1);
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_parse_method_declaration() {
    let program = parse_ok("func (p: person) set_name(name: char): person {\n  return p\n}\n");

    match &program.statements[0] {
        Statement::Function(node) => {
            let method = node.method.as_ref().expect("expected a receiver");
            assert_eq!(method.name, "p");
            assert_eq!(method.tipe.name, "person");
            assert_eq!(node.name.as_deref(), Some("set_name"));
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_parse_variadic_parameter() {
    let program = parse_ok("func lg(...: char): null {\n  return NULL\n}\n");

    match &program.statements[0] {
        Statement::Function(node) => {
            assert_eq!(node.parameters.len(), 1);
            assert!(node.parameters[0].variadic);
            assert_eq!(node.parameters[0].name, "...");
            assert_eq!(node.parameters[0].types[0].name, "char");
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_parse_duplicate_variadic() {
    let (_, diagnostics) = parse_code("func f(...: char, ...: int): null {\n  return NULL\n}\n");
    assert!(diagnostics.has_error());
}

#[test]
fn test_parse_anonymous_function() {
    let program = parse_ok("let f: any = (x: int): int => {\n  return x\n}\n");

    match &program.statements[0] {
        Statement::Let(node) => match node.value.as_ref() {
            Some(Expression::Function(func)) => {
                assert!(func.name.is_none());
                assert_eq!(func.parameters.len(), 1);
                assert_eq!(func.return_types[0].name, "int");
            }
            other => panic!("expected anonymous function, got {:?}", other),
        },
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else() {
    let program = parse_ok("if (x > 1) {\n  y = 1\n} else {\n  y = 2\n}\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::If(cond) => {
                assert!(cond.alternative.is_some());
            }
            other => panic!("expected if expression, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_for_loop() {
    let program = parse_ok("for (let i: int in 1..10) {\n  print(i)\n}\n");

    match &program.statements[0] {
        Statement::For(node) => {
            assert_eq!(node.variable.name, "i");
            assert_eq!(node.variable.types[0].name, "int");
            assert!(matches!(node.iterable, Expression::Infix(_)));
        }
        other => panic!("expected for statement, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let program = parse_ok("while (x < 10) {\n  x = x + 1\n}\n");
    assert!(matches!(program.statements[0], Statement::While(_)));
}

#[test]
fn test_parse_repeat_break_next() {
    let program = parse_ok("repeat {\n  break\n  next\n}\n");

    match &program.statements[0] {
        Statement::Repeat(node) => {
            assert_eq!(node.body.statements.len(), 2);
            assert!(matches!(node.body.statements[0], Statement::Break(_)));
            assert!(matches!(node.body.statements[1], Statement::Next(_)));
        }
        other => panic!("expected repeat statement, got {:?}", other),
    }
}

#[test]
fn test_parse_call_arguments() {
    let program = parse_ok("foo(1, x = 2)\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Call(call) => {
                assert_eq!(call.name, "foo");
                assert_eq!(call.arguments.len(), 2);
                assert!(call.arguments[0].name.is_none());
                assert_eq!(call.arguments[1].name.as_deref(), Some("x"));
            }
            other => panic!("expected call, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    // multiplication binds tighter than addition
    let program = parse_ok("a = 1 + 2 * 3\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Infix(assign) => {
                assert_eq!(assign.operator, "=");
                match assign.right.as_deref() {
                    Some(Expression::Infix(add)) => {
                        assert_eq!(add.operator, "+");
                        match add.right.as_deref() {
                            Some(Expression::Infix(mul)) => assert_eq!(mul.operator, "*"),
                            other => panic!("expected multiplication, got {:?}", other),
                        }
                    }
                    other => panic!("expected addition, got {:?}", other),
                }
            }
            other => panic!("expected assignment, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_pipe() {
    let program = parse_ok("x |> print()\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Infix(pipe) => {
                assert_eq!(pipe.operator, "|>");
                assert!(matches!(pipe.right.as_deref(), Some(Expression::Call(_))));
            }
            other => panic!("expected pipe, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_square_indexing() {
    let program = parse_ok("x[1]\nx[[2]]\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Square(square) => assert!(!square.double),
            other => panic!("expected square, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
    match &program.statements[1] {
        Statement::Expression(node) => match &node.expression {
            Expression::Square(square) => assert!(square.double),
            other => panic!("expected square, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_vector_literal() {
    let program = parse_ok("let v: int = (1, 2, 3)\n");

    match &program.statements[0] {
        Statement::Let(node) => match node.value.as_ref() {
            Some(Expression::Vector(vector)) => assert_eq!(vector.values.len(), 3),
            other => panic!("expected vector literal, got {:?}", other),
        },
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_grouping_is_not_a_vector() {
    let program = parse_ok("let x: int = (1 + 2)\n");

    match &program.statements[0] {
        Statement::Let(node) => {
            assert!(matches!(node.value, Some(Expression::Infix(_))));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_decorator_class() {
    let program = parse_ok("@class(tibble, df)\ntype person: dataframe {\n  name: char\n}\n");

    match &program.statements[0] {
        Statement::DecoratorClass(node) => {
            assert_eq!(node.classes, vec!["tibble", "df"]);
            assert_eq!(node.tipe.name, "person");
            assert_eq!(node.tipe.kind, TypeKind::Dataframe);
        }
        other => panic!("expected class decorator, got {:?}", other),
    }
}

#[test]
fn test_parse_decorator_generic() {
    let program = parse_ok("@generic(set_name)\nfunc (x: any) set_name(name: char): any {\n  return x\n}\n");

    match &program.statements[0] {
        Statement::DecoratorGeneric(node) => {
            assert_eq!(node.name, "set_name");
            assert!(node.func.method.is_some());
        }
        other => panic!("expected generic decorator, got {:?}", other),
    }
}

#[test]
fn test_parse_decorator_requires_declaration() {
    let (_, diagnostics) = parse_code("@generic(foo)\nlet x: int = 1\n");
    assert!(diagnostics.has_error());
}

#[test]
fn test_parse_comments() {
    let program = parse_ok("# a comment\n#' a doc line\nlet x: int = 1\n");

    assert_eq!(program.statements.len(), 3);
    assert!(matches!(program.statements[0], Statement::Comment(_)));
    assert!(matches!(program.statements[1], Statement::Special(_)));
    assert!(matches!(program.statements[2], Statement::Let(_)));
}

#[test]
fn test_parse_namespace_call() {
    let program = parse_ok("pkg::head(1)\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Call(call) => {
                assert!(matches!(call.function.as_ref(), Expression::Infix(_)));
            }
            other => panic!("expected call, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_recovery_continues_after_error() {
    let (program, diagnostics) = parse_code("let 1: int = 2\nlet y: int = 3\n");

    assert!(diagnostics.has_error());
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Let(node) => assert_eq!(node.name, "y"),
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_missing_rhs_is_kept_for_walker() {
    // the parser records the hole, the walker reports it
    let program = parse_ok("x =\n");

    match &program.statements[0] {
        Statement::Expression(node) => match &node.expression {
            Expression::Infix(infix) => {
                assert_eq!(infix.operator, "=");
                assert!(infix.right.is_none());
            }
            other => panic!("expected infix, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_return_without_value() {
    let program = parse_ok("func f(): null {\n  return\n}\n");

    match &program.statements[0] {
        Statement::Function(node) => match &node.body.statements[0] {
            Statement::Return(ret) => assert!(ret.value.is_none()),
            other => panic!("expected return, got {:?}", other),
        },
        other => panic!("expected function, got {:?}", other),
    }
}
