use crate::ast::ast::{Expression, Program, Statement};
use crate::ast::expressions::{
    CallExpression, FunctionLiteral, Identifier, IfExpression, InfixExpression, Parameter,
    SquareExpression, VectorLiteral,
};
use crate::ast::statements::{
    BlockStatement, ConstStatement, DecoratorClass, ForStatement, LetStatement, RepeatStatement,
    ReturnStatement, TypeStatement, WhileStatement,
};
use crate::ast::types::{types_string, Type, TypeKind, Types};
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
use crate::diagnostics::suggest::did_you_mean;
use crate::environment::environment;
use crate::environment::environment::Environment;
use crate::lexer::tokens::Token;
use crate::r::{NoProbe, Probe};

use std::collections::HashSet;

/// Walks a parsed program: declarations populate the environment, every
/// expression is assigned a type expression, and rule violations are
/// reported as severity-tagged diagnostics.
pub struct Walker {
    env: Environment,
    diagnostics: Diagnostics,
    probe: Box<dyn Probe>,
    in_call: usize,
}

impl Walker {
    pub fn new() -> Self {
        Walker::with_probe(Box::new(NoProbe))
    }

    pub fn with_probe(probe: Box<dyn Probe>) -> Self {
        Walker {
            env: Environment::new(),
            diagnostics: Diagnostics::new(),
            probe,
            in_call: 0,
        }
    }

    pub fn run(&mut self, program: &Program) {
        for statement in &program.statements {
            self.walk_statement(statement);
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }

    /// The populated root environment, for downstream emitters.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    fn add_fatal(&mut self, kind: DiagnosticKind, token: &Token) {
        self.diagnostics.add_fatal(kind, token.position.clone());
    }

    fn add_warn(&mut self, kind: DiagnosticKind, token: &Token) {
        self.diagnostics.add_warn(kind, token.position.clone());
    }

    fn add_info(&mut self, kind: DiagnosticKind, token: &Token) {
        self.diagnostics.add_info(kind, token.position.clone());
    }

    fn add_hint(&mut self, kind: DiagnosticKind, token: &Token) {
        self.diagnostics.add_hint(kind, token.position.clone());
    }

    pub fn walk_statement<'a>(
        &mut self,
        statement: &'a Statement,
    ) -> (Types, Option<&'a Expression>) {
        match statement {
            Statement::Let(node) => self.walk_let_statement(node),
            Statement::Const(node) => self.walk_const_statement(node),
            Statement::TypeDecl(node) => {
                self.walk_type_statement(node);
                (vec![], None)
            }
            Statement::Return(node) => self.walk_return_statement(node),
            Statement::Block(node) => {
                self.walk_block(node);
                (vec![], None)
            }
            Statement::Function(node) => {
                self.walk_function_literal(node);
                (vec![], None)
            }
            Statement::For(node) => {
                self.walk_for(node);
                (vec![], None)
            }
            Statement::While(node) => {
                self.walk_while(node);
                (vec![], None)
            }
            Statement::Repeat(node) => {
                self.walk_repeat(node);
                (vec![], None)
            }
            Statement::Break(_) | Statement::Next(_) => (vec![], None),
            Statement::Comment(_) | Statement::Special(_) => (vec![], None),
            Statement::DecoratorClass(node) => {
                self.walk_decorator_class(node);
                (vec![], None)
            }
            Statement::DecoratorGeneric(node) => {
                self.walk_function_literal(&node.func);
                (vec![], None)
            }
            Statement::DecoratorDefault(node) => {
                self.walk_function_literal(&node.func);
                (vec![], None)
            }
            Statement::Expression(node) => {
                let (types, inner) = self.walk_expression(&node.expression);
                (types, Some(inner))
            }
        }
    }

    pub fn walk_expression<'a>(&mut self, expression: &'a Expression) -> (Types, &'a Expression) {
        match expression {
            Expression::Identifier(node) => self.walk_identifier(node, expression),
            Expression::Integer(_) => (vec![Type::new("int")], expression),
            Expression::Float(_) => (vec![Type::new("num")], expression),
            Expression::Str(_) => (vec![Type::new("char")], expression),
            Expression::Boolean(_) => (vec![Type::new("bool")], expression),
            Expression::Null(_) => (vec![Type::new("null")], expression),
            Expression::Keyword(node) => (node.types.clone(), expression),
            Expression::Vector(node) => self.walk_vector_literal(node, expression),
            Expression::Prefix(node) => {
                let (types, _) = self.walk_expression(&node.right);
                (types, expression)
            }
            Expression::Infix(node) => self.walk_infix_expression(node, expression),
            Expression::If(node) => self.walk_if_expression(node, expression),
            Expression::Function(node) => {
                self.walk_function_literal(node);
                (node.return_types.clone(), expression)
            }
            Expression::Call(node) => self.walk_call_expression(node, expression),
            Expression::Square(node) => self.walk_square(node, expression),
        }
    }

    fn walk_block(&mut self, block: &BlockStatement) {
        for statement in &block.statements {
            self.walk_statement(statement);
        }
    }

    fn walk_let_statement<'a>(
        &mut self,
        node: &'a LetStatement,
    ) -> (Types, Option<&'a Expression>) {
        if self.env.get_variable(&node.name, false).is_some() {
            self.add_fatal(
                DiagnosticKind::AlreadyDeclared {
                    name: node.name.clone(),
                },
                &node.token,
            );

            if let Some(value) = &node.value {
                let (types, inner) = self.walk_expression(value);
                return (types, Some(inner));
            }
            return (vec![], None);
        }

        self.env.set_variable(
            &node.name,
            environment::Variable {
                token: node.token.clone(),
                types: node.types.clone(),
                is_const: false,
                can_miss: false,
                used: false,
            },
        );

        let value = match &node.value {
            Some(value) => value,
            None => return (vec![], None),
        };

        let (right_types, inner) = self.walk_expression(value);

        if !self.types_valid(&node.types, &right_types) {
            self.add_fatal(
                DiagnosticKind::DeclarationExpects {
                    name: node.name.clone(),
                    expected: types_string(&node.types),
                    got: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, Some(inner))
    }

    fn walk_const_statement<'a>(
        &mut self,
        node: &'a ConstStatement,
    ) -> (Types, Option<&'a Expression>) {
        if self.env.get_variable(&node.name, false).is_some() {
            self.add_fatal(
                DiagnosticKind::AlreadyDeclared {
                    name: node.name.clone(),
                },
                &node.token,
            );

            if let Some(value) = &node.value {
                let (types, inner) = self.walk_expression(value);
                return (types, Some(inner));
            }
            return (vec![], None);
        }

        if node.types.len() > 1 {
            self.add_fatal(DiagnosticKind::ConstantSingleType, &node.token);
        }

        self.env.set_variable(
            &node.name,
            environment::Variable {
                token: node.token.clone(),
                types: node.types.clone(),
                is_const: true,
                can_miss: false,
                used: false,
            },
        );

        let value = match &node.value {
            Some(value) => value,
            None => return (vec![], None),
        };

        let (right_types, inner) = self.walk_expression(value);

        if !self.types_valid(&node.types, &right_types) {
            self.add_fatal(
                DiagnosticKind::DeclarationExpects {
                    name: node.name.clone(),
                    expected: types_string(&node.types),
                    got: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, Some(inner))
    }

    fn walk_identifier<'a>(
        &mut self,
        node: &Identifier,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        if let Some(variable) = self.env.get_variable(&node.value, true) {
            let types = variable.types.clone();
            let can_miss = variable.can_miss;

            if can_miss {
                self.add_warn(
                    DiagnosticKind::MightBeMissing {
                        name: node.value.clone(),
                    },
                    &node.token,
                );
            }

            self.env.set_variable_used(&node.value);
            return (types, expression);
        }

        if let Some(function) = self.env.get_function(&node.value, true) {
            return (function.value.return_types.clone(), expression);
        }

        if self.env.get_type(&node.value, false).is_some() {
            self.env.set_type_used(&node.value, false);
        }

        (node.types.clone(), expression)
    }

    fn walk_vector_literal<'a>(
        &mut self,
        node: &VectorLiteral,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let mut types: Types = vec![];

        for value in &node.values {
            let (t, _) = self.walk_expression(value);
            types.extend(t);
        }

        if !all_types_identical(&types) {
            self.add_fatal(
                DiagnosticKind::VectorMixedTypes {
                    types: types_string(&types),
                },
                &node.token,
            );
        }

        (types, expression)
    }

    fn walk_if_expression<'a>(
        &mut self,
        node: &IfExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        self.walk_expression(&node.condition);

        self.env.enclose(None);
        self.walk_block(&node.consequence);
        self.env.open();

        if let Some(alternative) = &node.alternative {
            self.env.enclose(None);
            self.walk_block(alternative);
            self.env.open();
        }

        (vec![], expression)
    }

    fn walk_infix_expression<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        match node.operator.as_str() {
            "=" => self.walk_infix_equal(node, expression),
            "<-" => self.walk_infix_equal_parent(node, expression),
            "+" | "-" | "*" | "/" | "^" => self.walk_infix_math(node, expression),
            "==" | "!=" | "<" | ">" | "<=" | ">=" => self.walk_infix_comparison(node, expression),
            "::" | ":::" => self.walk_infix_namespace(node, expression),
            "$" => self.walk_infix_dollar(node, expression),
            "|>" => self.walk_infix_pipe(node, expression),
            ".." => self.walk_infix_range(node, expression),
            _ => self.walk_infix_default(node, expression),
        }
    }

    /// `=` is a binding, not an rvalue: the target is inspected
    /// structurally and only the right side is walked.
    fn walk_infix_equal<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let mut left_types: Types = vec![];

        match node.left.as_ref() {
            Expression::Identifier(ident) => {
                match self.env.get_variable(&ident.value, true) {
                    Some(variable) => {
                        left_types = variable.types.clone();
                        let is_const = variable.is_const;
                        self.env.set_variable_used(&ident.value);

                        if is_const {
                            self.add_fatal(
                                DiagnosticKind::ConstantAssign {
                                    name: ident.value.clone(),
                                },
                                &ident.token,
                            );
                        }
                    }
                    None if self.in_call == 0 => {
                        let tip = did_you_mean(&ident.value, self.env.visible_names());
                        self.diagnostics.add(
                            Diagnostic::new(
                                DiagnosticKind::DoesNotExist {
                                    name: ident.value.clone(),
                                },
                                Severity::Fatal,
                                ident.token.position.clone(),
                            )
                            .with_tip(tip),
                        );
                    }
                    None => {
                        // a named argument: that parameter was supplied
                        self.env.set_variable_not_missing(&ident.value);
                    }
                }
            }
            other => {
                let (types, _) = self.walk_expression(other);
                left_types = types;
            }
        }

        let right = match &node.right {
            Some(right) => right,
            None => {
                self.add_fatal(
                    DiagnosticKind::MissingRightHandSide {
                        operator: node.operator.clone(),
                    },
                    &node.token,
                );
                return (left_types, expression);
            }
        };

        let (right_types, inner) = self.walk_expression(right);

        if !self.types_valid(&left_types, &right_types) {
            self.add_fatal(
                DiagnosticKind::AssignmentExpects {
                    expected: types_string(&left_types),
                    got: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, inner)
    }

    /// `<-` assigns into the host language's scope and may create names.
    fn walk_infix_equal_parent<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, _) = self.walk_expression(&node.left);

        if let Some(right) = &node.right {
            self.walk_expression(right);
        }

        (left_types, expression)
    }

    fn walk_infix_math<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, _) = self.walk_expression(&node.left);

        if !valid_math_types(&left_types) {
            self.add_fatal(
                DiagnosticKind::MathInvalid {
                    left: types_string(&left_types),
                    operator: node.operator.clone(),
                    right: types_string(&left_types),
                },
                &node.token,
            );
        }

        let right = match &node.right {
            Some(right) => right,
            None => return (left_types, expression),
        };

        let (right_types, inner) = self.walk_expression(right);

        if !valid_math_types(&right_types) {
            self.add_fatal(
                DiagnosticKind::MathInvalid {
                    left: types_string(&left_types),
                    operator: node.operator.clone(),
                    right: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, inner)
    }

    fn walk_infix_comparison<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, _) = self.walk_expression(&node.left);

        let right = match &node.right {
            Some(right) => right,
            None => return (left_types, expression),
        };

        let (right_types, inner) = self.walk_expression(right);

        if !self.types_valid(&left_types, &right_types) {
            self.add_info(
                DiagnosticKind::ComparisonInvalid {
                    left: types_string(&left_types),
                    operator: node.operator.clone(),
                    right: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, inner)
    }

    fn walk_infix_namespace<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, left_node) = self.walk_expression(&node.left);
        let package = left_node.token().value.clone();
        let package_token = left_node.token().clone();

        // probe failures never rise above hints
        match self.probe.package_installed(&package) {
            Err(_) => self.add_hint(
                DiagnosticKind::ProbeFailed {
                    package: package.clone(),
                },
                &package_token,
            ),
            Ok(false) => self.add_hint(
                DiagnosticKind::PackageNotInstalled {
                    package: package.clone(),
                },
                &package_token,
            ),
            Ok(true) => {}
        }

        let right = match &node.right {
            Some(right) => right,
            None => return (left_types, expression),
        };

        let (right_types, right_node) = self.walk_expression(right);
        let symbol = right_node.token().value.clone();

        match self.probe.package_exports(&package, &symbol) {
            Err(_) => self.add_hint(DiagnosticKind::ProbeFailed { package }, &package_token),
            Ok(false) => self.add_hint(
                DiagnosticKind::SymbolNotExported {
                    package,
                    operator: node.operator.clone(),
                    symbol,
                },
                &package_token,
            ),
            Ok(true) => {}
        }

        (right_types, right_node)
    }

    fn walk_infix_dollar<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        self.walk_expression(&node.left);

        match &node.right {
            Some(right) => self.walk_expression(right),
            None => {
                self.add_fatal(
                    DiagnosticKind::MissingRightHandSide {
                        operator: node.operator.clone(),
                    },
                    &node.token,
                );
                (vec![], expression)
            }
        }
    }

    fn walk_infix_pipe<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        self.walk_expression(&node.left);

        match &node.right {
            Some(right) => self.walk_expression(right),
            None => {
                self.add_fatal(
                    DiagnosticKind::MissingRightHandSide {
                        operator: node.operator.clone(),
                    },
                    &node.token,
                );
                (vec![], expression)
            }
        }
    }

    fn walk_infix_range<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, _) = self.walk_expression(&node.left);

        if !valid_math_types(&left_types) {
            self.add_fatal(
                DiagnosticKind::MathInvalid {
                    left: types_string(&left_types),
                    operator: node.operator.clone(),
                    right: types_string(&left_types),
                },
                &node.token,
            );
        }

        let right = match &node.right {
            Some(right) => right,
            None => return (left_types, expression),
        };

        let (right_types, inner) = self.walk_expression(right);

        if !valid_math_types(&right_types) {
            self.add_fatal(
                DiagnosticKind::MathInvalid {
                    left: types_string(&left_types),
                    operator: node.operator.clone(),
                    right: types_string(&right_types),
                },
                &node.token,
            );
        }

        (right_types, inner)
    }

    fn walk_infix_default<'a>(
        &mut self,
        node: &'a InfixExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, left_node) = self.walk_expression(&node.left);

        match &node.right {
            Some(right) => self.walk_expression(right),
            None => (left_types, left_node),
        }
    }

    fn walk_call_expression<'a>(
        &mut self,
        node: &'a CallExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let known = self
            .env
            .get_function(&node.name, true)
            .filter(|f| f.package.is_none() && !has_variadic(&f.value))
            .map(|f| f.value.clone());

        // external and variadic functions cannot be signature-checked
        if let Some(function) = known {
            return self.walk_known_call_expression(node, &function, expression);
        }

        self.in_call += 1;
        for argument in &node.arguments {
            self.walk_expression(&argument.value);
        }
        self.in_call -= 1;

        self.walk_expression(&node.function)
    }

    fn walk_known_call_expression<'a>(
        &mut self,
        node: &CallExpression,
        function: &FunctionLiteral,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        self.in_call += 1;

        for (index, argument) in node.arguments.iter().enumerate() {
            let (argument_types, _) = self.walk_expression(&argument.value);

            let parameter =
                get_function_parameter(function, argument.name.as_deref(), index);

            let parameter = match parameter {
                Some(parameter) => parameter,
                None => {
                    match &argument.name {
                        None => self.add_fatal(
                            DiagnosticKind::ParameterIndexNotFound { index: index + 1 },
                            &argument.token,
                        ),
                        Some(name) => {
                            let candidates =
                                function.parameters.iter().map(|p| p.name.clone());
                            let tip = did_you_mean(name, candidates);
                            self.diagnostics.add(
                                Diagnostic::new(
                                    DiagnosticKind::ParameterNotFound { name: name.clone() },
                                    Severity::Fatal,
                                    argument.token.position.clone(),
                                )
                                .with_tip(tip),
                            );
                        }
                    }
                    continue;
                }
            };

            if !self.types_valid(&parameter.types, &argument_types) {
                match &argument.name {
                    None => self.add_fatal(
                        DiagnosticKind::ArgumentExpects {
                            index: index + 1,
                            expected: types_string(&parameter.types),
                            got: types_string(&argument_types),
                        },
                        &argument.token,
                    ),
                    Some(name) => self.add_fatal(
                        DiagnosticKind::NamedArgumentExpects {
                            name: name.clone(),
                            expected: types_string(&parameter.types),
                            got: types_string(&argument_types),
                        },
                        &argument.token,
                    ),
                }
            }
        }

        self.in_call -= 1;

        (function.return_types.clone(), expression)
    }

    fn walk_function_literal(&mut self, node: &FunctionLiteral) {
        if let Some(name) = &node.name {
            let exists = self.env.get_function(name, false).is_some();

            // methods share a name across receiver types
            if exists && node.method.is_none() {
                self.add_fatal(
                    DiagnosticKind::FunctionAlreadyDefined { name: name.clone() },
                    &node.token,
                );
                return;
            }

            // declared before the body so recursion type-checks
            self.env.set_function(
                name,
                environment::Function {
                    token: node.token.clone(),
                    value: node.clone(),
                    package: None,
                },
            );
        }

        self.env.enclose(Some(node.clone()));

        let mut seen: HashSet<String> = HashSet::new();

        if let Some(method) = &node.method {
            seen.insert(method.name.clone());
            self.env.set_variable(
                &method.name,
                environment::Variable {
                    token: method.token.clone(),
                    types: vec![method.tipe.clone()],
                    is_const: false,
                    can_miss: false,
                    used: true,
                },
            );
        }

        for parameter in &node.parameters {
            if let Some(default) = &parameter.default {
                self.walk_expression(default);
            }

            self.env.set_variable(
                &parameter.name,
                environment::Variable {
                    token: parameter.token.clone(),
                    types: parameter.types.clone(),
                    is_const: false,
                    can_miss: parameter.default.is_none(),
                    used: true,
                },
            );

            if parameter.name == "..." {
                continue;
            }

            if !seen.insert(parameter.name.clone()) {
                self.add_fatal(
                    DiagnosticKind::DuplicatedParameter {
                        name: parameter.name.clone(),
                    },
                    &parameter.token,
                );
            }
        }

        self.walk_block(&node.body);

        let unused: Vec<(DiagnosticKind, Token)> = self
            .env
            .unused_variables()
            .into_iter()
            .map(|v| {
                (
                    DiagnosticKind::NeverUsed {
                        name: v.token.value.clone(),
                    },
                    v.token.clone(),
                )
            })
            .collect();

        for (kind, token) in unused {
            self.add_warn(kind, &token);
        }

        self.env.open();
    }

    fn walk_for(&mut self, node: &ForStatement) {
        self.env.enclose(None);

        // the loop variable is scoped to the body and counts as used
        self.env.set_variable(
            &node.variable.name,
            environment::Variable {
                token: node.variable.token.clone(),
                types: node.variable.types.clone(),
                is_const: false,
                can_miss: false,
                used: true,
            },
        );

        let (iterable_types, iterable_node) = self.walk_expression(&node.iterable);

        if !self.valid_iterator_types(&iterable_types) {
            let token = iterable_node.token().clone();
            self.add_fatal(
                DiagnosticKind::NotIterable {
                    types: types_string(&iterable_types),
                },
                &token,
            );
        }

        self.walk_block(&node.body);
        self.env.open();
    }

    fn walk_while(&mut self, node: &WhileStatement) {
        self.walk_expression(&node.condition);

        self.env.enclose(None);
        self.walk_block(&node.body);
        self.env.open();
    }

    fn walk_repeat(&mut self, node: &RepeatStatement) {
        self.env.enclose(None);
        self.walk_block(&node.body);
        self.env.open();
    }

    fn walk_return_statement<'a>(
        &mut self,
        node: &'a ReturnStatement,
    ) -> (Types, Option<&'a Expression>) {
        let value = match &node.value {
            Some(value) => value,
            None => return (vec![], None),
        };

        let (types, inner) = self.walk_expression(value);

        let expected = self
            .env
            .enclosing_function()
            .map(|f| f.return_types.clone());

        if let Some(expected) = expected {
            if !self.types_valid(&expected, &types) {
                self.add_fatal(
                    DiagnosticKind::ReturnExpects {
                        expected: types_string(&expected),
                        got: types_string(&types),
                    },
                    &node.token,
                );
            }
        }

        (types, Some(inner))
    }

    fn walk_type_statement(&mut self, node: &TypeStatement) {
        if self.env.get_type(&node.name, false).is_some() {
            self.add_fatal(
                DiagnosticKind::TypeAlreadyDefined {
                    name: node.name.clone(),
                },
                &node.token,
            );
            return;
        }

        self.env.set_type(
            &node.name,
            false,
            environment::Type {
                token: node.token.clone(),
                kind: node.kind,
                types: node.types.clone(),
                attributes: node.attributes.clone(),
                used: false,
            },
        );
    }

    fn walk_decorator_class(&mut self, node: &DecoratorClass) {
        self.env.set_class(
            &node.tipe.name,
            environment::Class {
                token: node.token.clone(),
                value: node.clone(),
            },
        );

        self.walk_type_statement(&node.tipe);
    }

    fn walk_square<'a>(
        &mut self,
        node: &'a SquareExpression,
        expression: &'a Expression,
    ) -> (Types, &'a Expression) {
        let (left_types, _) = self.walk_expression(&node.left);

        for content in &node.contents {
            self.walk_expression(content);
        }

        (left_types, expression)
    }

    /// Can `left` accept a value of type `right`? `any` is universal, a
    /// union target accepts each alternative of the value type through at
    /// least one of its own, and empty sides pass (best-effort).
    fn types_valid(&self, left: &[Type], right: &[Type]) -> bool {
        if left.is_empty() || right.is_empty() {
            return true;
        }

        right
            .iter()
            .all(|r| left.iter().any(|l| type_valid(l, r)))
    }

    fn valid_iterator_types(&self, types: &[Type]) -> bool {
        if types.is_empty() {
            return true;
        }

        types.iter().any(|t| {
            t.list
                || matches!(t.name.as_str(), "int" | "num" | "char" | "list")
                || self
                    .env
                    .get_type(&t.name, false)
                    .map(|tipe| {
                        matches!(
                            tipe.kind,
                            TypeKind::List | TypeKind::ListOf | TypeKind::Dataframe
                        )
                    })
                    .unwrap_or(false)
        })
    }
}

impl Default for Walker {
    fn default() -> Self {
        Walker::new()
    }
}

fn type_valid(left: &Type, right: &Type) -> bool {
    if left.name == "any" || right.name == "any" {
        return true;
    }

    if left.name != right.name {
        return false;
    }

    // a list-of target also accepts its element type
    left.list == right.list || left.list
}

/// The union, after discarding `na`, must hold base numeric types only.
fn valid_math_types(types: &[Type]) -> bool {
    types
        .iter()
        .filter(|t| t.name != "na")
        .all(|t| matches!(t.name.as_str(), "int" | "num" | "factor"))
}

fn all_types_identical(types: &[Type]) -> bool {
    match types.first() {
        Some(first) => types.iter().all(|t| t == first),
        None => true,
    }
}

fn has_variadic(function: &FunctionLiteral) -> bool {
    function.parameters.iter().any(|p| p.variadic)
}

fn get_function_parameter<'f>(
    function: &'f FunctionLiteral,
    name: Option<&str>,
    index: usize,
) -> Option<&'f Parameter> {
    match name {
        Some(name) => function.parameters.iter().find(|p| p.name == name),
        None => function.parameters.get(index),
    }
}
