use std::collections::HashMap;

use crate::ast::expressions::FunctionLiteral;
use crate::ast::statements::{Attribute, DecoratorClass};
use crate::ast::types::{Type as AstType, TypeKind, Types};
use crate::lexer::tokens::{Token, BASE_TYPES};

#[derive(Debug, Clone)]
pub struct Variable {
    pub token: Token,
    pub types: Types,
    pub is_const: bool,
    pub can_miss: bool,
    pub used: bool,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub token: Token,
    pub value: FunctionLiteral,
    /// Set for functions declared by an external package.
    pub package: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Type {
    pub token: Token,
    pub kind: TypeKind,
    pub types: Types,
    pub attributes: Vec<Attribute>,
    pub used: bool,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub token: Token,
    pub value: DecoratorClass,
}

#[derive(Debug, Default)]
pub struct Frame {
    variables: HashMap<String, Variable>,
    functions: HashMap<String, Function>,
    types: HashMap<String, Type>,
    classes: HashMap<String, Class>,
    function: Option<FunctionLiteral>,
}

impl Frame {
    fn new(function: Option<FunctionLiteral>) -> Self {
        Frame {
            function,
            ..Frame::default()
        }
    }
}

/// The scope chain. `enclose` pushes a frame, `open` pops back to the
/// outer one; the root frame is primed with the base types and is never
/// popped.
#[derive(Debug)]
pub struct Environment {
    stack: Vec<Frame>,
}

// a type and its list form are distinct entries sharing a surface name
fn type_key(name: &str, list: bool) -> String {
    if list {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

impl Environment {
    pub fn new() -> Self {
        let mut env = Environment {
            stack: vec![Frame::new(None)],
        };

        for name in BASE_TYPES.iter() {
            env.set_type(
                name,
                false,
                Type {
                    token: Token::null(),
                    kind: TypeKind::Alias,
                    types: vec![AstType::new(name)],
                    attributes: vec![],
                    used: true,
                },
            );
        }

        env
    }

    pub fn enclose(&mut self, function: Option<FunctionLiteral>) {
        self.stack.push(Frame::new(function));
    }

    pub fn open(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn current(&mut self) -> &mut Frame {
        self.stack.last_mut().expect("environment has a root frame")
    }

    /// The function this scope (or an enclosing one) belongs to.
    pub fn enclosing_function(&self) -> Option<&FunctionLiteral> {
        self.stack.iter().rev().find_map(|f| f.function.as_ref())
    }

    pub fn get_variable(&self, name: &str, climb: bool) -> Option<&Variable> {
        if climb {
            self.stack.iter().rev().find_map(|f| f.variables.get(name))
        } else {
            self.stack.last().and_then(|f| f.variables.get(name))
        }
    }

    pub fn set_variable(&mut self, name: &str, variable: Variable) {
        self.current().variables.insert(name.to_string(), variable);
    }

    pub fn set_variable_used(&mut self, name: &str) {
        for frame in self.stack.iter_mut().rev() {
            if let Some(v) = frame.variables.get_mut(name) {
                v.used = true;
                return;
            }
        }
    }

    pub fn set_variable_not_missing(&mut self, name: &str) {
        for frame in self.stack.iter_mut().rev() {
            if let Some(v) = frame.variables.get_mut(name) {
                v.can_miss = false;
                return;
            }
        }
    }

    /// Variables of the innermost frame that were never read.
    pub fn unused_variables(&self) -> Vec<&Variable> {
        let mut unused: Vec<&Variable> = self
            .stack
            .last()
            .map(|f| {
                f.variables
                    .values()
                    .filter(|v| !v.used && v.token.value != "...")
                    .collect()
            })
            .unwrap_or_default();
        unused.sort_by(|a, b| a.token.value.cmp(&b.token.value));
        unused
    }

    pub fn get_function(&self, name: &str, climb: bool) -> Option<&Function> {
        if climb {
            self.stack.iter().rev().find_map(|f| f.functions.get(name))
        } else {
            self.stack.last().and_then(|f| f.functions.get(name))
        }
    }

    pub fn set_function(&mut self, name: &str, function: Function) {
        self.current().functions.insert(name.to_string(), function);
    }

    pub fn get_type(&self, name: &str, list: bool) -> Option<&Type> {
        let key = type_key(name, list);
        self.stack.iter().rev().find_map(|f| f.types.get(&key))
    }

    pub fn set_type(&mut self, name: &str, list: bool, tipe: Type) {
        let key = type_key(name, list);
        self.current().types.insert(key, tipe);
    }

    pub fn set_type_used(&mut self, name: &str, list: bool) {
        let key = type_key(name, list);
        for frame in self.stack.iter_mut().rev() {
            if let Some(t) = frame.types.get_mut(&key) {
                t.used = true;
                return;
            }
        }
    }

    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.stack.iter().rev().find_map(|f| f.classes.get(name))
    }

    pub fn set_class(&mut self, name: &str, class: Class) {
        self.current().classes.insert(name.to_string(), class);
    }

    /// Names visible from the innermost scope, for suggestion lookups.
    pub fn visible_names(&self) -> Vec<String> {
        let mut names = vec![];
        for frame in self.stack.iter().rev() {
            names.extend(frame.variables.keys().cloned());
            names.extend(frame.functions.keys().cloned());
        }
        names
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
