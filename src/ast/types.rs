use std::fmt::Display;

/// A named type reference, optionally a list of that type (`[]T`).
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: String,
    pub list: bool,
}

impl Type {
    pub fn new(name: &str) -> Self {
        Type {
            name: name.to_string(),
            list: false,
        }
    }

    pub fn list(name: &str) -> Self {
        Type {
            name: name.to_string(),
            list: true,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.list {
            write!(f, "[]{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// An ordered sequence of types read as a union (alternation).
pub type Types = Vec<Type>;

/// Render a type expression the way it is written: `int | na`, `[]char`.
pub fn types_string(types: &[Type]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The base form of a user type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Alias,
    Struct,
    Object,
    List,
    Dataframe,
    ListOf,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Alias => write!(f, "alias"),
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Object => write!(f, "object"),
            TypeKind::List => write!(f, "list"),
            TypeKind::Dataframe => write!(f, "dataframe"),
            TypeKind::ListOf => write!(f, "list-of"),
        }
    }
}
