use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// How severe a diagnostic is. Only `Fatal` blocks code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Warn,
    Info,
    Hint,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Fatal => write!(f, "error"),
            Severity::Warn => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    // lexer
    #[error("expecting closing quote, got {found:?}")]
    UnterminatedString { found: String },
    #[error("expecting closing `%`, got {found:?}")]
    UnterminatedInfix { found: String },
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },

    // parser
    #[error("unexpected token {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("declaration of `{name}` is missing a type annotation")]
    MissingTypeAnnotation { name: String },
    #[error("constant `{name}` must be initialised")]
    MissingInitialiser { name: String },
    #[error("invalid number {value:?}")]
    InvalidNumber { value: String },
    #[error("decorator @{decorator} must precede a function or type declaration")]
    DecoratorTarget { decorator: String },
    #[error("`...` may appear only once in a parameter list")]
    DuplicateVariadic,
    #[error("fields of `{form}` must be named")]
    UnnamedField { form: String },

    // walker
    #[error("variable `{name}` is already declared")]
    AlreadyDeclared { name: String },
    #[error("`{name}` does not exist")]
    DoesNotExist { name: String },
    #[error("`{name}` is a constant")]
    ConstantAssign { name: String },
    #[error("constants may only have a single type")]
    ConstantSingleType,
    #[error("`{name}` expects `{expected}`, got `{got}`")]
    DeclarationExpects {
        name: String,
        expected: String,
        got: String,
    },
    #[error("left expects `{expected}`, right returns `{got}`")]
    AssignmentExpects { expected: String, got: String },
    #[error("`{left}` {operator} `{right}` is not valid")]
    MathInvalid {
        left: String,
        operator: String,
        right: String,
    },
    #[error("comparison `{left}` {operator} `{right}` is not valid: not logical")]
    ComparisonInvalid {
        left: String,
        operator: String,
        right: String,
    },
    #[error("`{operator}` expects a right-hand side")]
    MissingRightHandSide { operator: String },
    #[error("type `{types}` cannot be iterated")]
    NotIterable { types: String },
    #[error("vectors of different types ({types})")]
    VectorMixedTypes { types: String },
    #[error("function `{name}` is already defined")]
    FunctionAlreadyDefined { name: String },
    #[error("duplicated function parameter `{name}`")]
    DuplicatedParameter { name: String },
    #[error("type `{name}` already defined")]
    TypeAlreadyDefined { name: String },
    #[error("could not find parameter `{name}`")]
    ParameterNotFound { name: String },
    #[error("could not find parameter #{index} (too many arguments?)")]
    ParameterIndexNotFound { index: usize },
    #[error("argument #{index} expects `{expected}`, got `{got}`")]
    ArgumentExpects {
        index: usize,
        expected: String,
        got: String,
    },
    #[error("argument `{name}` expects `{expected}`, got `{got}`")]
    NamedArgumentExpects {
        name: String,
        expected: String,
        got: String,
    },
    #[error("return expects `{expected}`, got `{got}`")]
    ReturnExpects { expected: String, got: String },
    #[error("`{name}` might be missing")]
    MightBeMissing { name: String },
    #[error("variable `{name}` is never used")]
    NeverUsed { name: String },

    // host ecosystem probe
    #[error("package `{package}` is not installed")]
    PackageNotInstalled { package: String },
    #[error("`{package}{operator}{symbol}` not found")]
    SymbolNotExported {
        package: String,
        operator: String,
        symbol: String,
    },
    #[error("error checking package `{package}`")]
    ProbeFailed { package: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub position: Position,
    pub tip: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, position: Position) -> Self {
        Diagnostic {
            kind,
            severity,
            position,
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: Option<String>) -> Self {
        self.tip = tip;
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.kind)?;
        if let Some(tip) = &self.tip {
            write!(f, " ({})", tip)?;
        }
        Ok(())
    }
}

/// Append-only accumulator, scoped to one compiler run and passed to each
/// stage as an explicit collaborator.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { items: vec![] }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn add_fatal(&mut self, kind: DiagnosticKind, position: Position) {
        self.add(Diagnostic::new(kind, Severity::Fatal, position));
    }

    pub fn add_warn(&mut self, kind: DiagnosticKind, position: Position) {
        self.add(Diagnostic::new(kind, Severity::Warn, position));
    }

    pub fn add_info(&mut self, kind: DiagnosticKind, position: Position) {
        self.add(Diagnostic::new(kind, Severity::Info, position));
    }

    pub fn add_hint(&mut self, kind: DiagnosticKind, position: Position) {
        self.add(Diagnostic::new(kind, Severity::Hint, position));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// True when at least one fatal has been recorded; downstream stages
    /// must not run in that case.
    pub fn has_error(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Fatal)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
