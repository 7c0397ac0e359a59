//! Abstract syntax tree for the Vapour language.
//!
//! Statements and expressions are closed sum types with one struct per
//! node kind; every node carries its originating token so diagnostics can
//! point back into the source.

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
