//! fare-core: the Fare booking command language front end.
//!
//! Turns one line of constrained English ("book train from kingston to
//! montego bay on 2025-06-01 at 14:30 for john smith") into a typed
//! [`Command`] that the evaluation layer can validate and dispatch.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──lex──▶ Vec<Spanned> ──parse──▶ Command
//! ```
//!
//! # Public API
//!
//! - [`parse_line()`] -- lex + parse in one call
//! - [`lexer::lex()`] / [`parser::parse()`] -- the individual stages
//! - [`Command`], [`Resource`], [`StatusAction`] -- the command AST
//! - [`LangError`] -- positioned lex/parse error

pub mod command;
pub mod error;
pub mod lexer;
pub mod parser;

pub use command::{Command, Resource, StatusAction};
pub use error::{LangError, Stage};
pub use lexer::{lex, Spanned, Token};
pub use parser::parse;

/// Lexes and parses one input line into a [`Command`].
///
/// Any lex error fails the whole parse; there is no partial recovery.
pub fn parse_line(input: &str) -> Result<Command, LangError> {
    let tokens = lexer::lex(input)?;
    parser::parse(&tokens)
}
