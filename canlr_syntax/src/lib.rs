//! Reads grammar descriptions into the `canlr_core` data model.
//!
//! A grammar description is a list of directives followed by rules:
//!
//! ```text
//! %name Calc
//! %start expr
//!
//! expr : expr '+' term   { add }
//!      | term
//!      ;
//! term : NUM ;
//! ```
//!
//! [`parse_grammar`] runs the whole front end: lexing, parsing and
//! symbol classification.

pub mod error;
pub mod escape;
pub mod lexer;
pub mod parse;
pub mod token;

mod reader;

pub use crate::error::SyntaxError;
pub use crate::reader::parse_grammar;
