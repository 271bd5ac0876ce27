//! Lexical analysis.
//!
//! This module contains the scanner that converts source text into a stream
//! of tokens. It handles:
//!
//! - Whitespace and comment elision
//! - Recognition of keywords, identifiers, number and string literals
//! - One-character lookahead for two-character operators
//! - Byte offsets on every token for error reporting

pub mod lexer;
pub mod tokens;
