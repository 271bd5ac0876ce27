//! Error types for lexical analysis.
//!
//! This module defines the errors the scanner can raise. It includes:
//!
//! - Error structures with source position information
//! - One variant per kind of malformed input
//! - Helpful error names and suggestions for diagnostics

pub mod errors;
