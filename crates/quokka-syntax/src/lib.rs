//! CSS tokenizer and declaration-block parser for the Quokka style engine.
//!
//! # Scope
//!
//! This crate implements the subset of CSS Syntax Module Level 3 needed to
//! process the value of a `style` attribute (a declaration block without the
//! surrounding braces):
//!
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types relevant to declaration values: ident, function,
//!     at-keyword, hash, string, url, number, percentage, dimension, etc.
//!   - Comment handling
//!   - Escape sequences
//!
//! - **Declaration parsing** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Component values (preserved tokens, functions, simple blocks)
//!   - Declaration lists with `!important` detection
//!   - Error recovery: a malformed declaration is dropped, the rest of the
//!     block parses normally
//!
//! - **Serialization** ([§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization))
//!   - Component values back to canonical text
//!
//! # Not Implemented
//!
//! Full stylesheet grammar: selectors are never interpreted, at-rules are
//! recognized only far enough to step over their blocks. The consumer of
//! this crate is a declaration store, not a cascade.

/// Declaration-list and component-value parsing per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

pub use parser::{
    ComponentValue, CssParser, Declaration, parse_component_values, parse_declaration_block,
    quote_string, serialize_component_values, split_commas, split_whitespace_runs,
    trim_whitespace,
};
pub use token::{CssToken, HashType, NumericType};
pub use tokenizer::CssTokenizer;
