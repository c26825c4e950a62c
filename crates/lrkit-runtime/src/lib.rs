//! Lexer and LR(k) parser driver runtime.
//!
//! This crate consumes the binary tables produced by `lrkit-tables` and
//! turns source text into a syntax tree: a fuzzy DFA lexer tokenizes the
//! input with bounded Levenshtein-distance recovery, and an LR(k) driver
//! shifts/reduces the resulting token stream into a tree, recovering from
//! unexpected tokens by speculative simulation.

pub mod colors;
pub mod driver;
pub mod error;
pub mod fuzzy;
pub mod interp;
pub mod lexer;
pub mod limits;
pub mod simulator;
pub mod stream;
pub mod text;
pub mod token;
pub mod trace;
pub mod tree;

pub use colors::Colors;
pub use driver::{Driver, ErrorCollector, ErrorSink};
pub use error::ParseError;
pub use fuzzy::{FuzzyMatcher, TokenMatch};
pub use lexer::Lexer;
pub use limits::ParserLimits;
pub use simulator::Simulator;
pub use stream::RewindableTokenStream;
pub use text::TextBuffer;
pub use token::{Token, EOF_SYMBOL, EPSILON_SYMBOL};
pub use trace::{NoopTracer, PrintTracer, RecoveryStrategy, Tracer, Verbosity};
pub use tree::{SemanticAction, Tree, TreeBuilder};

#[cfg(test)]
mod support;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod tree_tests;
