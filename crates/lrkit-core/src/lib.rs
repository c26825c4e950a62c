//! Core data structures shared by the table format and the runtime.
//!
//! Two small, dependency-free primitives live here because both the
//! `lrkit-tables` loader and the `lrkit-runtime` engine need them:
//!
//! - [`Interner`] / [`Symbol`]: string interning for terminal, variable and
//!   production names baked into a table's string blob.
//! - [`Position`]: a 1-based `(line, column)` pair used by the text buffer,
//!   tokens and parse errors.

mod interner;
mod position;

#[cfg(test)]
mod interner_tests;

pub use interner::{Interner, Symbol};
pub use position::Position;
