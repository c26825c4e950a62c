//! Tracing infrastructure for debugging the lexer and driver.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used, every trait method is an `#[inline(always)]`
//! empty function; the compiler eliminates the calls and their arguments
//! entirely, so the untraced path carries no tracing overhead.

use std::io::Write;

use crate::Colors;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Shift/reduce/accept only.
    #[default]
    Default,
    /// All of the above plus error and recovery events.
    Verbose,
    /// Verbose, plus every fuzzy-search frontier node.
    VeryVerbose,
}

/// Recovery strategies attempted by `onUnexpectedToken` (§4.I).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryStrategy {
    DropOne,
    DropTwo,
    InsertExpected,
}

/// Instrumentation seam for the lexer and driver. All methods receive raw
/// data the caller already has; formatting happens in the implementation.
pub trait Tracer {
    /// A token was shifted onto the stack.
    fn on_shift(&mut self, state: u32, symbol_name: &str);
    /// A production was reduced.
    fn on_reduce(&mut self, production_index: u32, head_name: &str);
    /// The parser accepted.
    fn on_accept(&mut self);
    /// The lexer reported an unexpected character.
    fn on_unexpected_char(&mut self, found: &str, line: u32, column: u32);
    /// The driver reported an unexpected token.
    fn on_unexpected_token(&mut self, found: &str, expected: &[String], line: u32, column: u32);
    /// A recovery strategy was attempted, with its outcome.
    fn on_recovery_attempt(&mut self, strategy: RecoveryStrategy, succeeded: bool);
    /// A node was visited during fuzzy search (`VeryVerbose` only).
    fn on_fuzzy_node(&mut self, state: u32, length: usize, distance: u32);
}

/// No-op tracer, optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn on_shift(&mut self, _state: u32, _symbol_name: &str) {}
    #[inline(always)]
    fn on_reduce(&mut self, _production_index: u32, _head_name: &str) {}
    #[inline(always)]
    fn on_accept(&mut self) {}
    #[inline(always)]
    fn on_unexpected_char(&mut self, _found: &str, _line: u32, _column: u32) {}
    #[inline(always)]
    fn on_unexpected_token(&mut self, _found: &str, _expected: &[String], _line: u32, _column: u32) {}
    #[inline(always)]
    fn on_recovery_attempt(&mut self, _strategy: RecoveryStrategy, _succeeded: bool) {}
    #[inline(always)]
    fn on_fuzzy_node(&mut self, _state: u32, _length: usize, _distance: u32) {}
}

/// Tracer that formats every event to a `Write` sink, colorized via
/// [`Colors`].
pub struct PrintTracer<W> {
    out: W,
    verbosity: Verbosity,
    colors: Colors,
}

impl<W: Write> PrintTracer<W> {
    pub fn new(out: W, verbosity: Verbosity, colors: Colors) -> Self {
        Self { out, verbosity, colors }
    }

    fn writeln(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", line.as_ref());
    }
}

impl<W: Write> Tracer for PrintTracer<W> {
    fn on_shift(&mut self, state: u32, symbol_name: &str) {
        let c = &self.colors;
        self.writeln(format!("{}shift{} {symbol_name} -> state {state}", c.blue, c.reset));
    }

    fn on_reduce(&mut self, production_index: u32, head_name: &str) {
        let c = &self.colors;
        self.writeln(format!(
            "{}reduce{} #{production_index} ({head_name})",
            c.green, c.reset
        ));
    }

    fn on_accept(&mut self) {
        let c = &self.colors;
        self.writeln(format!("{}accept{}", c.green, c.reset));
    }

    fn on_unexpected_char(&mut self, found: &str, line: u32, column: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = &self.colors;
        self.writeln(format!(
            "{}unexpected char{} {found:?} at {line}:{column}",
            c.dim, c.reset
        ));
    }

    fn on_unexpected_token(&mut self, found: &str, expected: &[String], line: u32, column: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = &self.colors;
        self.writeln(format!(
            "{}unexpected token{} {found:?} at {line}:{column}, expected {expected:?}",
            c.dim, c.reset
        ));
    }

    fn on_recovery_attempt(&mut self, strategy: RecoveryStrategy, succeeded: bool) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let outcome = if succeeded { "ok" } else { "failed" };
        self.writeln(format!("  recovery {strategy:?}: {outcome}"));
    }

    fn on_fuzzy_node(&mut self, state: u32, length: usize, distance: u32) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        self.writeln(format!("    fuzzy node state={state} length={length} distance={distance}"));
    }
}
