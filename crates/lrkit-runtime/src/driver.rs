//! LR(k) driver main loop and unexpected-token recovery (§4.I).

use lrkit_tables::{ActionCode, Module};

use crate::error::ParseError;
use crate::interp::run_reduction;
use crate::lexer::Lexer;
use crate::limits::ParserLimits;
use crate::simulator::Simulator;
use crate::stream::RewindableTokenStream;
use crate::token::Token;
use crate::trace::{NoopTracer, RecoveryStrategy, Tracer};
use crate::tree::{SemanticAction, Tree, TreeBuilder};

/// The caller-supplied collaborator errors are reported to. The core never
/// stores state inside it; it's invoked synchronously, in detection order
/// (§9: "callback error sink").
pub trait ErrorSink {
    fn on_error(&mut self, error: ParseError);
}

impl<F: FnMut(ParseError)> ErrorSink for F {
    fn on_error(&mut self, error: ParseError) {
        self(error)
    }
}

/// Collects every reported error, for callers that just want the list.
#[derive(Default)]
pub struct ErrorCollector {
    pub errors: Vec<ParseError>,
}

impl ErrorSink for ErrorCollector {
    fn on_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}

/// How many tokens a recovery probe must accept cleanly before the driver
/// trusts a recovery strategy (§4.I).
const PROBE_LENGTH: usize = 3;

/// Drives a loaded [`Module`] over an input string, producing a [`Tree`] or
/// `None` if recovery gives up.
pub struct Driver<'a> {
    module: &'a Module,
    limits: ParserLimits,
    actions: Vec<Box<SemanticAction>>,
}

impl<'a> Driver<'a> {
    pub fn new(module: &'a Module, limits: ParserLimits) -> Self {
        Self {
            module,
            limits,
            actions: Vec::new(),
        }
    }

    /// Register the ordered semantic-action array, indexed by production
    /// bytecode's `SemAction` operands (§6).
    pub fn with_actions(mut self, actions: Vec<Box<SemanticAction>>) -> Self {
        self.actions = actions;
        self
    }

    /// Parse `text`, reporting every lexical/syntactic error to `sink`.
    ///
    /// Convenience entry point over [`parse_traced`](Self::parse_traced) with
    /// a [`NoopTracer`], which the compiler optimizes away entirely.
    pub fn parse(&self, text: &'a str, sink: &mut dyn ErrorSink) -> Option<Tree> {
        self.parse_traced(text, sink, &mut NoopTracer)
    }

    /// Parse `text`, additionally emitting every shift/reduce/accept/error/
    /// recovery event to `tracer` as it happens (§10.3).
    pub fn parse_traced<T: Tracer>(&self, text: &'a str, sink: &mut dyn ErrorSink, tracer: &mut T) -> Option<Tree> {
        let lexer = Lexer::new(self.module, text, self.limits.get_fuzzy_max_distance());
        let mut stream = RewindableTokenStream::new(lexer);
        let mut builder = TreeBuilder::new();
        let mut stack: Vec<u32> = vec![0];
        let mut error_count = 0u32;

        let mut token = stream.next_token(&mut |e| sink.on_error(e), tracer);

        loop {
            match self.parse_on_token(&mut stack, &mut builder, &token, tracer) {
                ActionCode::Shift => {
                    // Also catches stack growth from the GOTO pushes that ran
                    // inside parse_on_token's reduction loop this step.
                    if stack.len() > self.limits.get_max_stack_size() {
                        return None;
                    }
                    token = stream.next_token(&mut |e| sink.on_error(e), tracer);
                }
                ActionCode::Accept => {
                    tracer.on_accept();
                    return Some(builder.into_tree());
                }
                ActionCode::Error => {
                    let expected = self.expected_names(*stack.last().unwrap());
                    tracer.on_unexpected_token(&token.name, &expected, token.position.line, token.position.column);
                    sink.on_error(ParseError::UnexpectedToken {
                        found: token.name.clone(),
                        expected,
                        position: token.position,
                    });
                    error_count += 1;
                    if error_count >= self.limits.get_max_error_count() || !self.limits.get_recovery_enabled() {
                        return None;
                    }
                    match self.on_unexpected_token(&stack, &mut stream, &token, tracer) {
                        Some(next) => token = next,
                        None => return None,
                    }
                }
                ActionCode::Reduce => unreachable!("parse_on_token never returns Reduce"),
            }
        }
    }

    /// Shift-or-reduce-to-a-decision for one token: runs every pending
    /// reduction, then returns `Shift`, `Accept`, or `Error`.
    fn parse_on_token<T: Tracer>(
        &self,
        stack: &mut Vec<u32>,
        builder: &mut TreeBuilder,
        token: &Token,
        tracer: &mut T,
    ) -> ActionCode {
        loop {
            let state = *stack.last().expect("driver stack is never empty");
            let action = self
                .module
                .get_action(state, token.action_symbol(self.module.terminal_count()));
            match action.code {
                ActionCode::Shift => {
                    stack.push(action.data);
                    builder.stack_push(token.clone());
                    tracer.on_shift(action.data, &token.name);
                    return ActionCode::Shift;
                }
                ActionCode::Reduce => {
                    let production = self.module.get_production(action.data);
                    let new_len = stack.len() - production.reduction_length as usize;
                    stack.truncate(new_len);
                    run_reduction(&production, builder, &self.actions);
                    let head_state = *stack.last().expect("stack non-empty after pop");
                    let goto = self.module.get_goto(head_state, production.head);
                    stack.push(goto);
                    let head_name = self.module.resolve_name(lrkit_core::Symbol::from_raw(production.head));
                    tracer.on_reduce(action.data, head_name);
                }
                other => return other,
            }
        }
    }

    fn expected_names(&self, state: u32) -> Vec<String> {
        self.module
            .get_expected(state)
            .into_iter()
            .map(|t| self.module.resolve_name(lrkit_core::Symbol::from_raw(t)).to_string())
            .collect()
    }

    /// §4.I recovery: drop-one, drop-two, insert-expected, in order.
    ///
    /// `unexpected` has already been consumed from `stream` by the main loop
    /// before this runs, so drop-one/drop-two probe forward from the stream's
    /// current position directly. Insert-expected is different: it doesn't
    /// discard `unexpected`, it inserts a synthetic token *before* it, so the
    /// probe must see `dummy, unexpected, ...` rather than `dummy, ...` with
    /// `unexpected` silently lost — hence the `rewind(1)` that un-consumes it
    /// before that loop runs.
    fn on_unexpected_token<T: Tracer>(
        &self,
        stack: &[u32],
        stream: &mut RewindableTokenStream<'a>,
        unexpected: &Token,
        tracer: &mut T,
    ) -> Option<Token> {
        // Drop-one: the unexpected token is simply discarded.
        let mark = stream.mark();
        let mut sim = Simulator::new(self.module, stack);
        let (ok, _) = sim.test_for_length(stream, PROBE_LENGTH, None);
        stream.rewind_to(mark);
        tracer.on_recovery_attempt(RecoveryStrategy::DropOne, ok);
        if ok {
            return Some(stream.next_token(&mut |_| {}, &mut NoopTracer));
        }

        // Drop-two: discard one further token, then the same probe.
        let extra = stream.next_token(&mut |_| {}, &mut NoopTracer);
        if !extra.is_eof() {
            let mark = stream.mark();
            let mut sim = Simulator::new(self.module, stack);
            let (ok, _) = sim.test_for_length(stream, PROBE_LENGTH, None);
            stream.rewind_to(mark);
            tracer.on_recovery_attempt(RecoveryStrategy::DropTwo, ok);
            if ok {
                return Some(stream.next_token(&mut |_| {}, &mut NoopTracer));
            }
        }
        stream.rewind_to(mark);
        // Un-consume `unexpected` itself so the insert-expected probe below
        // sees it as the token right after the injected dummy.
        stream.rewind(1);

        // Insert-expected: try each expected terminal as a dummy injection.
        let state = *stack.last().unwrap();
        for terminal in self.module.get_expected(state) {
            let dummy = Token::epsilon(terminal, self.module.resolve_name(lrkit_core::Symbol::from_raw(terminal)), unexpected.position);
            let mark = stream.mark();
            let mut sim = Simulator::new(self.module, stack);
            let (ok, _) = sim.test_for_length(stream, PROBE_LENGTH, Some(dummy.clone()));
            stream.rewind_to(mark);
            tracer.on_recovery_attempt(RecoveryStrategy::InsertExpected, ok);
            if ok {
                return Some(dummy);
            }
        }

        None
    }
}
