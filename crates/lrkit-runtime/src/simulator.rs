//! Speculative probes over a cheap copy of the parser's state stack (§4.J).

use lrkit_tables::{ActionCode, Module};

use crate::stream::RewindableTokenStream;
use crate::token::Token;
use crate::trace::NoopTracer;

/// A disposable clone of the driver's state stack, sharing the automaton
/// and input stream but never mutating the real parser state or builder
/// (§8, property 5: simulator isolation).
pub struct Simulator<'a> {
    module: &'a Module,
    stack: Vec<u32>,
}

impl<'a> Simulator<'a> {
    /// Copy the live stack prefix `[0..=head]`.
    pub fn new(module: &'a Module, stack_prefix: &[u32]) -> Self {
        Self {
            module,
            stack: stack_prefix.to_vec(),
        }
    }

    /// Attempt to shift/reduce without error for `n` token steps, optionally
    /// starting with `injected` as the first token (bypassing the stream).
    /// Returns `(ok, tokens_consumed_from_input)`; the caller rewinds the
    /// real stream by exactly that count.
    pub fn test_for_length(
        &mut self,
        stream: &mut RewindableTokenStream<'_>,
        n: usize,
        injected: Option<Token>,
    ) -> (bool, usize) {
        let mut consumed_from_input = 0usize;
        let mut pending = injected;

        for _ in 0..n {
            let token = match pending.take() {
                Some(token) => token,
                None => {
                    let token = stream.next_token(&mut |_| {}, &mut NoopTracer);
                    consumed_from_input += 1;
                    token
                }
            };
            if !self.step(&token) {
                return (false, consumed_from_input);
            }
        }

        (true, consumed_from_input)
    }

    /// Shift `token`, running any reductions first. `false` on `Error`.
    fn step(&mut self, token: &Token) -> bool {
        loop {
            let state = *self.stack.last().expect("simulator stack is never empty");
            let action = self
                .module
                .get_action(state, token.action_symbol(self.module.terminal_count()));
            match action.code {
                ActionCode::Shift => {
                    self.stack.push(action.data);
                    return true;
                }
                ActionCode::Reduce => {
                    let production = self.module.get_production(action.data);
                    let new_len = self.stack.len() - production.reduction_length as usize;
                    self.stack.truncate(new_len);
                    let head_state = *self.stack.last().expect("stack non-empty after pop");
                    let goto = self.module.get_goto(head_state, production.head);
                    self.stack.push(goto);
                }
                ActionCode::Accept => return true,
                ActionCode::Error => return false,
            }
        }
    }
}
