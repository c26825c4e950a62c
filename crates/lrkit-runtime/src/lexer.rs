//! Exact DFA matcher: longest-match tokenization over the automaton (§4.D).

use lrkit_tables::{Module, DEAD_STATE};

use crate::error::ParseError;
use crate::fuzzy::FuzzyMatcher;
use crate::text::TextBuffer;
use crate::token::Token;
use crate::trace::Tracer;

/// Standard longest-match lexer over a loaded [`Module`], falling back to
/// [`FuzzyMatcher`] when a partial match gets stuck without ever reaching
/// an accepting state.
pub struct Lexer<'a> {
    module: &'a Module,
    text: TextBuffer<'a>,
    position: usize,
    fuzzy_max_distance: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(module: &'a Module, text: &'a str, fuzzy_max_distance: u32) -> Self {
        Self {
            module,
            text: TextBuffer::new(text),
            position: 0,
            fuzzy_max_distance,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Yield the next token, reporting any lexical errors through `on_error`
    /// as they're discovered and every event to `tracer`.
    pub fn next_token<T: Tracer>(&mut self, on_error: &mut dyn FnMut(ParseError), tracer: &mut T) -> Token {
        loop {
            if self.text.is_end(self.position) {
                return Token::eof(self.text.get_position_at(self.position));
            }

            let origin = self.position;
            let (length, best_accept) = self.walk_exact(origin);

            if length == 0 {
                // Failure to move at all from state 0: single-char error,
                // guaranteed forward progress (§4.D).
                let found = self.text.get_value(origin).map(|b| (b as char).to_string()).unwrap_or_default();
                let position = self.text.get_position_at(origin);
                tracer.on_unexpected_char(&found, position.line, position.column);
                on_error(ParseError::UnexpectedChar { found, position });
                self.position += 1;
                continue;
            }

            if let Some((state, accept_length)) = best_accept {
                self.position += accept_length;
                return self.build_token(state, origin, accept_length);
            }

            // Partial match, never reached an accepting state: hand off to
            // the fuzzy matcher for bounded-edit-distance recovery.
            let mut fuzzy = FuzzyMatcher::new(self.module, self.fuzzy_max_distance);
            let result = fuzzy.find_match(origin, &self.text, on_error, tracer);
            if result.length == 0 {
                // No accepting state reachable within the distance budget;
                // the fuzzy matcher already emitted one UnexpectedChar.
                self.position += 1;
                continue;
            }
            self.position += result.length;
            return self.build_token(result.state, origin, result.length);
        }
    }

    /// Greedy longest match from state 0, starting at `origin`. Returns the
    /// number of code units consumed before the walk got stuck, and the
    /// best (last-visited) accepting state seen along the way, if any.
    fn walk_exact(&self, origin: usize) -> (usize, Option<(u32, usize)>) {
        let mut state = 0u32;
        let mut length = 0usize;
        let mut best_accept = None;

        loop {
            let idx = origin + length;
            if self.text.is_end(idx) {
                break;
            }
            let cur = self.text.get_value(idx).expect("checked not end");
            let data = self.module.get_state(state);
            let target = data.transition(cur as u32);
            if target == DEAD_STATE {
                break;
            }
            state = target;
            length += 1;
            if self.module.get_state(state).is_accepting() {
                best_accept = Some((state, length));
            }
        }

        (length, best_accept)
    }

    fn build_token(&self, state: u32, origin: usize, length: usize) -> Token {
        let data = self.module.get_state(state);
        let terminal = data.terminals().next().expect("accepting state has a terminal");
        let name = self.module.resolve_name(lrkit_core::Symbol::from_raw(terminal as u32));
        let value = String::from_utf8_lossy(&self.text_slice(origin, length)).into_owned();
        Token::new(terminal as u32, name, value, self.text.get_position_at(origin))
    }

    fn text_slice(&self, origin: usize, length: usize) -> Vec<u8> {
        (origin..origin + length)
            .map(|i| self.text.get_value(i).unwrap_or(0))
            .collect()
    }
}
