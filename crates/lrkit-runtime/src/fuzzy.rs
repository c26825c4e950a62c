//! Bounded Levenshtein-distance recovery for the lexer (§4.E).
//!
//! Given an origin index into the input and a maximum edit distance, finds
//! the DFA match that minimizes total edits and, among minimizers, consumes
//! the most input. Every synthesized edit is reported, in input order, as
//! the search concludes.

use lrkit_tables::{Module, DEAD_STATE};

use crate::error::ParseError;
use crate::text::TextBuffer;
use crate::trace::Tracer;

/// Result of a fuzzy search: the accepting state reached and the number of
/// input code units consumed to reach it.
#[derive(Clone, Copy, Debug)]
pub struct TokenMatch {
    pub state: u32,
    pub length: usize,
}

/// A single frontier node. `prev` is an arena index, not a pointer, so the
/// whole search can be torn down in bulk once a match (or non-match) has
/// been reported (§9: "back-linked search chain").
struct Node {
    prev: Option<usize>,
    state: u32,
    length: usize,
    distance: u32,
    error: Option<ParseError>,
}

/// Per-lexer-error-event fuzzy search. Instantiated fresh for each recovery
/// attempt and discarded once it produces a [`TokenMatch`].
pub struct FuzzyMatcher<'a> {
    module: &'a Module,
    max_distance: u32,
    arena: Vec<Node>,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(module: &'a Module, max_distance: u32) -> Self {
        Self {
            module,
            max_distance,
            arena: Vec::new(),
        }
    }

    /// Run the search starting at `origin` against `text`, reporting every
    /// synthesized edit (in input order) through `on_error`.
    pub fn find_match<T: Tracer>(
        &mut self,
        origin: usize,
        text: &TextBuffer<'_>,
        on_error: &mut dyn FnMut(ParseError),
        tracer: &mut T,
    ) -> TokenMatch {
        self.arena.clear();
        self.arena.push(Node {
            prev: None,
            state: 0,
            length: 0,
            distance: 0,
            error: None,
        });

        let mut best: Option<usize> = None;
        let mut index = 0;

        while index < self.arena.len() {
            let (state, length, distance) = {
                let n = &self.arena[index];
                (n.state, n.length, n.distance)
            };

            tracer.on_fuzzy_node(state, length, distance);

            let idx = origin + length;
            let at_end = text.is_end(idx);
            let cur = if at_end { 0 } else { text.get_value(idx).unwrap() as u32 };
            let data = self.module.get_state(state);

            // 1. Accept book-keeping.
            if data.terminals_count() > 0 {
                best = Some(match best {
                    None => index,
                    Some(b) => {
                        let bn = &self.arena[b];
                        if distance < bn.distance || (distance == bn.distance && length > bn.length) {
                            index
                        } else {
                            b
                        }
                    }
                });
            }

            // 2. Drop the next input code unit (delete).
            if !at_end && distance < self.max_distance {
                self.try_enqueue(Node {
                    prev: Some(index),
                    state,
                    length: length + 1,
                    distance: distance + 1,
                    error: Some(char_error(cur, text.get_position_at(idx))),
                });
            }

            // 3. Transitions from `s`, unless dead-end (rule 4: drop still applies above).
            if !data.dead_end {
                for byte in 0u16..256 {
                    let target = data.cached_transition(byte as u8);
                    if target != DEAD_STATE {
                        let matched = !at_end && cur == byte as u32;
                        self.expand_transition(index, target, matched, cur, at_end, length, distance, idx, text);
                    }
                }
                for range in &data.bulk_ranges {
                    let matched = !at_end && range.contains(cur);
                    self.expand_transition(index, range.target, matched, cur, at_end, length, distance, idx, text);
                }
            }

            index += 1;
        }

        match best {
            Some(idx) => self.finish(idx, on_error, tracer),
            None => {
                let pos = text.get_position_at(origin);
                let found = if text.is_end(origin) {
                    String::new()
                } else {
                    (text.get_value(origin).unwrap() as char).to_string()
                };
                tracer.on_unexpected_char(&found, pos.line, pos.column);
                on_error(ParseError::UnexpectedChar { found, position: pos });
                TokenMatch { state: 0, length: 0 }
            }
        }
    }

    /// Expand a single transition `t` from the node at `index` into its
    /// match/replace/insert successors.
    #[allow(clippy::too_many_arguments)]
    fn expand_transition(
        &mut self,
        index: usize,
        target: u32,
        matched: bool,
        cur: u32,
        at_end: bool,
        length: usize,
        distance: u32,
        idx: usize,
        text: &TextBuffer<'_>,
    ) {
        // Match: no edit.
        if matched {
            self.try_enqueue(Node {
                prev: Some(index),
                state: target,
                length: length + 1,
                distance,
                error: None,
            });
        }
        // Replace: substitute the current code unit.
        if distance < self.max_distance && !at_end {
            self.try_enqueue(Node {
                prev: Some(index),
                state: target,
                length: length + 1,
                distance: distance + 1,
                error: Some(char_error(cur, text.get_position_at(idx))),
            });
        }
        // Insert: an expected code unit, without consuming input.
        if distance < self.max_distance {
            let found = if at_end { 0 } else { cur };
            self.try_enqueue(Node {
                prev: Some(index),
                state: target,
                length,
                distance: distance + 1,
                error: Some(insert_error(at_end, found, text.get_position_at(idx))),
            });
        }
    }

    /// Apply same-state dominance pruning (§4.E) before appending `node`.
    ///
    /// Compares only `(state, length, distance)` against existing entries
    /// for the same `state`, scanning newest-first — a deliberate
    /// approximation, not a full Pareto frontier across all states (§9,
    /// Open Questions). It can leave some dominated nodes enqueued, but
    /// that never affects correctness: the accept-bookkeeping step
    /// considers every visited node regardless of this pruning.
    fn try_enqueue(&mut self, node: Node) {
        for existing in self.arena.iter().rev() {
            if existing.state != node.state {
                continue;
            }
            if node.length < existing.length {
                return;
            }
            if node.length == existing.length && node.distance >= existing.distance {
                return;
            }
        }
        self.arena.push(node);
    }

    fn finish<T: Tracer>(&mut self, best_idx: usize, on_error: &mut dyn FnMut(ParseError), tracer: &mut T) -> TokenMatch {
        let mut errors = Vec::new();
        let mut cur = Some(best_idx);
        while let Some(i) = cur {
            let n = &self.arena[i];
            if let Some(e) = &n.error {
                errors.push(e.clone());
            }
            cur = n.prev;
        }
        errors.reverse();
        for e in errors {
            if let ParseError::UnexpectedChar { found, position } = &e {
                tracer.on_unexpected_char(found, position.line, position.column);
            }
            on_error(e);
        }
        let n = &self.arena[best_idx];
        TokenMatch { state: n.state, length: n.length }
    }
}

fn char_error(cur: u32, position: lrkit_core::Position) -> ParseError {
    ParseError::UnexpectedChar {
        found: (cur as u8 as char).to_string(),
        position,
    }
}

/// The "insert expected terminal" edit reports the error at the *current*
/// input position even though nothing was consumed (§9, Open Questions:
/// this is the specified, intentionally preserved behavior).
fn insert_error(at_end: bool, cur: u32, position: lrkit_core::Position) -> ParseError {
    ParseError::UnexpectedChar {
        found: if at_end { String::new() } else { (cur as u8 as char).to_string() },
        position,
    }
}
