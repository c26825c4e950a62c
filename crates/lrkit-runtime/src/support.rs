//! Hand-assembled tables shared by this crate's test modules.
//!
//! There's no grammar compiler here (see the crate's Non-goals), so test
//! fixtures are built directly with `lrkit_tables::ModuleBuilder`. The
//! lexer always starts its DFA walk at state 0, so every fixture below
//! inserts its start state first and references later states by the fixed
//! index they're known to receive next.

use lrkit_tables::{
    BulkRange, DfaStateSpec, LrAction, Module, ModuleBuilder, Opcode, ProductionSpec, TreeAction,
    DEAD_STATE,
};

fn dead_state() -> DfaStateSpec {
    DfaStateSpec {
        terminals: vec![],
        cached: [DEAD_STATE; 256],
        bulk: vec![],
        dead_end: true,
    }
}

/// A DFA with a single terminal `"if"`, accepting only the literal text
/// `if` (S3/S4 fixtures). State 0 is the start state, 1 is mid-match, 2 is
/// the accepting state.
pub fn if_module() -> Module {
    let mut builder = ModuleBuilder::new(&["if"], &[]);

    let mut start_cached = [DEAD_STATE; 256];
    start_cached[b'i' as usize] = 1;
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![],
        cached: start_cached,
        bulk: vec![],
        dead_end: false,
    });

    let mut mid_cached = [DEAD_STATE; 256];
    mid_cached[b'f' as usize] = 2;
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![],
        cached: mid_cached,
        bulk: vec![],
        dead_end: false,
    });

    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![0],
        ..dead_state()
    });

    let bytes = builder.build();
    Module::from_bytes(&bytes).expect("well-formed test module")
}

/// Builds a grammar fixture on a one-state-per-terminal DFA: state 0 is the
/// shared start state, whose cached table routes each literal character
/// directly to its own accepting state (states `1..=terminal_chars.len()`,
/// in the same order as `terminal_chars`).
///
/// The lexer never runs the DFA to produce an end-of-input token (see
/// `Lexer::next_token`), so the fixture appends a terminal for it directly:
/// by convention it's always the last terminal, at `eof_terminal()`.
pub struct GrammarFixture {
    builder: ModuleBuilder,
    eof_terminal: u32,
}

impl GrammarFixture {
    pub fn new(terminal_chars: &[char], variable_names: &[&str]) -> Self {
        let mut terminal_names: Vec<String> = terminal_chars.iter().map(|c| c.to_string()).collect();
        terminal_names.push("$".to_string());
        let eof_terminal = terminal_chars.len() as u32;
        let terminal_refs: Vec<&str> = terminal_names.iter().map(|s| s.as_str()).collect();
        let mut builder = ModuleBuilder::new(&terminal_refs, variable_names);

        let mut start_cached = [DEAD_STATE; 256];
        for (i, &c) in terminal_chars.iter().enumerate() {
            start_cached[c as u8 as usize] = (i + 1) as u32;
        }
        builder.add_dfa_state(DfaStateSpec {
            terminals: vec![],
            cached: start_cached,
            bulk: vec![],
            dead_end: false,
        });

        for (i, _) in terminal_chars.iter().enumerate() {
            builder.add_dfa_state(DfaStateSpec {
                terminals: vec![i as u16],
                ..dead_state()
            });
        }

        Self { builder, eof_terminal }
    }

    /// The terminal id conventionally assigned to end-of-input: the column
    /// an accepting LR state's ACTION row must hold `Accept` under.
    pub fn eof_terminal(&self) -> u32 {
        self.eof_terminal
    }

    pub fn set_actions(&mut self, actions: Vec<LrAction>) {
        self.builder.set_actions(actions);
    }

    pub fn add_production(
        &mut self,
        head: u32,
        reduction_length: u16,
        head_action: TreeAction,
        bytecode: Vec<Opcode>,
    ) -> u32 {
        self.builder.add_production(ProductionSpec {
            head,
            reduction_length,
            head_action,
            bytecode,
        })
    }

    pub fn build(self) -> Module {
        let bytes = self.builder.build();
        Module::from_bytes(&bytes).expect("well-formed test module")
    }
}

pub fn bulk_range(start: u32, end: u32, target: u32) -> BulkRange {
    BulkRange { start, end, target }
}
