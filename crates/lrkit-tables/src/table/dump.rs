//! Human-readable table dump, for debugging and snapshot tests.

use std::fmt::Write as _;

use lrkit_core::Symbol;

use super::Module;

/// Render a summary of a module's sections: counts, DFA state table, and
/// the production list with their decoded bytecode.
pub fn dump(module: &Module) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "terminals={} variables={} dfa_states={} lr_states={} productions={}",
        module.terminal_count(),
        module.variable_count(),
        module.dfa_state_count(),
        module.lr_state_count(),
        module.production_count(),
    )
    .unwrap();

    writeln!(out, "\n-- dfa --").unwrap();
    for i in 0..module.dfa_state_count() {
        let state = module.get_state(i);
        let terminals: Vec<String> = state.terminals().map(|t| t.to_string()).collect();
        writeln!(
            out,
            "state {i}: terminals=[{}] dead_end={}",
            terminals.join(","),
            state.dead_end,
        )
        .unwrap();
    }

    writeln!(out, "\n-- productions --").unwrap();
    for i in 0..module.production_count() {
        let production = module.get_production(i);
        let ops = super::decode_all(production.bytecode);
        writeln!(
            out,
            "production {i}: head={} ({}) len={} action={:?} ops={:?}",
            production.head,
            module.resolve_name(Symbol::from_raw(module.terminal_count() + production.head)),
            production.reduction_length,
            production.head_action,
            ops,
        )
        .unwrap();
    }

    out
}
