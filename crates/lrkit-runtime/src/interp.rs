//! Reduction bytecode interpreter (§4.G).

use lrkit_tables::{decode_all, Opcode, Production};

use crate::tree::{SemanticAction, TreeBuilder};

/// Run `production`'s bytecode against `builder`, producing one new head.
///
/// Opcode sequences are not validated: a malformed bytecode stream (an
/// out-of-range `action_index`, or a `PopStack` beyond the prepared body)
/// is a table-generator bug and panics rather than returning an error.
pub fn run_reduction(
    production: &Production<'_>,
    builder: &mut TreeBuilder,
    actions: &[Box<SemanticAction>],
) {
    builder.reduction_prepare(production.reduction_length as usize);

    for op in decode_all(production.bytecode) {
        match op {
            Opcode::PopStack(action) => builder.reduction_pop(action),
            Opcode::AddVirtual { virtual_index, action } => {
                builder.reduction_virtual(virtual_index, action)
            }
            Opcode::SemAction { action_index } => {
                let action = actions
                    .get(action_index as usize)
                    .unwrap_or_else(|| panic!("semantic action index {action_index} out of range"));
                builder.reduction_semantic(action.as_ref());
            }
        }
    }

    builder.reduce(production.head, production.head_action);
}
