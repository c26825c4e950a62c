//! Hand-assembly of a table's binary bytes.
//!
//! There is no grammar compiler in this crate (see the crate's Non-goals):
//! this builder exists so tests — and any host that already has its own
//! automaton construction — can assemble a well-formed [`super::Module`]
//! byte-for-byte without one. It performs no grammar analysis; callers
//! supply fully-resolved DFA states, actions and productions directly.

use lrkit_core::Interner;

use super::dfa::{BulkRange, StateRecord};
use super::header::{align_up, Header};
use super::lr::{LrAction, ProductionRecord};
use super::opcode::Opcode;
use super::{MAGIC, SECTION_ALIGN, VERSION};

#[derive(Clone)]
pub struct DfaStateSpec {
    pub terminals: Vec<u16>,
    pub cached: [u32; 256],
    pub bulk: Vec<BulkRange>,
    pub dead_end: bool,
}

pub struct ProductionSpec {
    pub head: u32,
    pub reduction_length: u16,
    pub head_action: super::opcode::TreeAction,
    pub bytecode: Vec<Opcode>,
}

/// Assembles the byte sections for a table and its header.
pub struct ModuleBuilder {
    names: Interner,
    terminal_count: u32,
    variable_count: u32,
    dfa_states: Vec<DfaStateSpec>,
    actions: Vec<LrAction>,
    productions: Vec<ProductionSpec>,
}

impl ModuleBuilder {
    pub fn new(terminal_names: &[&str], variable_names: &[&str]) -> Self {
        let mut names = Interner::new();
        for name in terminal_names {
            names.intern(name);
        }
        for name in variable_names {
            names.intern(name);
        }
        Self {
            names,
            terminal_count: terminal_names.len() as u32,
            variable_count: variable_names.len() as u32,
            dfa_states: Vec::new(),
            actions: Vec::new(),
            productions: Vec::new(),
        }
    }

    pub fn add_dfa_state(&mut self, spec: DfaStateSpec) -> u32 {
        self.dfa_states.push(spec);
        self.dfa_states.len() as u32 - 1
    }

    /// Set the dense action/goto table. `actions.len()` must equal
    /// `lr_state_count * (terminal_count + variable_count)`, row-major by
    /// state, terminal columns first then variable (GOTO) columns.
    pub fn set_actions(&mut self, actions: Vec<LrAction>) {
        self.actions = actions;
    }

    pub fn add_production(&mut self, spec: ProductionSpec) -> u32 {
        self.productions.push(spec);
        self.productions.len() as u32 - 1
    }

    pub fn build(self) -> Vec<u8> {
        let align = SECTION_ALIGN as u32;
        let (name_blob, name_offsets) = self.names.to_blob();
        let name_count = self.names.len() as u32;

        let mut dfa_terminal_ids = Vec::new();
        let mut dfa_bulk_ranges = Vec::new();
        let mut dfa_transitions = Vec::new();
        let mut dfa_state_records = Vec::new();

        for state in &self.dfa_states {
            let terminals_offset = (dfa_terminal_ids.len() / 2) as u32;
            for &t in &state.terminals {
                dfa_terminal_ids.extend_from_slice(&t.to_le_bytes());
            }

            let bulk_offset = (dfa_bulk_ranges.len() / BulkRange::RECORD_SIZE) as u32;
            for range in &state.bulk {
                dfa_bulk_ranges.extend_from_slice(&range.to_bytes());
            }

            for target in state.cached {
                dfa_transitions.extend_from_slice(&target.to_le_bytes());
            }

            let record = StateRecord {
                terminals_offset,
                terminals_count: state.terminals.len() as u16,
                bulk_offset,
                bulk_count: state.bulk.len() as u16,
                dead_end: state.dead_end,
            };
            dfa_state_records.extend_from_slice(&record.to_bytes());
        }

        let columns = self.terminal_count + self.variable_count;
        let lr_state_count = if columns == 0 { 0 } else { self.actions.len() as u32 / columns };

        let mut action_bytes = Vec::with_capacity(self.actions.len() * 4);
        for action in &self.actions {
            action_bytes.extend_from_slice(&action.to_raw().to_le_bytes());
        }

        let mut production_records = Vec::new();
        let mut bytecode = Vec::new();
        for production in &self.productions {
            let bytecode_offset = bytecode.len() as u32;
            for op in &production.bytecode {
                op.encode(&mut bytecode);
            }
            let bytecode_len = bytecode.len() as u32 - bytecode_offset;

            let rec = ProductionRecord {
                head: production.head,
                reduction_length: production.reduction_length,
                head_action: production.head_action.to_byte(),
                bytecode_offset,
                bytecode_len,
            };
            production_records.extend_from_slice(&rec.to_bytes());
        }

        let header = Header {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            name_blob_size: name_blob.len() as u32,
            bytecode_size: bytecode.len() as u32,
            name_count,
            terminal_count: self.terminal_count,
            variable_count: self.variable_count,
            dfa_state_count: self.dfa_states.len() as u32,
            dfa_terminal_id_count: (dfa_terminal_ids.len() / 2) as u32,
            dfa_bulk_range_count: (dfa_bulk_ranges.len() / BulkRange::RECORD_SIZE) as u32,
            lr_state_count,
            production_count: self.productions.len() as u32,
            _reserved: [0; 4],
        };

        let offsets = header.compute_offsets();
        let total_size = align_up(offsets.bytecode + header.bytecode_size, align);

        let mut out = vec![0u8; total_size as usize];
        let mut place = |offset: u32, data: &[u8]| {
            let start = offset as usize;
            out[start..start + data.len()].copy_from_slice(data);
        };

        place(offsets.name_blob, &name_blob);
        let mut offsets_bytes = Vec::with_capacity(name_offsets.len() * 4);
        for o in &name_offsets {
            offsets_bytes.extend_from_slice(&o.to_le_bytes());
        }
        place(offsets.name_offsets, &offsets_bytes);
        place(offsets.dfa_states, &dfa_state_records);
        place(offsets.dfa_terminal_ids, &dfa_terminal_ids);
        place(offsets.dfa_transitions, &dfa_transitions);
        place(offsets.dfa_bulk_ranges, &dfa_bulk_ranges);
        place(offsets.actions, &action_bytes);
        place(offsets.productions, &production_records);
        place(offsets.bytecode, &bytecode);

        let mut header = header;
        header.total_size = total_size;
        let header_bytes = header.to_bytes();
        header.checksum = super::checksum::checksum_body(&header_bytes, &out[64..]);
        out[0..64].copy_from_slice(&header.to_bytes());

        out
    }
}
