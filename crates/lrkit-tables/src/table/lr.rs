//! LR(k) action and production tables.

use super::opcode::TreeAction;

/// What the parser driver should do for a given `(state, terminal)` pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionCode {
    Shift,
    Reduce,
    Accept,
    Error,
}

impl ActionCode {
    fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::Shift,
            1 => Self::Reduce,
            2 => Self::Accept,
            3 => Self::Error,
            _ => unreachable!("2-bit field"),
        }
    }

    fn to_bits(self) -> u32 {
        match self {
            Self::Shift => 0,
            Self::Reduce => 1,
            Self::Accept => 2,
            Self::Error => 3,
        }
    }
}

/// `{code, data}`. For `Shift`, `data` is the next state; for `Reduce`,
/// `data` is a production index. Packed into a single `u32`: the top 2
/// bits hold `code`, the low 30 bits hold `data`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LrAction {
    pub code: ActionCode,
    pub data: u32,
}

impl LrAction {
    const DATA_MASK: u32 = 0x3FFF_FFFF;

    pub fn shift(next_state: u32) -> Self {
        assert!(next_state <= Self::DATA_MASK, "next_state overflow");
        Self {
            code: ActionCode::Shift,
            data: next_state,
        }
    }

    pub fn reduce(production: u32) -> Self {
        assert!(production <= Self::DATA_MASK, "production index overflow");
        Self {
            code: ActionCode::Reduce,
            data: production,
        }
    }

    pub fn accept() -> Self {
        Self {
            code: ActionCode::Accept,
            data: 0,
        }
    }

    pub fn error() -> Self {
        Self {
            code: ActionCode::Error,
            data: 0,
        }
    }

    pub fn from_raw(word: u32) -> Self {
        Self {
            code: ActionCode::from_bits(word >> 30),
            data: word & Self::DATA_MASK,
        }
    }

    pub fn to_raw(self) -> u32 {
        (self.code.to_bits() << 30) | (self.data & Self::DATA_MASK)
    }
}

/// Read-only view of the dense action/goto table: `lr_state_count` rows of
/// `terminal_count + variable_count` columns each. Columns `0..terminal_count`
/// are ACTION entries (`Shift`/`Reduce`/`Accept`/`Error`, keyed by terminal
/// id); columns `terminal_count..` are GOTO entries (keyed by variable id,
/// offset by `terminal_count`, matching the variable-symbol convention used
/// elsewhere in this crate), always encoded as `Shift { next_state }`.
pub struct ActionsView<'a> {
    bytes: &'a [u8],
    terminal_count: u32,
    column_count: u32,
}

impl<'a> ActionsView<'a> {
    pub(crate) fn new(bytes: &'a [u8], terminal_count: u32, variable_count: u32) -> Self {
        Self {
            bytes,
            terminal_count,
            column_count: terminal_count + variable_count,
        }
    }

    pub fn get(&self, state: u32, terminal: u32) -> LrAction {
        let index = (state * self.column_count + terminal) as usize;
        let start = index * 4;
        let word = u32::from_le_bytes(self.bytes[start..start + 4].try_into().unwrap());
        LrAction::from_raw(word)
    }

    /// `goto(state, variable)`: the next state after reducing to `variable`.
    pub fn goto(&self, state: u32, variable: u32) -> u32 {
        self.get(state, self.terminal_count + variable).data
    }

    /// All terminal ids for which `get(state, t)` is not `Error`.
    pub fn expected(&self, state: u32) -> Vec<u32> {
        (0..self.terminal_count)
            .filter(|&t| self.get(state, t).code != ActionCode::Error)
            .collect()
    }
}

/// `{head, reduction_length, head_action, bytecode}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Production<'a> {
    pub head: u32,
    pub reduction_length: u16,
    pub head_action: TreeAction,
    pub bytecode: &'a [u8],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ProductionRecord {
    pub head: u32,
    pub reduction_length: u16,
    pub head_action: u8,
    pub bytecode_offset: u32,
    pub bytecode_len: u32,
}

impl ProductionRecord {
    pub(crate) const RECORD_SIZE: usize = 16;

    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            reduction_length: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
            head_action: bytes[6],
            bytecode_offset: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
            bytecode_len: u32::from_le_bytes(bytes[12..16].try_into().unwrap()),
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.head.to_le_bytes());
        out[4..6].copy_from_slice(&self.reduction_length.to_le_bytes());
        out[6] = self.head_action;
        out[8..12].copy_from_slice(&self.bytecode_offset.to_le_bytes());
        out[12..16].copy_from_slice(&self.bytecode_len.to_le_bytes());
        out
    }
}

/// Read-only view into the production table and its bytecode section.
pub struct ProductionsView<'a> {
    records: &'a [u8],
    bytecode: &'a [u8],
    count: u32,
}

impl<'a> ProductionsView<'a> {
    pub(crate) fn new(records: &'a [u8], bytecode: &'a [u8], count: u32) -> Self {
        Self {
            records,
            bytecode,
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn get(&self, index: u32) -> Production<'a> {
        let start = index as usize * ProductionRecord::RECORD_SIZE;
        let record =
            ProductionRecord::from_bytes(&self.records[start..start + ProductionRecord::RECORD_SIZE]);

        let bc_start = record.bytecode_offset as usize;
        let bc_end = bc_start + record.bytecode_len as usize;

        Production {
            head: record.head,
            reduction_length: record.reduction_length,
            head_action: TreeAction::from_byte(record.head_action),
            bytecode: &self.bytecode[bc_start..bc_end],
        }
    }
}

#[cfg(test)]
mod production_record_tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let record = ProductionRecord {
            head: 3,
            reduction_length: 2,
            head_action: TreeAction::Promote.to_byte(),
            bytecode_offset: 16,
            bytecode_len: 8,
        };
        let decoded = ProductionRecord::from_bytes(&record.to_bytes());
        assert_eq!(decoded, record);
    }
}
