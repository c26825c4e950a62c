//! Reduction bytecode: the opcode stream a [`Production`](super::lr::Production)
//! carries and the reduction interpreter dispatches against the tree builder.
//!
//! Bytecode is a flat sequence of little-endian `u32` words. Every
//! instruction starts with a tag word; `AddVirtual` and `SemAction` are
//! followed by exactly one operand word.

/// How the builder folds a popped subtree into its parent during a reduction.
///
/// Encoded in the low 2 bits of an opcode's tag byte (bits 2-3 of the tag
/// word's low byte, alongside the opcode kind in bits 0-1).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TreeAction {
    #[default]
    None,
    Drop,
    Promote,
    ReplaceByChildren,
}

impl TreeAction {
    pub fn from_byte(b: u8) -> Self {
        match b & 0b11 {
            0 => Self::None,
            1 => Self::Drop,
            2 => Self::Promote,
            3 => Self::ReplaceByChildren,
            _ => unreachable!("2-bit field"),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Drop => 1,
            Self::Promote => 2,
            Self::ReplaceByChildren => 3,
        }
    }
}

/// One reduction opcode.
///
/// `AddVirtual` and `SemAction` consume one following operand word, per the
/// table format's invariant that every instruction is one or two words.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    PopStack(TreeAction),
    AddVirtual { virtual_index: u32, action: TreeAction },
    SemAction { action_index: u32 },
}

const KIND_POP_STACK: u8 = 0;
const KIND_ADD_VIRTUAL: u8 = 1;
const KIND_SEM_ACTION: u8 = 2;

impl Opcode {
    /// Encode the tag byte for this opcode: bits 0-1 kind, bits 2-3 tree
    /// action (zero for `SemAction`, which carries none).
    fn tag_byte(self) -> u8 {
        match self {
            Self::PopStack(action) => KIND_POP_STACK | (action.to_byte() << 2),
            Self::AddVirtual { action, .. } => KIND_ADD_VIRTUAL | (action.to_byte() << 2),
            Self::SemAction { .. } => KIND_SEM_ACTION,
        }
    }

    /// Number of `u32` words this instruction occupies in the bytecode stream.
    pub fn word_count(self) -> usize {
        match self {
            Self::PopStack(_) => 1,
            Self::AddVirtual { .. } | Self::SemAction { .. } => 2,
        }
    }

    /// Append this instruction's words (little-endian) to `out`.
    pub fn encode(self, out: &mut Vec<u8>) {
        let tag_word = self.tag_byte() as u32;
        out.extend_from_slice(&tag_word.to_le_bytes());
        match self {
            Self::PopStack(_) => {}
            Self::AddVirtual { virtual_index, .. } => {
                out.extend_from_slice(&virtual_index.to_le_bytes());
            }
            Self::SemAction { action_index } => {
                out.extend_from_slice(&action_index.to_le_bytes());
            }
        }
    }

    /// Decode one instruction starting at `bytes[0..]`. Returns the opcode
    /// and the number of bytes consumed (4 or 8).
    ///
    /// # Panics
    /// Panics on an unrecognized kind tag or a truncated operand; malformed
    /// bytecode is a table-generator bug, not a recoverable runtime error.
    pub fn decode(bytes: &[u8]) -> (Self, usize) {
        let tag_word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let tag_byte = tag_word as u8;
        let kind = tag_byte & 0b11;
        let action = TreeAction::from_byte(tag_byte >> 2);

        match kind {
            KIND_POP_STACK => (Self::PopStack(action), 4),
            KIND_ADD_VIRTUAL => {
                let virtual_index = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
                (
                    Self::AddVirtual {
                        virtual_index,
                        action,
                    },
                    8,
                )
            }
            KIND_SEM_ACTION => {
                let action_index = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
                (Self::SemAction { action_index }, 8)
            }
            _ => panic!("invalid opcode kind: {kind}"),
        }
    }
}

/// Iterate the opcodes of a production's bytecode slice in order.
pub fn decode_all(bytecode: &[u8]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let mut pos = 0;
    while pos < bytecode.len() {
        let (op, consumed) = Opcode::decode(&bytecode[pos..]);
        ops.push(op);
        pos += consumed;
    }
    ops
}
