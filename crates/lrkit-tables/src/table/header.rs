//! Table file header (64 bytes).
//!
//! Section order: Header → NameBlob → NameOffsets → DfaStates →
//! DfaTerminalIds → DfaTransitions → DfaBulkRanges → Actions →
//! Productions → Bytecode

use super::{MAGIC, SECTION_ALIGN, VERSION};

/// File header — first 64 bytes of a table file.
///
/// - 0-23: identity and sizes (magic, version, checksum, total_size, name_blob_size, bytecode_size)
/// - 24-59: counts (9 × u32) — order matches section order
/// - 60-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Header {
    /// Magic bytes: `b"LRKT"`.
    pub magic: [u8; 4],
    /// Format version (currently 1).
    pub version: u32,
    /// CRC32 checksum of everything after the header.
    pub checksum: u32,
    /// Total file size in bytes.
    pub total_size: u32,
    /// Size of the interned name blob in bytes.
    pub name_blob_size: u32,
    /// Size of the reduction bytecode section in bytes.
    pub bytecode_size: u32,

    pub name_count: u32,
    pub terminal_count: u32,
    pub variable_count: u32,
    pub dfa_state_count: u32,
    pub dfa_terminal_id_count: u32,
    pub dfa_bulk_range_count: u32,
    pub lr_state_count: u32,
    pub production_count: u32,

    pub _reserved: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<Header>() == 64);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            name_blob_size: 0,
            bytecode_size: 0,
            name_count: 0,
            terminal_count: 0,
            variable_count: 0,
            dfa_state_count: 0,
            dfa_terminal_id_count: 0,
            dfa_bulk_range_count: 0,
            lr_state_count: 0,
            production_count: 0,
            _reserved: [0; 4],
        }
    }
}

/// Computed section offsets derived from header counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub name_blob: u32,
    pub name_offsets: u32,
    pub dfa_states: u32,
    pub dfa_terminal_ids: u32,
    pub dfa_transitions: u32,
    pub dfa_bulk_ranges: u32,
    pub actions: u32,
    pub productions: u32,
    pub bytecode: u32,
}

/// Byte size of a single `DfaState` record (see `table::dfa`).
pub const DFA_STATE_RECORD_SIZE: u32 = 16;
/// Byte size of a single bulk transition range record.
pub const BULK_RANGE_RECORD_SIZE: u32 = 12;
/// Byte size of one cached transition entry (one `u32` target per byte value).
pub const CACHED_TRANSITION_SIZE: u32 = 4;
/// Byte size of one dense LR action entry (one bit-packed `u32`).
pub const ACTION_SIZE: u32 = 4;
/// Byte size of a single `Production` record (see `table::lr`).
pub const PRODUCTION_RECORD_SIZE: u32 = 16;
/// Byte size of one interned-name offset entry.
pub const NAME_OFFSET_SIZE: u32 = 4;
/// Byte size of one DFA terminal id entry.
pub const DFA_TERMINAL_ID_SIZE: u32 = 2;

impl Header {
    /// Decode header from 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= 64, "header too short");

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            checksum: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            total_size: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            name_blob_size: u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            bytecode_size: u32::from_le_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]),
            name_count: u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            terminal_count: u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
            variable_count: u32::from_le_bytes([bytes[32], bytes[33], bytes[34], bytes[35]]),
            dfa_state_count: u32::from_le_bytes([bytes[36], bytes[37], bytes[38], bytes[39]]),
            dfa_terminal_id_count: u32::from_le_bytes([
                bytes[40], bytes[41], bytes[42], bytes[43],
            ]),
            dfa_bulk_range_count: u32::from_le_bytes([
                bytes[44], bytes[45], bytes[46], bytes[47],
            ]),
            lr_state_count: u32::from_le_bytes([bytes[48], bytes[49], bytes[50], bytes[51]]),
            production_count: u32::from_le_bytes([bytes[52], bytes[53], bytes[54], bytes[55]]),
            _reserved: [bytes[56], bytes[57], bytes[58], bytes[59]],
        }
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.name_blob_size.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.bytecode_size.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.name_count.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.terminal_count.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.variable_count.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.dfa_state_count.to_le_bytes());
        bytes[40..44].copy_from_slice(&self.dfa_terminal_id_count.to_le_bytes());
        bytes[44..48].copy_from_slice(&self.dfa_bulk_range_count.to_le_bytes());
        bytes[48..52].copy_from_slice(&self.lr_state_count.to_le_bytes());
        bytes[52..56].copy_from_slice(&self.production_count.to_le_bytes());
        bytes[56..60].copy_from_slice(&self._reserved);
        // bytes 60..64 stay zero, reserved for future use.
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Compute section offsets from counts and blob sizes.
    ///
    /// All sections are 64-byte aligned.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let align = SECTION_ALIGN as u32;

        let name_blob = align;
        let name_offsets = align_up(name_blob + self.name_blob_size, align);
        let name_offsets_size = (self.name_count + 1) * NAME_OFFSET_SIZE;

        let dfa_states = align_up(name_offsets + name_offsets_size, align);
        let dfa_states_size = self.dfa_state_count * DFA_STATE_RECORD_SIZE;

        let dfa_terminal_ids = align_up(dfa_states + dfa_states_size, align);
        let dfa_terminal_ids_size = self.dfa_terminal_id_count * DFA_TERMINAL_ID_SIZE;

        let dfa_transitions = align_up(dfa_terminal_ids + dfa_terminal_ids_size, align);
        let dfa_transitions_size = self.dfa_state_count * 256 * CACHED_TRANSITION_SIZE;

        let dfa_bulk_ranges = align_up(dfa_transitions + dfa_transitions_size, align);
        let dfa_bulk_ranges_size = self.dfa_bulk_range_count * BULK_RANGE_RECORD_SIZE;

        let actions = align_up(dfa_bulk_ranges + dfa_bulk_ranges_size, align);
        let actions_size =
            self.lr_state_count * (self.terminal_count + self.variable_count) * ACTION_SIZE;

        let productions = align_up(actions + actions_size, align);
        let productions_size = self.production_count * PRODUCTION_RECORD_SIZE;

        let bytecode = align_up(productions + productions_size, align);

        SectionOffsets {
            name_blob,
            name_offsets,
            dfa_states,
            dfa_terminal_ids,
            dfa_transitions,
            dfa_bulk_ranges,
            actions,
            productions,
            bytecode,
        }
    }
}

/// Round up to the next multiple of `align`.
pub fn align_up(value: u32, align: u32) -> u32 {
    (value + align - 1) & !(align - 1)
}
