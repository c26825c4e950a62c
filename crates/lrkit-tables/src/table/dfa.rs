//! In-memory view over the lexer's DFA sections of a [`super::Module`].
//!
//! A DFA state is identified by a non-negative integer and holds a
//! (possibly empty) terminals list, a dense 256-entry cached transition
//! table for the low byte of the next code unit, and an ordered bulk
//! transition list for ranges outside the cached span.

/// Sentinel meaning "no transition" for both cached and bulk lookups.
pub const DEAD_STATE: u32 = u32::MAX;

/// A `{start, end, target}` transition covering a range of code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkRange {
    pub start: u32,
    pub end: u32,
    pub target: u32,
}

impl BulkRange {
    pub const RECORD_SIZE: usize = 12;

    pub fn contains(&self, code_point: u32) -> bool {
        (self.start..=self.end).contains(&code_point)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            start: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            end: u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            target: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
        }
    }

    pub fn to_bytes(self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[0..4].copy_from_slice(&self.start.to_le_bytes());
        out[4..8].copy_from_slice(&self.end.to_le_bytes());
        out[8..12].copy_from_slice(&self.target.to_le_bytes());
        out
    }
}

/// A single DFA state's metadata, decoded from its 16-byte record.
///
/// Layout: `terminals_offset: u32`, `terminals_count: u16`,
/// `bulk_offset: u32`, `bulk_count: u16`, `dead_end: u8`, 1 byte padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateRecord {
    pub terminals_offset: u32,
    pub terminals_count: u16,
    pub bulk_offset: u32,
    pub bulk_count: u16,
    pub dead_end: bool,
}

impl StateRecord {
    pub const RECORD_SIZE: usize = 16;

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            terminals_offset: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            terminals_count: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
            bulk_offset: u32::from_le_bytes(bytes[6..10].try_into().unwrap()),
            bulk_count: u16::from_le_bytes(bytes[10..12].try_into().unwrap()),
            dead_end: bytes[12] != 0,
        }
    }

    pub fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.terminals_offset.to_le_bytes());
        out[4..6].copy_from_slice(&self.terminals_count.to_le_bytes());
        out[6..10].copy_from_slice(&self.bulk_offset.to_le_bytes());
        out[10..12].copy_from_slice(&self.bulk_count.to_le_bytes());
        out[12] = self.dead_end as u8;
        out
    }
}

/// Borrowed view of a single DFA state, handed back by [`DfaView::get_state`].
///
/// `cached` is the raw 1024-byte (256 × u32) little-endian transition
/// section for this state; use [`Self::cached_transition`] rather than
/// decoding it by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateData<'a> {
    terminal_bytes: &'a [u8],
    cached: &'a [u8],
    pub bulk_ranges: Vec<BulkRange>,
    pub dead_end: bool,
}

impl<'a> StateData<'a> {
    pub fn terminals_count(&self) -> usize {
        self.terminal_bytes.len() / 2
    }

    pub fn terminals(&self) -> impl Iterator<Item = u16> + 'a {
        let bytes = self.terminal_bytes;
        (0..bytes.len() / 2).map(move |i| u16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]))
    }

    pub fn cached_transition(&self, byte: u8) -> u32 {
        let start = byte as usize * 4;
        u32::from_le_bytes(self.cached[start..start + 4].try_into().unwrap())
    }

    /// Look up the target state for a code point, first via the cached
    /// 256-entry table, then falling back to the bulk ranges.
    pub fn transition(&self, code_point: u32) -> u32 {
        if code_point < 256 {
            let target = self.cached_transition(code_point as u8);
            if target != DEAD_STATE {
                return target;
            }
        }
        for range in &self.bulk_ranges {
            if range.contains(code_point) {
                return range.target;
            }
        }
        DEAD_STATE
    }

    pub fn is_accepting(&self) -> bool {
        !self.terminal_bytes.is_empty()
    }
}

/// Read-only view into the DFA sections of a table's byte blob.
pub struct DfaView<'a> {
    states: &'a [u8],
    terminal_ids: &'a [u8],
    transitions: &'a [u8],
    bulk_ranges: &'a [u8],
    state_count: u32,
}

impl<'a> DfaView<'a> {
    pub(crate) fn new(
        states: &'a [u8],
        terminal_ids: &'a [u8],
        transitions: &'a [u8],
        bulk_ranges: &'a [u8],
        state_count: u32,
    ) -> Self {
        Self {
            states,
            terminal_ids,
            transitions,
            bulk_ranges,
            state_count,
        }
    }

    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    /// Decode state `index`. Panics if `index` is out of range; an
    /// out-of-range state index is a malformed-table bug, not user input.
    pub fn get_state(&self, index: u32) -> StateData<'a> {
        let record_start = index as usize * StateRecord::RECORD_SIZE;
        let record = StateRecord::from_bytes(
            &self.states[record_start..record_start + StateRecord::RECORD_SIZE],
        );

        let terminals_start = record.terminals_offset as usize * 2;
        let terminals_end = terminals_start + record.terminals_count as usize * 2;
        let terminal_bytes = &self.terminal_ids[terminals_start..terminals_end];

        let cached_start = index as usize * 256 * 4;
        let cached = &self.transitions[cached_start..cached_start + 256 * 4];

        let bulk_start = record.bulk_offset as usize * BulkRange::RECORD_SIZE;
        let bulk_ranges = (0..record.bulk_count as usize)
            .map(|i| {
                let start = bulk_start + i * BulkRange::RECORD_SIZE;
                BulkRange::from_bytes(&self.bulk_ranges[start..start + BulkRange::RECORD_SIZE])
            })
            .collect();

        StateData {
            terminal_bytes,
            cached,
            bulk_ranges,
            dead_end: record.dead_end,
        }
    }
}
