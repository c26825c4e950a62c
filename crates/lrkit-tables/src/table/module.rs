//! The loaded, in-memory table: automaton tables (component A) over a
//! validated byte blob.

use lrkit_core::Symbol;

use super::checksum::checksum_body;
use super::dfa::DfaView;
use super::header::Header;
use super::lr::{ActionsView, LrAction, ProductionsView};
use super::names::NamesView;
use super::AlignedVec;

/// Fatal, initialization-time errors from loading a table file.
///
/// Distinct from `lrkit_runtime::ParseError`: these abort construction of a
/// [`Module`] before any parsing can happen, and are never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid magic: expected {expected:?}, found {found:?}")]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },
    #[error("unsupported table version {found} (max supported {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },
    #[error("table file too small: need at least {needed} bytes, found {found}")]
    FileTooSmall { needed: usize, found: usize },
    #[error("declared size {declared} does not match actual size {actual}")]
    SizeMismatch { declared: u32, actual: usize },
    #[error("checksum mismatch: table file is corrupt")]
    ChecksumMismatch,
}

/// A loaded, frozen table. Never mutated after construction; §5 permits
/// sharing one `Module` across concurrently running parses.
pub struct Module {
    bytes: AlignedVec,
    header: Header,
    offsets: super::header::SectionOffsets,
}

impl Module {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModuleError> {
        if bytes.len() < 64 {
            return Err(ModuleError::FileTooSmall {
                needed: 64,
                found: bytes.len(),
            });
        }

        let header = Header::from_bytes(bytes);
        if !header.validate_magic() {
            return Err(ModuleError::InvalidMagic {
                expected: super::MAGIC,
                found: header.magic,
            });
        }
        if !header.validate_version() {
            return Err(ModuleError::UnsupportedVersion {
                found: header.version,
                max_supported: super::VERSION,
            });
        }
        if header.total_size as usize != bytes.len() {
            return Err(ModuleError::SizeMismatch {
                declared: header.total_size,
                actual: bytes.len(),
            });
        }

        let header_bytes = header.to_bytes();
        let computed = checksum_body(&header_bytes, &bytes[64..]);
        if computed != header.checksum {
            return Err(ModuleError::ChecksumMismatch);
        }

        let offsets = header.compute_offsets();
        Ok(Self {
            bytes: AlignedVec::copy_from_slice(bytes),
            header,
            offsets,
        })
    }

    fn section(&self, start: u32, len: u32) -> &[u8] {
        let start = start as usize;
        &self.bytes.as_slice()[start..start + len as usize]
    }

    pub fn terminal_count(&self) -> u32 {
        self.header.terminal_count
    }

    pub fn variable_count(&self) -> u32 {
        self.header.variable_count
    }

    pub fn dfa_state_count(&self) -> u32 {
        self.header.dfa_state_count
    }

    pub fn lr_state_count(&self) -> u32 {
        self.header.lr_state_count
    }

    pub fn production_count(&self) -> u32 {
        self.header.production_count
    }

    pub fn names(&self) -> NamesView<'_> {
        let blob = self.section(self.offsets.name_blob, self.header.name_blob_size);
        let offsets_len = (self.header.name_count + 1) * 4;
        let offsets = self.section(self.offsets.name_offsets, offsets_len);
        NamesView::new(blob, offsets, self.header.name_count)
    }

    pub fn resolve_name(&self, symbol: Symbol) -> &str {
        self.names().resolve(symbol)
    }

    fn dfa_view(&self) -> DfaView<'_> {
        let states_len = self.header.dfa_state_count * super::dfa::StateRecord::RECORD_SIZE as u32;
        let terminal_ids_len = self.header.dfa_terminal_id_count * 2;
        let transitions_len = self.header.dfa_state_count * 256 * 4;
        let bulk_len =
            self.header.dfa_bulk_range_count * super::dfa::BulkRange::RECORD_SIZE as u32;

        DfaView::new(
            self.section(self.offsets.dfa_states, states_len),
            self.section(self.offsets.dfa_terminal_ids, terminal_ids_len),
            self.section(self.offsets.dfa_transitions, transitions_len),
            self.section(self.offsets.dfa_bulk_ranges, bulk_len),
            self.header.dfa_state_count,
        )
    }

    /// `getState(i)` of §4.A.
    pub fn get_state(&self, index: u32) -> super::dfa::StateData<'_> {
        self.dfa_view().get_state(index)
    }

    fn actions_view(&self) -> ActionsView<'_> {
        let columns = self.header.terminal_count + self.header.variable_count;
        let len = self.header.lr_state_count * columns * 4;
        ActionsView::new(
            self.section(self.offsets.actions, len),
            self.header.terminal_count,
            self.header.variable_count,
        )
    }

    /// `getAction(state, terminal)` of §4.A/§4.F.
    pub fn get_action(&self, state: u32, terminal: u32) -> LrAction {
        self.actions_view().get(state, terminal)
    }

    /// GOTO lookup used after a reduction (§4.I): the state to push once the
    /// production's head variable has been exposed on the stack.
    pub fn get_goto(&self, state: u32, variable: u32) -> u32 {
        self.actions_view().goto(state, variable)
    }

    /// `getExpected(state, terminal_count)` of §4.A: every terminal id for
    /// which `get_action` is not `Error`.
    pub fn get_expected(&self, state: u32) -> Vec<u32> {
        self.actions_view().expected(state)
    }

    fn productions_view(&self) -> ProductionsView<'_> {
        let records_len =
            self.header.production_count * super::header::PRODUCTION_RECORD_SIZE;
        let bytecode_len = self.header.bytecode_size;
        ProductionsView::new(
            self.section(self.offsets.productions, records_len),
            self.section(self.offsets.bytecode, bytecode_len),
            self.header.production_count,
        )
    }

    /// `getProduction(index)` of §4.A.
    pub fn get_production(&self, index: u32) -> super::lr::Production<'_> {
        self.productions_view().get(index)
    }
}
