//! The binary automaton/LR table format: component A of the runtime core.
//!
//! A table file is a 64-byte-aligned blob: a fixed [`Header`], an interned
//! name blob (terminal/variable/production names), the DFA's state records
//! and transition tables, the dense LR action table, and the production
//! table with its reduction bytecode. [`Module::from_bytes`] validates and
//! loads one; every other type here is a read-only view over its bytes.

mod aligned_vec;
mod builder;
mod checksum;
mod dfa;
mod dump;
mod header;
mod lr;
mod module;
mod names;
mod opcode;

#[cfg(test)]
mod dfa_tests;
#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod opcode_tests;

/// Magic bytes identifying a table file: `b"LRKT"`.
pub const MAGIC: [u8; 4] = *b"LRKT";
/// Current table format version.
pub const VERSION: u32 = 1;
/// Byte alignment every section starts at.
pub const SECTION_ALIGN: usize = 64;

pub use aligned_vec::AlignedVec;
pub use builder::{DfaStateSpec, ModuleBuilder, ProductionSpec};
pub use dfa::{BulkRange, DfaView, StateData, DEAD_STATE};
pub use dump::dump;
pub use header::{Header, SectionOffsets};
pub use lr::{ActionCode, ActionsView, LrAction, Production, ProductionsView};
pub use module::{Module, ModuleError};
pub use names::NamesView;
pub use opcode::{decode_all, Opcode, TreeAction};
