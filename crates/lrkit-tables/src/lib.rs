//! Binary automaton and LR(k) table format.
//!
//! Grammar compilation and code generation live outside this crate; what's
//! here is the wire format those external tools produce and the typed,
//! read-only views the runtime loads it into: DFA states (with cached and
//! bulk transitions), the dense LR action table, and productions with their
//! reduction bytecode.

pub mod table;

pub use table::{
    decode_all, dump, ActionCode, ActionsView, AlignedVec, BulkRange, DfaStateSpec, DfaView,
    Header, LrAction, Module, ModuleBuilder, ModuleError, NamesView, Opcode, Production,
    ProductionSpec, ProductionsView, SectionOffsets, StateData, TreeAction, DEAD_STATE, MAGIC,
    SECTION_ALIGN, VERSION,
};
