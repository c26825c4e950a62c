use super::*;

fn minimal_bytes() -> Vec<u8> {
    ModuleBuilder::new(&["a", "b"], &["S"]).build()
}

#[test]
fn loads_a_well_formed_module() {
    let bytes = minimal_bytes();
    let module = Module::from_bytes(&bytes).unwrap();
    assert_eq!(module.terminal_count(), 2);
    assert_eq!(module.variable_count(), 1);
}

#[test]
fn rejects_truncated_file() {
    let err = Module::from_bytes(&[0u8; 10]).unwrap_err();
    assert_eq!(
        err,
        ModuleError::FileTooSmall {
            needed: 64,
            found: 10
        }
    );
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = minimal_bytes();
    bytes[0] = b'X';
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::InvalidMagic { .. }));
}

#[test]
fn rejects_unsupported_version() {
    let mut bytes = minimal_bytes();
    bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert_eq!(
        err,
        ModuleError::UnsupportedVersion {
            found: 99,
            max_supported: VERSION
        }
    );
}

#[test]
fn rejects_size_mismatch() {
    let mut bytes = minimal_bytes();
    bytes.push(0); // extra trailing byte the header doesn't know about
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::SizeMismatch { .. }));
}

#[test]
fn rejects_corrupted_body() {
    let mut bytes = minimal_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert_eq!(err, ModuleError::ChecksumMismatch);
}

#[test]
fn resolves_interned_names() {
    let bytes = minimal_bytes();
    let module = Module::from_bytes(&bytes).unwrap();
    assert_eq!(module.resolve_name(lrkit_core::Symbol::from_raw(0)), "a");
    assert_eq!(module.resolve_name(lrkit_core::Symbol::from_raw(2)), "S");
}

#[test]
fn actions_and_expected_terminals() {
    let mut builder = ModuleBuilder::new(&["a", "b"], &["S"]);
    // One state, columns = terminal_count(2) + variable_count(1): a, b, then
    // the goto column for S.
    builder.set_actions(vec![LrAction::shift(1), LrAction::error(), LrAction::shift(2)]);
    let bytes = builder.build();
    let module = Module::from_bytes(&bytes).unwrap();

    assert_eq!(module.get_action(0, 0), LrAction::shift(1));
    assert_eq!(module.get_action(0, 1), LrAction::error());
    assert_eq!(module.get_expected(0), vec![0]);
    assert_eq!(module.get_goto(0, 0), 2);
}

#[test]
fn productions_carry_their_bytecode() {
    let mut builder = ModuleBuilder::new(&["a"], &["S"]);
    builder.add_production(ProductionSpec {
        head: 0,
        reduction_length: 1,
        head_action: TreeAction::None,
        bytecode: vec![Opcode::PopStack(TreeAction::Promote)],
    });
    let bytes = builder.build();
    let module = Module::from_bytes(&bytes).unwrap();

    let production = module.get_production(0);
    assert_eq!(production.head, 0);
    assert_eq!(production.reduction_length, 1);
    assert_eq!(
        decode_all(production.bytecode),
        vec![Opcode::PopStack(TreeAction::Promote)]
    );
}
