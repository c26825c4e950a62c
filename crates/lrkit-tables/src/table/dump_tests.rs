use super::*;

#[test]
fn dump_snapshot() {
    let mut builder = ModuleBuilder::new(&["a", "b"], &["S"]);
    let mut cached = [DEAD_STATE; 256];
    cached[b'a' as usize] = 1;
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![],
        cached,
        bulk: vec![],
        dead_end: false,
    });
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![0],
        cached: [DEAD_STATE; 256],
        bulk: vec![],
        dead_end: true,
    });
    builder.add_production(ProductionSpec {
        head: 0,
        reduction_length: 1,
        head_action: TreeAction::Promote,
        bytecode: vec![Opcode::PopStack(TreeAction::None)],
    });

    let bytes = builder.build();
    let module = Module::from_bytes(&bytes).unwrap();

    let text = dump(&module);
    assert!(text.contains("terminals=2 variables=1 dfa_states=2 lr_states=0 productions=1"));
    assert!(text.contains("state 0: terminals=[] dead_end=false"));
    assert!(text.contains("state 1: terminals=[0] dead_end=true"));
    assert!(text.contains("production 0: head=0 (S) len=1 action=Promote"));
}
