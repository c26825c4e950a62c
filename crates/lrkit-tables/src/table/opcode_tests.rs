use super::*;

#[test]
fn tree_action_roundtrip() {
    for action in [
        TreeAction::None,
        TreeAction::Drop,
        TreeAction::Promote,
        TreeAction::ReplaceByChildren,
    ] {
        assert_eq!(TreeAction::from_byte(action.to_byte()), action);
    }
}

#[test]
fn pop_stack_roundtrips_and_is_one_word() {
    let op = Opcode::PopStack(TreeAction::Promote);
    let mut bytes = Vec::new();
    op.encode(&mut bytes);
    assert_eq!(bytes.len(), 4);

    let (decoded, consumed) = Opcode::decode(&bytes);
    assert_eq!(decoded, op);
    assert_eq!(consumed, 4);
}

#[test]
fn add_virtual_roundtrips_and_is_two_words() {
    let op = Opcode::AddVirtual {
        virtual_index: 42,
        action: TreeAction::ReplaceByChildren,
    };
    let mut bytes = Vec::new();
    op.encode(&mut bytes);
    assert_eq!(bytes.len(), 8);

    let (decoded, consumed) = Opcode::decode(&bytes);
    assert_eq!(decoded, op);
    assert_eq!(consumed, 8);
}

#[test]
fn sem_action_roundtrips_with_no_tree_action() {
    let op = Opcode::SemAction { action_index: 7 };
    let mut bytes = Vec::new();
    op.encode(&mut bytes);

    let (decoded, _) = Opcode::decode(&bytes);
    assert_eq!(decoded, op);
}

#[test]
fn decode_all_walks_mixed_stream() {
    let ops = vec![
        Opcode::PopStack(TreeAction::None),
        Opcode::AddVirtual {
            virtual_index: 3,
            action: TreeAction::Drop,
        },
        Opcode::SemAction { action_index: 1 },
        Opcode::PopStack(TreeAction::Promote),
    ];

    let mut bytes = Vec::new();
    for op in &ops {
        op.encode(&mut bytes);
    }

    assert_eq!(decode_all(&bytes), ops);
}
