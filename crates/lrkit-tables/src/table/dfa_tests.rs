use super::*;

#[test]
fn bulk_range_roundtrip() {
    let range = BulkRange {
        start: 0x61,
        end: 0x7A,
        target: 7,
    };
    assert_eq!(BulkRange::from_bytes(&range.to_bytes()), range);
}

#[test]
fn bulk_range_contains() {
    let range = BulkRange {
        start: 10,
        end: 20,
        target: 1,
    };
    assert!(range.contains(10));
    assert!(range.contains(20));
    assert!(!range.contains(9));
    assert!(!range.contains(21));
}

#[test]
fn state_record_roundtrip() {
    let record = dfa::StateRecord {
        terminals_offset: 3,
        terminals_count: 2,
        bulk_offset: 1,
        bulk_count: 1,
        dead_end: false,
    };
    assert_eq!(dfa::StateRecord::from_bytes(&record.to_bytes()), record);
}

#[test]
fn state_data_prefers_cached_over_bulk() {
    let mut cached = [DEAD_STATE; 256];
    cached[b'a' as usize] = 5;

    let mut builder = ModuleBuilder::new(&["a"], &[]);
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![],
        cached,
        bulk: vec![BulkRange {
            start: 0,
            end: 255,
            target: 9,
        }],
        dead_end: false,
    });
    let bytes = builder.build();
    let module = Module::from_bytes(&bytes).unwrap();

    let state = module.get_state(0);
    assert_eq!(state.transition(b'a' as u32), 5);
    assert_eq!(state.transition(b'b' as u32), 9);
}

#[test]
fn dead_end_state_has_no_transitions() {
    let mut builder = ModuleBuilder::new(&[], &[]);
    builder.add_dfa_state(DfaStateSpec {
        terminals: vec![0],
        cached: [DEAD_STATE; 256],
        bulk: vec![],
        dead_end: true,
    });
    let bytes = builder.build();
    let module = Module::from_bytes(&bytes).unwrap();

    let state = module.get_state(0);
    assert!(state.dead_end);
    assert!(state.is_accepting());
    assert_eq!(state.transition(b'x' as u32), DEAD_STATE);
}
