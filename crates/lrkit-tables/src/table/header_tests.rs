use super::*;

#[test]
fn default_header_has_magic_and_version() {
    let header = Header::default();
    assert!(header.validate_magic());
    assert!(header.validate_version());
}

#[test]
fn roundtrip() {
    let header = Header {
        magic: MAGIC,
        version: VERSION,
        checksum: 0xDEAD_BEEF,
        total_size: 4096,
        name_blob_size: 128,
        bytecode_size: 64,
        name_count: 10,
        terminal_count: 6,
        variable_count: 4,
        dfa_state_count: 12,
        dfa_terminal_id_count: 8,
        dfa_bulk_range_count: 2,
        lr_state_count: 20,
        production_count: 9,
        _reserved: [0; 4],
    };

    let bytes = header.to_bytes();
    assert_eq!(bytes.len(), 64);
    let decoded = Header::from_bytes(&bytes);
    assert_eq!(decoded, header);
}

#[test]
fn offsets_are_64_byte_aligned_and_monotonic() {
    let header = Header {
        magic: MAGIC,
        version: VERSION,
        checksum: 0,
        total_size: 0,
        name_blob_size: 37,
        bytecode_size: 20,
        name_count: 3,
        terminal_count: 2,
        variable_count: 1,
        dfa_state_count: 2,
        dfa_terminal_id_count: 2,
        dfa_bulk_range_count: 1,
        lr_state_count: 3,
        production_count: 2,
        _reserved: [0; 4],
    };

    let offsets = header.compute_offsets();
    let all = [
        offsets.name_blob,
        offsets.name_offsets,
        offsets.dfa_states,
        offsets.dfa_terminal_ids,
        offsets.dfa_transitions,
        offsets.dfa_bulk_ranges,
        offsets.actions,
        offsets.productions,
        offsets.bytecode,
    ];
    for &offset in &all {
        assert_eq!(offset % SECTION_ALIGN as u32, 0, "{offset} is not aligned");
    }
    for pair in all.windows(2) {
        assert!(pair[0] < pair[1], "offsets must be strictly increasing");
    }
}
