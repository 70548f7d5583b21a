use smfdecode::prelude::*;

fn read_through(bytes: &[u8]) -> Midi {
    match Midi::parse(bytes) {
        Ok(midi) => midi,
        Err(e) => panic!("Error at {}, {:?}", e.position(), e),
    }
}

#[test]
fn read_simple() {
    let midi = read_through(include_bytes!("./simple_midi/simple.mid"));
    assert_eq!(midi.tracks().len(), 1);
}

#[test]
fn read_format_1() {
    let midi = read_through(include_bytes!("./test-asset/format1.mid"));
    assert_eq!(midi.tracks().len(), 4);
}

#[test]
fn read_every_truncation_fails() {
    for bytes in [
        &include_bytes!("./simple_midi/simple.mid")[..],
        &include_bytes!("./test-asset/format1.mid")[..],
    ] {
        for len in 0..bytes.len() {
            let err = Midi::parse(&bytes[..len])
                .expect_err("a truncated file should not decode");
            assert!(err.is_out_of_bounds(), "cut at {len}: {err}");
            assert!(err.position() <= len);
        }
    }
}

#[test]
fn read_damaged() {
    let mut bytes = include_bytes!("./test-asset/format1.mid").to_vec();
    // turn the first program change of the second track into a system common status
    let position = bytes
        .windows(3)
        .position(|w| w == [0x00, 0xC0, 0x05])
        .unwrap()
        + 1;
    bytes[position] = 0xF4;

    let err = Midi::parse(&bytes).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::UnknownStatusByte(0xF4)))
    );
    assert_eq!(err.position(), position);
}

#[cfg(feature = "std")]
#[test]
fn read_from_path() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-asset/format1.mid");
    let midi = Midi::from_path(path).unwrap();
    assert_eq!(midi.format_type(), FormatType::Simultaneous);

    let missing = Midi::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-asset/nope.mid"));
    assert!(matches!(missing, Err(LoadError::Io(_))));
}

#[test]
fn read_omitted_sequence_number() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08, //
        0x00, 0xFF, 0x00, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let midi = read_through(&bytes);
    let events = midi.tracks()[0].events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].meta(), Some(&MetaEvent::SequenceNumber(None)));
}
