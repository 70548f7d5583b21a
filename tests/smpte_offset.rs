use pretty_assertions::assert_eq;
use smfdecode::prelude::*;

/// Build a single track file with SMPTE timing whose first event is an SMPTE offset.
fn create_midi_with_smpte_offset(
    fps: SmpteFps,
    hour: u8,
    minute: u8,
    second: u8,
    frame: u8,
    subframe: u8,
) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x00]); // format 0
    bytes.extend_from_slice(&[0x00, 0x01]); // one track

    // high bit set: negative frame rate, then ticks per frame
    let fps_byte = match fps {
        SmpteFps::TwentyFour => 0xE8,
        SmpteFps::TwentyFive => 0xE7,
        SmpteFps::TwentyNine => 0xE3,
        SmpteFps::Thirty => 0xE2,
    };
    bytes.push(fps_byte);
    bytes.push(40);

    bytes.extend_from_slice(b"MTrk");
    let track_length_pos = bytes.len();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    let track_start = bytes.len();

    let rate_bits = match fps {
        SmpteFps::TwentyFour => 0b00,
        SmpteFps::TwentyFive => 0b01,
        SmpteFps::TwentyNine => 0b10,
        SmpteFps::Thirty => 0b11,
    };
    bytes.extend_from_slice(&[
        0x00,
        0xFF,
        0x54,
        0x05,
        (rate_bits << 5) | (hour & 0x1F),
        minute,
        second,
        frame,
        subframe,
    ]);

    bytes.extend_from_slice(&[0x00, 0x90, 0x3C, 0x64]);
    bytes.extend_from_slice(&[0x60, 0x80, 0x3C, 0x40]);
    bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    let track_length = bytes.len() - track_start;
    bytes[track_length_pos..track_length_pos + 4]
        .copy_from_slice(&(track_length as u32).to_be_bytes());

    bytes
}

/// Every SMPTE offset in the file, in track order
fn offsets(midi: &Midi) -> Vec<SmpteOffset> {
    midi.tracks()
        .iter()
        .flat_map(|track| track.events())
        .filter_map(|event| match event.meta() {
            Some(MetaEvent::SmpteOffset(offset)) => Some(*offset),
            _ => None,
        })
        .collect()
}

#[test]
fn test_smpte_offset_24fps() {
    let bytes = create_midi_with_smpte_offset(SmpteFps::TwentyFour, 12, 30, 15, 18, 50);
    let midi = Midi::parse(&bytes).unwrap();

    match midi.header().timing().unwrap() {
        Timing::Smpte(smpte) => {
            assert_eq!(smpte.fps(), SmpteFps::TwentyFour);
            assert_eq!(smpte.ticks_per_frame(), 40);
        }
        other => panic!("Expected SMPTE timing, got {other:?}"),
    }

    let track = &midi.tracks()[0];
    assert_eq!(track.events().len(), 4);

    let Some(MetaEvent::SmpteOffset(offset)) = track.events()[0].meta() else {
        panic!("Expected SMPTE offset meta event");
    };
    assert_eq!(offset.fps(), Ok(SmpteFps::TwentyFour));
    assert_eq!(offset.hours(), 12);
    assert_eq!(offset.minute, 30);
    assert_eq!(offset.second, 15);
    assert_eq!(offset.frame, 18);
    assert_eq!(offset.subframe, 50);

    let expected_micros = (12 * 3600 + 30 * 60 + 15) as f64 * 1_000_000.0
        + (18.0 / 24.0) * 1_000_000.0
        + (50.0 / 100.0 / 24.0) * 1_000_000.0;
    assert!((offset.as_micros().unwrap() - expected_micros).abs() < 0.01);
}

#[test]
fn test_smpte_offset_25fps_pal() {
    let bytes = create_midi_with_smpte_offset(SmpteFps::TwentyFive, 0, 0, 1, 12, 75);
    let midi = Midi::parse(&bytes).unwrap();

    let offset = offsets(&midi)[0];
    assert_eq!(offset.fps(), Ok(SmpteFps::TwentyFive));
    assert_eq!(offset.hours(), 0);
    assert_eq!(offset.hour, 0b0010_0000);
    assert_eq!(offset.second, 1);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 75);
}

#[test]
fn test_smpte_offset_29_97_drop_frame() {
    let bytes = create_midi_with_smpte_offset(SmpteFps::TwentyNine, 23, 59, 59, 28, 99);
    let midi = Midi::parse(&bytes).unwrap();

    let offset = offsets(&midi)[0];
    assert_eq!(offset.fps(), Ok(SmpteFps::TwentyNine));
    assert_eq!(offset.hours(), 23);
    assert_eq!(offset.minute, 59);
    assert_eq!(offset.second, 59);

    let drop_frame = 30_000.0 / 1001.0;
    let expected = 86_399_000_000.0 + 28.99 * 1_000_000.0 / drop_frame;
    assert!((offset.as_micros().unwrap() - expected).abs() < 1.0);
}

#[test]
fn test_smpte_offset_with_override_fps() {
    let bytes = create_midi_with_smpte_offset(SmpteFps::TwentyFour, 10, 20, 30, 12, 50);
    let midi = Midi::parse(&bytes).unwrap();

    let Timing::Smpte(smpte) = midi.header().timing().unwrap() else {
        panic!("Expected SMPTE timing");
    };
    let offset = offsets(&midi)[0];

    let micros_original = offset.as_micros().unwrap();
    let micros_override = offset.as_micros_with_override(smpte.fps());
    assert!((micros_original - micros_override).abs() < 0.01);

    let micros_different = offset.as_micros_with_override(SmpteFps::Thirty);
    assert!((micros_original - micros_different).abs() > 1.0);
}

#[test]
fn test_multiple_tracks_with_different_offsets() {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x01]); // format 1
    bytes.extend_from_slice(&[0x00, 0x02]);
    bytes.push(0xE7); // 25 fps
    bytes.push(40);

    for (minute, second) in [(0x00, 0x0A), (0x01, 0x00)] {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
        bytes.extend_from_slice(&[0x00, 0xFF, 0x54, 0x05, 0x20, minute, second, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    }

    let midi = Midi::parse(&bytes).unwrap();
    let offsets = offsets(&midi);
    assert_eq!(offsets.len(), 2);

    assert_eq!((offsets[0].minute, offsets[0].second), (0, 10));
    assert_eq!((offsets[1].minute, offsets[1].second), (1, 0));

    let diff = offsets[1].as_micros().unwrap() - offsets[0].as_micros().unwrap();
    assert!((diff - 50_000_000.0).abs() < 1.0);
}

#[test]
fn test_out_of_range_offset_still_decodes() {
    // range checks are left to `validate`
    let bytes = create_midi_with_smpte_offset(SmpteFps::Thirty, 25, 61, 0, 0, 0);
    let midi = Midi::parse(&bytes).unwrap();

    let offset = offsets(&midi)[0];
    assert_eq!(offset.hours(), 25);
    assert_eq!(offset.validate(), Err(SmpteError::HourOffset(25)));
}
