use smfdecode::prelude::*;

/// Helper to create raw SMPTE offset data bytes
fn create_smpte_bytes(
    fps_bits: u8,
    hour: u8,
    minute: u8,
    second: u8,
    frame: u8,
    subframe: u8,
) -> Vec<u8> {
    vec![
        (fps_bits << 5) | (hour & 0x1F),
        minute,
        second,
        frame,
        subframe,
    ]
}

#[test]
fn test_smpte_offset_invalid_length() {
    let result = SmpteOffset::parse(&[0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(SmpteError::Length(3))));

    let result = SmpteOffset::parse(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(SmpteError::Length(6))));

    let result = SmpteOffset::parse(&[]);
    assert!(matches!(result, Err(SmpteError::Length(0))));
}

#[test]
fn test_smpte_offset_invalid_frame_type() {
    // only the low two rate bits may be set, bit 7 is reserved
    for fps_bits in [0b100, 0b101, 0b111] {
        let data = create_smpte_bytes(fps_bits, 12, 30, 15, 10, 50);
        let result = SmpteOffset::parse(&data);
        assert_eq!(result, Err(SmpteError::TrackFrame(fps_bits)));
    }
}

#[test]
fn test_smpte_offset_invalid_hour() {
    let data = [0x18, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::HourOffset(24)));

    let data_max = [0x1F, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(SmpteOffset::parse(&data_max), Err(SmpteError::HourOffset(31)));
}

#[test]
fn test_smpte_offset_invalid_minute() {
    let data = create_smpte_bytes(0, 12, 60, 30, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::MinuteOffset(60)));

    for invalid_minute in [61, 70, 80, 99, 100, 255] {
        let data = create_smpte_bytes(0, 12, invalid_minute, 30, 15, 50);
        assert_eq!(
            SmpteOffset::parse(&data),
            Err(SmpteError::MinuteOffset(invalid_minute))
        );
    }
}

#[test]
fn test_smpte_offset_invalid_second() {
    let data = create_smpte_bytes(1, 12, 30, 60, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::SecondOffset(60)));

    let data_max = create_smpte_bytes(1, 12, 30, 255, 15, 50);
    assert_eq!(
        SmpteOffset::parse(&data_max),
        Err(SmpteError::SecondOffset(255))
    );
}

#[test]
fn test_smpte_offset_invalid_subframe() {
    for invalid_subframe in [100, 101, 150, 255] {
        let data = create_smpte_bytes(2, 12, 30, 45, 15, invalid_subframe);
        assert_eq!(
            SmpteOffset::parse(&data),
            Err(SmpteError::Subframe(invalid_subframe))
        );
    }
}

#[test]
fn test_smpte_offset_boundary_values() {
    let test_cases = [
        (0, 0, 0, 0, 0, 0),
        (0, 23, 0, 0, 0, 0),
        (0, 0, 59, 0, 0, 0),
        (0, 0, 0, 59, 0, 0),
        (0, 0, 0, 0, 0, 99),
        (0, 23, 59, 59, 23, 99),
        (1, 23, 59, 59, 24, 99),
        (2, 23, 59, 59, 29, 99),
        (3, 23, 59, 59, 29, 99),
    ];

    for (fps_bits, hour, minute, second, frame, subframe) in test_cases {
        let data = create_smpte_bytes(fps_bits, hour, minute, second, frame, subframe);
        let offset = SmpteOffset::parse(&data)
            .unwrap_or_else(|e| panic!("Failed for {data:?}: {e}"));

        assert_eq!(offset.hours(), hour);
        assert_eq!(offset.minute, minute);
        assert_eq!(offset.second, second);
        assert_eq!(offset.frame, frame);
        assert_eq!(offset.subframe, subframe);
    }
}

#[test]
fn test_smpte_offset_combined_errors() {
    // the first failing field wins
    let data = create_smpte_bytes(0, 25, 61, 30, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::HourOffset(25)));

    let data = create_smpte_bytes(1, 23, 60, 60, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::MinuteOffset(60)));

    let data = create_smpte_bytes(2, 23, 59, 59, 29, 100);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::Subframe(100)));
}

#[test]
fn test_smpte_offset_bit_manipulation_edge_cases() {
    for fps_bits in 0..=3u8 {
        for hour in 0..=23 {
            let data = [(fps_bits << 5) | hour, 30, 45, 15, 50];
            let offset = SmpteOffset::parse(&data).unwrap();

            let expected_fps = match fps_bits {
                0 => SmpteFps::TwentyFour,
                1 => SmpteFps::TwentyFive,
                2 => SmpteFps::TwentyNine,
                _ => SmpteFps::Thirty,
            };
            assert_eq!(offset.fps(), Ok(expected_fps));
            assert_eq!(offset.hours(), hour);
        }
    }
}

#[test]
fn test_smpte_offset_microsecond_calculation_edge_cases() {
    let data = create_smpte_bytes(0, 23, 59, 59, 23, 99);
    let offset = SmpteOffset::parse(&data).unwrap();

    let expected = 86_399_000_000.0
        + (23.0 / 24.0) * 1_000_000.0
        + (99.0 / 100.0 / 24.0) * 1_000_000.0;
    assert!((offset.as_micros().unwrap() - expected).abs() < 1.0);

    let midnight = SmpteOffset::parse(&create_smpte_bytes(1, 0, 0, 0, 0, 0)).unwrap();
    assert_eq!(midnight.as_micros(), Ok(0.0));
}

#[test]
fn test_smpte_offset_fps_override_edge_cases() {
    let data = create_smpte_bytes(0, 1, 0, 0, 12, 0);
    let offset = SmpteOffset::parse(&data).unwrap();

    let hour_micros = 3_600_000_000.0;
    let cases = [
        (SmpteFps::TwentyFour, 12.0 / 24.0),
        (SmpteFps::TwentyFive, 12.0 / 25.0),
        (SmpteFps::TwentyNine, 12.0 * 1001.0 / 30_000.0),
        (SmpteFps::Thirty, 12.0 / 30.0),
    ];
    for (fps, seconds) in cases {
        let micros = offset.as_micros_with_override(fps);
        assert!((micros - (hour_micros + seconds * 1_000_000.0)).abs() < 1.0);
    }
}

#[test]
fn test_smpte_drop_frame_precision() {
    let data = create_smpte_bytes(2, 0, 0, 0, 1, 0);
    let offset = SmpteOffset::parse(&data).unwrap();

    // one drop-frame frame is 1001/30000 seconds
    let exact_frame_duration = 1_001_000.0 / 30.0;
    assert!((offset.as_micros().unwrap() - exact_frame_duration).abs() < 0.001);
}

#[test]
fn test_header_frame_rates() {
    assert_eq!(SmpteFps::from_header_byte(-29), Ok(SmpteFps::TwentyNine));
    assert_eq!(
        SmpteFps::from_header_byte(-26),
        Err(SmpteError::HeaderFrameTime(-26))
    );
    assert_eq!(SmpteFps::TwentyNine.as_division(), 30);
}
