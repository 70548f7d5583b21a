use pretty_assertions::assert_eq;
use smfdecode::prelude::*;

#[test]
fn test_header() {
    let midi = Midi::parse(include_bytes!("./simple.mid")).unwrap();
    let header = midi.header();

    assert_eq!(header.signature(), "MThd");
    assert_eq!(header.length(), 6);
    assert_eq!(header.format(), FormatType::SingleMultiChannel);
    assert_eq!(header.num_tracks(), 1);
    assert_eq!(header.division(), 96);
    assert_eq!(header.timing(), Ok(Timing::new_ticks_per_quarter_note(96)));
}

#[test]
fn test_parse() {
    let midi = Midi::parse(include_bytes!("./simple.mid")).unwrap();

    assert_eq!(midi.tracks().len(), 1);
    let track = &midi.tracks()[0];
    assert_eq!(track.signature(), "MTrk");
    assert_eq!(track.length(), 59);

    let events = track.events();
    assert_eq!(events.len(), 14);

    let Some(MetaEvent::TimeSignature(signature)) = events[0].meta() else {
        panic!("Expected a time signature, got {:?}", events[0]);
    };
    assert_eq!(events[0].delta_ticks(), 0);
    assert_eq!(
        *signature,
        TimeSignature {
            numerator: 4,
            denominator: 4,
            clocks_per_tick: 24,
            notes_per_24_clocks: 8,
        }
    );

    assert_eq!(events[1].delta_ticks(), 0);
    assert_eq!(
        events[1].meta(),
        Some(&MetaEvent::SetTempo(Tempo::new(500_000)))
    );

    use Channel::*;
    program_change(&events[2], 0, One, 5);
    program_change(&events[3], 0, Two, 46);
    program_change(&events[4], 0, Three, 70);

    note_on(&events[5], 0, Three, 48, 96);
    // running status
    note_on(&events[6], 0, Three, 60, 96);
    note_on(&events[7], 96, Two, 67, 64);
    note_on(&events[8], 96, One, 76, 32);

    note_off(&events[9], 192, Three, 48, 64);
    // running status
    note_off(&events[10], 0, Three, 60, 64);
    note_off(&events[11], 0, Two, 67, 64);
    note_off(&events[12], 0, One, 76, 64);

    assert_eq!(events[13].delta_ticks(), 0);
    assert!(events[13].is_end_of_track());
}

#[test]
fn test_accumulated_ticks() {
    let midi = Midi::parse(include_bytes!("./simple.mid")).unwrap();
    let track = &midi.tracks()[0];

    let ticks: Vec<u64> = track
        .ticked_events()
        .map(|e| e.accumulated_ticks())
        .collect();
    assert_eq!(ticks, [0, 0, 0, 0, 0, 0, 0, 96, 192, 384, 384, 384, 384, 384]);
}

fn program_change(e: &TrackEvent, delta_ticks: u32, channel: Channel, program: u8) {
    assert_eq!(e.delta_ticks(), delta_ticks);
    let Some(cv) = e.control() else {
        panic!("Expected a channel event, got {e:?}");
    };
    assert_eq!(cv.channel(), channel);
    assert_eq!(cv.event(), &VoiceEvent::ProgramChange { program });
}

fn note_on(e: &TrackEvent, delta_ticks: u32, channel: Channel, note: u8, velocity: u8) {
    assert_eq!(e.delta_ticks(), delta_ticks);
    let Some(cv) = e.control() else {
        panic!("Expected a channel event, got {e:?}");
    };
    assert_eq!(cv.channel(), channel);
    assert_eq!(cv.event(), &VoiceEvent::NoteOn { note, velocity });
}

fn note_off(e: &TrackEvent, delta_ticks: u32, channel: Channel, note: u8, velocity: u8) {
    assert_eq!(e.delta_ticks(), delta_ticks);
    let Some(cv) = e.control() else {
        panic!("Expected a channel event, got {e:?}");
    };
    assert_eq!(cv.channel(), channel);
    assert_eq!(cv.event(), &VoiceEvent::NoteOff { note, velocity });
}
