use pretty_assertions::assert_eq;
use smfdecode::prelude::*;

fn format1() -> Midi {
    Midi::parse(include_bytes!("./test-asset/format1.mid")).unwrap()
}

#[test]
fn test_header() {
    let midi = format1();
    let header = midi.header();
    assert_eq!(header.signature(), "MThd");
    assert_eq!(header.length(), 6);
    assert_eq!(header.format(), FormatType::Simultaneous);
    assert_eq!(header.num_tracks(), 4);
    assert_eq!(header.division(), 96);
}

#[test]
fn test_tracks() {
    let midi = format1();
    assert_eq!(midi.tracks().len(), usize::from(midi.header().num_tracks()));

    let lengths: Vec<u32> = midi.tracks().iter().map(Track::length).collect();
    assert_eq!(lengths, [20, 16, 15, 21]);

    let counts: Vec<usize> = midi.tracks().iter().map(|t| t.events().len()).collect();
    assert_eq!(counts, [3, 4, 4, 6]);

    for track in midi.tracks() {
        assert_eq!(track.signature(), "MTrk");
        assert!(track.events().last().is_some_and(TrackEvent::is_end_of_track));
    }
}

#[test]
fn test_tempo_track() {
    let midi = format1();
    let events = midi.tracks()[0].events();

    assert_eq!(
        events[1].meta().map(MetaEvent::meta_type),
        Some(MetaType::SetTempo)
    );
    // 0x83 0x00
    assert_eq!(events[2].delta_ticks(), 384);
}

#[test]
fn test_running_status_note_off_by_velocity() {
    let midi = format1();
    let events = midi.tracks()[3].events();

    // 00 92 30 60, then 00 3C 60, 83 00 30 00 and 00 3C 00 reuse 0x92
    let notes: Vec<(u32, VoiceEvent)> = events
        .iter()
        .filter_map(|e| Some((e.delta_ticks(), *e.control()?.event())))
        .skip(1)
        .collect();
    assert_eq!(
        notes,
        [
            (0, VoiceEvent::NoteOn { note: 48, velocity: 96 }),
            (0, VoiceEvent::NoteOn { note: 60, velocity: 96 }),
            (384, VoiceEvent::NoteOn { note: 48, velocity: 0 }),
            (0, VoiceEvent::NoteOn { note: 60, velocity: 0 }),
        ]
    );
    assert!(notes.iter().skip(2).all(|(_, n)| n.is_note_off()));
}

#[test]
fn test_events_are_owned_by_their_track() {
    let tracks = format1().into_tracks();
    let programs: Vec<(Channel, u8)> = tracks
        .into_iter()
        .flat_map(Track::into_events)
        .filter_map(|e| match e.into_kind() {
            EventKind::Control(c) => match c.event() {
                VoiceEvent::ProgramChange { program } => Some((c.channel(), *program)),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(
        programs,
        [(Channel::One, 5), (Channel::Two, 46), (Channel::Three, 70)]
    );
}
