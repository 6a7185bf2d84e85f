// MIDI Export - Serialize note events to a Standard MIDI File
// Format 0, one track, 480 ticks per beat; read back with midly to validate

use std::cmp::Ordering;

use midly::{Format, MidiMessage, Smf, Timing, TrackEventKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theory::{clamp_midi, note_name};
use super::performance::{Layer, PerformedNote, Performance};

/// Ticks per quarter note
pub const TICKS_PER_BEAT: u16 = 480;

/// Largest value the 24-bit tempo field holds
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

const DEFAULT_BPM: f64 = 90.0;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Malformed MIDI output: {0}")]
    Malformed(String),

    #[error("Unexpected MIDI layout: {0}")]
    Layout(String),
}

/// Canonical note unit for export and scheduling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub note: i32,
    /// Start position in beats
    pub start: f64,
    /// Length in beats
    pub duration: f64,
    pub velocity: u8,
    pub channel: u8,
}

impl From<&PerformedNote> for NoteEvent {
    fn from(note: &PerformedNote) -> Self {
        NoteEvent {
            note: note.pitch,
            start: note.start,
            duration: note.duration,
            velocity: note.velocity,
            channel: note.layer.channel(),
        }
    }
}

/// Which layers an export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Chords,
    Bass,
    Drums,
    Melody,
    Pad,
    Strings,
    Guitar,
    /// Left-hand bass notes plus right-hand chords
    Piano,
    Full,
}

impl ExportType {
    pub const ALL: [ExportType; 9] = [
        ExportType::Chords,
        ExportType::Bass,
        ExportType::Drums,
        ExportType::Melody,
        ExportType::Pad,
        ExportType::Strings,
        ExportType::Guitar,
        ExportType::Piano,
        ExportType::Full,
    ];

    pub fn from_string(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "chords" => ExportType::Chords,
            "bass" => ExportType::Bass,
            "drums" => ExportType::Drums,
            "melody" => ExportType::Melody,
            "pad" => ExportType::Pad,
            "strings" => ExportType::Strings,
            "guitar" => ExportType::Guitar,
            "piano" => ExportType::Piano,
            "full" => ExportType::Full,
            _ => ExportType::Full, // Default
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            ExportType::Chords => "chords",
            ExportType::Bass => "bass",
            ExportType::Drums => "drums",
            ExportType::Melody => "melody",
            ExportType::Pad => "pad",
            ExportType::Strings => "strings",
            ExportType::Guitar => "guitar",
            ExportType::Piano => "piano",
            ExportType::Full => "full",
        }
    }

    /// Layers written, in slot order
    pub fn layers(&self) -> &'static [Layer] {
        match self {
            ExportType::Chords => &[Layer::Chords],
            ExportType::Bass => &[Layer::Bass],
            ExportType::Drums => &Layer::DRUMS,
            ExportType::Melody => &[Layer::Melody],
            ExportType::Pad => &[Layer::Pad],
            ExportType::Strings => &[Layer::Strings],
            ExportType::Guitar => &[Layer::Guitar],
            ExportType::Piano => &[Layer::LeftHand, Layer::Chords],
            // The bass layer carries the low end, so the left hand is left out
            ExportType::Full => &[
                Layer::Chords,
                Layer::Pad,
                Layer::Strings,
                Layer::Guitar,
                Layer::Bass,
                Layer::Melody,
                Layer::Kick,
                Layer::Snare,
                Layer::HiHat,
                Layer::OpenHat,
            ],
        }
    }
}

/// What a read-back of exported bytes found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiSummary {
    pub tracks: usize,
    pub ticks_per_beat: u16,
    pub note_ons: usize,
    pub note_offs: usize,
}

/// Encode a MIDI variable-length quantity
///
/// Seven bits per byte, most significant group first, with the
/// continuation bit set on every byte but the last.
pub fn encode_vlq(value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    let mut rest = value >> 7;
    while rest > 0 {
        bytes.push(((rest & 0x7F) as u8) | 0x80);
        rest >>= 7;
    }
    bytes.reverse();
    bytes
}

/// Decode a variable-length quantity, returning the value and bytes consumed
pub fn decode_vlq(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate().take(5) {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

fn beats_to_ticks(beats: f64) -> u32 {
    (beats.max(0.0) * TICKS_PER_BEAT as f64).round() as u32
}

fn tempo_micros(bpm: f64) -> u32 {
    let bpm = if bpm.is_finite() && bpm > 0.0 {
        bpm
    } else {
        log::warn!("Invalid tempo {}, exporting at {} BPM", bpm, DEFAULT_BPM);
        DEFAULT_BPM
    };
    ((60_000_000.0 / bpm).round() as u32).min(MAX_TEMPO_MICROS)
}

/// Serialize note events to Standard MIDI File bytes
///
/// Output depends only on the arguments, so equal inputs give identical
/// bytes. An empty event list still yields a valid file holding tempo,
/// name and end of track.
///
/// # Arguments
/// * `events` - Notes with beat positions and channels
/// * `bpm` - Tempo written to the tempo meta event
/// * `track_name` - Track name; non-ASCII characters become `?`
///
/// # Returns
/// Complete file bytes: `MThd` header then a single `MTrk` chunk
pub fn export_midi(events: &[NoteEvent], bpm: f64, track_name: &str) -> Vec<u8> {
    let micros = tempo_micros(bpm);

    // (tick, bytes) in emission order; sorted stably below
    let mut timeline: Vec<(u32, Vec<u8>)> = Vec::with_capacity(events.len() * 2 + 2);

    timeline.push((
        0,
        vec![
            0xFF,
            0x51,
            0x03,
            ((micros >> 16) & 0xFF) as u8,
            ((micros >> 8) & 0xFF) as u8,
            (micros & 0xFF) as u8,
        ],
    ));

    let name: Vec<u8> = track_name
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect();
    let mut name_event = vec![0xFF, 0x03];
    name_event.extend(encode_vlq(name.len() as u32));
    name_event.extend(&name);
    timeline.push((0, name_event));

    let mut notes: Vec<&NoteEvent> = events.iter().collect();
    notes.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    for note in notes {
        let channel = note.channel & 0x0F;
        let pitch = clamp_midi(note.note);
        let velocity = note.velocity.min(127);
        let start = beats_to_ticks(note.start);
        let end = start + beats_to_ticks(note.duration);

        timeline.push((start, vec![NOTE_ON | channel, pitch, velocity]));
        timeline.push((end, vec![NOTE_OFF | channel, pitch, 0]));
    }

    timeline.sort_by_key(|(tick, _)| *tick);

    let mut track = Vec::new();
    let mut last_tick = 0;
    for (tick, bytes) in timeline {
        track.extend(encode_vlq(tick - last_tick));
        track.extend(bytes);
        last_tick = tick;
    }
    track.extend([0x00, 0xFF, 0x2F, 0x00]);

    let mut file = Vec::with_capacity(22 + track.len());
    file.extend(b"MThd");
    file.extend(6u32.to_be_bytes());
    file.extend(0u16.to_be_bytes()); // Format 0
    file.extend(1u16.to_be_bytes()); // One track
    file.extend(TICKS_PER_BEAT.to_be_bytes());
    file.extend(b"MTrk");
    file.extend((track.len() as u32).to_be_bytes());
    file.extend(track);
    file
}

/// Parse exported bytes back and check the expected layout
pub fn validate_midi(bytes: &[u8]) -> Result<MidiSummary, ExportError> {
    let smf = Smf::parse(bytes).map_err(|e| ExportError::Malformed(e.to_string()))?;

    if smf.header.format != Format::SingleTrack {
        return Err(ExportError::Layout(format!("format {:?}", smf.header.format)));
    }
    if smf.tracks.len() != 1 {
        return Err(ExportError::Layout(format!("{} tracks", smf.tracks.len())));
    }
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(ticks) => u16::from(ticks),
        Timing::Timecode(..) => return Err(ExportError::Layout("timecode timing".to_string())),
    };

    let mut note_ons = 0;
    let mut note_offs = 0;
    for event in &smf.tracks[0] {
        if let TrackEventKind::Midi { message, .. } = event.kind {
            match message {
                MidiMessage::NoteOn { .. } => note_ons += 1,
                MidiMessage::NoteOff { .. } => note_offs += 1,
                _ => {}
            }
        }
    }

    Ok(MidiSummary {
        tracks: smf.tracks.len(),
        ticks_per_beat,
        note_ons,
        note_offs,
    })
}

/// Flatten a performance for one export type
pub fn performance_events(performance: &Performance, export_type: ExportType) -> Vec<NoteEvent> {
    performance
        .notes(export_type.layers())
        .iter()
        .map(NoteEvent::from)
        .collect()
}

/// Export a performance and verify the bytes parse back
pub fn export_performance(
    performance: &Performance,
    export_type: ExportType,
) -> Result<Vec<u8>, ExportError> {
    let events = performance_events(performance, export_type);
    let bytes = export_midi(&events, performance.tempo as f64, &performance.title);
    let summary = validate_midi(&bytes)?;

    if summary.note_ons != events.len() || summary.note_offs != events.len() {
        return Err(ExportError::Layout(format!(
            "{} notes written, {} on / {} off read back",
            events.len(),
            summary.note_ons,
            summary.note_offs
        )));
    }

    log::info!(
        "Exported {} '{}': {} notes, {} bytes",
        export_type.to_string(),
        performance.title,
        events.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// `{artist}_{type}_{key}_{tempo}bpm[_v{n}].mid`
///
/// The artist part is lowercased with runs of anything but letters and
/// digits collapsed to `_`. Sharps in the key become `s` so the name stays
/// filesystem-safe. `variation` is the 1-based version number.
pub fn export_filename(
    artist: &str,
    export_type: ExportType,
    key: u8,
    tempo: u32,
    variation: Option<usize>,
) -> String {
    let mut slug = String::new();
    for c in artist.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    let slug = if slug.is_empty() { "rnb" } else { slug };

    let key = note_name(key).replace('#', "s");
    let mut name = format!("{}_{}_{}_{}bpm", slug, export_type.to_string(), key, tempo);
    if let Some(n) = variation {
        name.push_str(&format!("_v{}", n));
    }
    name.push_str(".mid");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arranger::chord::Chord;
    use midly::num::u15;

    fn note(note: i32, start: f64, duration: f64) -> NoteEvent {
        NoteEvent {
            note,
            start,
            duration,
            velocity: 80,
            channel: 0,
        }
    }

    fn progression() -> Performance {
        let chords = ["Cmaj7", "Am7", "Fmaj7", "G7"]
            .iter()
            .map(|name| Chord::split_hand(name, 3))
            .collect();
        Performance::from_chords("Test", chords, 90, 0.0)
    }

    #[test]
    fn test_vlq_known_values() {
        assert_eq!(encode_vlq(0), vec![0x00]);
        assert_eq!(encode_vlq(0x40), vec![0x40]);
        assert_eq!(encode_vlq(0x7F), vec![0x7F]);
        assert_eq!(encode_vlq(0x80), vec![0x81, 0x00]);
        assert_eq!(encode_vlq(0x2000), vec![0xC0, 0x00]);
        assert_eq!(encode_vlq(0x0FFF_FFFF), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_vlq_round_trip() {
        for value in [0, 1, 127, 128, 480, 16_383, 16_384, 1_000_000, 0x0FFF_FFFF] {
            let bytes = encode_vlq(value);
            assert_eq!(decode_vlq(&bytes), Some((value, bytes.len())));
            if value < 128 {
                assert_eq!(bytes.len(), 1);
            } else {
                assert_ne!(bytes[0], 0x80);
            }
        }
        assert_eq!(decode_vlq(&[0x81]), None);
    }

    #[test]
    fn test_header_and_tempo_bytes() {
        let bytes = export_midi(&[], 120.0, "A");

        assert_eq!(&bytes[0..4], b"MThd");
        assert_eq!(&bytes[4..14], &[0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0]);
        assert_eq!(&bytes[14..18], b"MTrk");
        // 500000 us per beat = 07 A1 20
        assert_eq!(
            &bytes[22..],
            &[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, 0x00, 0xFF, 0x03, 0x01, b'A', 0x00, 0xFF, 0x2F, 0x00]
        );
        assert_eq!(u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]), 16);
    }

    #[test]
    fn test_empty_export_is_valid() {
        let bytes = export_midi(&[], 90.0, "empty");
        let summary = validate_midi(&bytes).unwrap();

        assert_eq!(summary.tracks, 1);
        assert_eq!(summary.ticks_per_beat, 480);
        assert_eq!(summary.note_ons, 0);
    }

    #[test]
    fn test_export_is_deterministic() {
        let events = vec![note(60, 0.0, 1.0), note(64, 0.5, 0.5), note(67, 1.0, 2.0)];
        assert_eq!(export_midi(&events, 90.0, "x"), export_midi(&events, 90.0, "x"));
    }

    #[test]
    fn test_note_on_off_balance_and_ticks() {
        let events = vec![note(60, 0.0, 1.0), note(64, 1.5, 0.25), note(200, 2.0, 1.0)];
        let bytes = export_midi(&events, 100.0, "balance");
        let smf = Smf::parse(&bytes).unwrap();

        let mut tick = 0u32;
        let mut ons = Vec::new();
        let mut offs = Vec::new();
        for event in &smf.tracks[0] {
            tick += u32::from(event.delta);
            if let TrackEventKind::Midi { message, .. } = event.kind {
                match message {
                    MidiMessage::NoteOn { key, .. } => ons.push((u8::from(key), tick)),
                    MidiMessage::NoteOff { key, .. } => offs.push((u8::from(key), tick)),
                    _ => {}
                }
            }
        }

        assert_eq!(ons, vec![(60, 0), (64, 720), (127, 960)]);
        assert_eq!(offs, vec![(60, 480), (64, 840), (127, 1440)]);
    }

    #[test]
    fn test_same_tick_keeps_insertion_order() {
        // First note ends exactly where the second begins
        let events = vec![note(60, 0.0, 1.0), note(62, 1.0, 1.0)];
        let bytes = export_midi(&events, 90.0, "");
        let track = &bytes[22..];

        // tempo (7) + name (4), then on 60, off 60 at +480, on 62 at +0
        assert_eq!(&track[11..15], &[0x00, 0x90, 60, 80]);
        assert_eq!(&track[15..20], &[0x83, 0x60, 0x80, 60, 0]);
        assert_eq!(&track[20..24], &[0x00, 0x90, 62, 80]);
    }

    #[test]
    fn test_end_to_end_chords_export() {
        let bytes = export_performance(&progression(), ExportType::Chords).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(smf.header.timing, Timing::Metrical(u15::from(480u16)));

        let first = smf.tracks[0]
            .iter()
            .scan(0u32, |tick, e| {
                *tick += u32::from(e.delta);
                Some((*tick, e.kind))
            })
            .find(|(_, kind)| !matches!(kind, TrackEventKind::Meta(_)));

        match first {
            Some((0, TrackEventKind::Midi { message: MidiMessage::NoteOn { key, .. }, .. })) => {
                assert_eq!(u8::from(key), 64)
            }
            other => panic!("unexpected first event {:?}", other),
        }
    }

    #[test]
    fn test_export_types_route_channels() {
        let performance = progression();

        let drums = performance_events(&performance, ExportType::Drums);
        assert!(!drums.is_empty());
        assert!(drums.iter().all(|e| e.channel == 9));

        let piano = performance_events(&performance, ExportType::Piano);
        assert!(piano.iter().all(|e| e.channel == 0));
        assert!(piano.iter().any(|e| e.note == 48));

        let full = performance_events(&performance, ExportType::Full);
        for channel in [0, 1, 2, 3, 4, 5, 9] {
            assert!(full.iter().any(|e| e.channel == channel));
        }
    }

    #[test]
    fn test_invalid_tempo_falls_back() {
        let bytes = export_midi(&[], 0.0, "");
        // 60e6 / 90 = 666667 = 0A 2C 2B
        assert_eq!(&bytes[26..29], &[0x0A, 0x2C, 0x2B]);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Summer Walker", ExportType::Chords, 1, 78, Some(2)),
            "summer_walker_chords_Cs_78bpm_v2.mid"
        );
        assert_eq!(
            export_filename("Dark R&B", ExportType::Full, 0, 90, None),
            "dark_r_b_full_C_90bpm.mid"
        );
        assert_eq!(ExportType::from_string("PIANO"), ExportType::Piano);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(validate_midi(b"not a midi file").is_err());
    }
}
