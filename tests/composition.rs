use blues_solo::composition::export::{export_solo, import_solo};
use blues_solo::composition::{ChordDegree, Progression, ScaleType, SoloGenerator, SoloOptions, Technique};
use blues_solo::{generate_scale, midi_to_freq, ConfigurationError, EngineError};

#[test]
fn every_note_comes_from_the_scale() {
    let mut generator = SoloGenerator::with_seed(42);
    for scale_type in ScaleType::ALL {
        let options = SoloOptions {
            key: 57,
            scale_type,
            num_phrases: 6,
            phrase_length: 12,
            ..SoloOptions::default()
        };
        let solo = generator.generate_solo(&options).unwrap();
        let scale = generate_scale(57, scale_type).unwrap();

        assert_eq!(solo.note_count(), 72);
        for note in solo.notes() {
            assert!(scale.pitches().contains(&note.pitch));
            assert!((note.frequency - midi_to_freq(note.pitch as f32)).abs() < 1e-3);
            assert!((0.25..0.75).contains(&note.duration));
        }
    }
}

#[test]
fn phrases_carry_rhythm_and_position() {
    let solo = SoloGenerator::with_seed(3)
        .generate_solo(&SoloOptions::default())
        .unwrap();
    let phrases = solo.phrases().unwrap();
    assert_eq!(phrases.len(), 4);

    for (i, phrase) in phrases.iter().enumerate() {
        assert_eq!(phrase.number, i as u32 + 1);
        assert_eq!(phrase.notes.len(), 8);
        for (step, note) in phrase.notes.iter().enumerate() {
            assert_eq!(note.phrase_number, Some(phrase.number));
            assert_eq!(note.beat_position, Some(step as f32 * 0.5));
            assert_eq!(note.rhythm.map(|r| r.subdivision), Some(step as u8));
        }
    }
}

#[test]
fn twelve_bar_follows_the_chords() {
    let solo = SoloGenerator::with_seed(12)
        .generate_solo_over_progression(Progression::TwelveBar, 60)
        .unwrap();
    let sections = solo.sections().unwrap();

    let chords: Vec<ChordDegree> = sections.iter().map(|s| s.chord).collect();
    use ChordDegree::*;
    assert_eq!(chords, [I, I, I, I, IV, IV, I, I, V, IV, I, V]);

    for section in sections {
        assert_eq!(section.beats, 4);
        assert_eq!(section.notes.len(), 8);
        assert_eq!(section.chord_root, 60 + section.chord.offset());
        let scale = generate_scale(section.chord_root, ScaleType::Blues).unwrap();
        assert!(section.notes.iter().all(|n| scale.pitches().contains(&n.pitch)));
    }

    assert_eq!(solo.metadata.tempo, 120.0);
    assert_eq!(solo.metadata.progression, Some(Progression::TwelveBar));
}

#[test]
fn same_seed_same_solo() {
    let options = SoloOptions::default();
    let a = SoloGenerator::with_seed(99).generate_solo(&options).unwrap();
    let b = SoloGenerator::with_seed(99).generate_solo(&options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bad_options_are_rejected() {
    let mut generator = SoloGenerator::with_seed(1);
    assert_eq!(
        generator.generate_solo(&SoloOptions {
            key: 125,
            ..SoloOptions::default()
        }),
        Err(ConfigurationError::KeyOutOfRange(125))
    );
    assert!(generator
        .generate_solo(&SoloOptions {
            tempo: 0.0,
            ..SoloOptions::default()
        })
        .is_err());
    assert!(matches!(
        "polka".parse::<ScaleType>(),
        Err(ConfigurationError::UnknownScale(_))
    ));
}

#[test]
fn techniques_are_drawn_from_every_kind() {
    let solo = SoloGenerator::with_seed(5)
        .generate_solo(&SoloOptions {
            num_phrases: 20,
            phrase_length: 16,
            ..SoloOptions::default()
        })
        .unwrap();
    let usage = solo.technique_usage();
    assert_eq!(usage.techniques, Technique::ALL.to_vec());
}

#[test]
fn export_document_round_trips() {
    let solo = SoloGenerator::with_seed(21)
        .generate_solo_over_progression(Progression::EightBar, 55)
        .unwrap();
    let json = export_solo(&solo).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["format"], "guitar-synth-midi");
    assert_eq!(value["version"], "1.0");
    assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(value["solo"]["sections"].is_array());
    assert_eq!(value["solo"]["metadata"]["timeSignature"], "4/4");

    assert_eq!(import_solo(&json).unwrap(), solo);

    let foreign = json.replace("guitar-synth-midi", "something-else");
    assert!(matches!(
        import_solo(&foreign),
        Err(EngineError::Configuration(ConfigurationError::UnsupportedExport { .. }))
    ));
}
