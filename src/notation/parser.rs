//! Parser for Stoton notation
//!
//! Interprets the token stream into an ordered sequence of note events.
//! The scan carries one piece of state: the persistent octave, starting
//! at 5 on every call. `↑`/`↓` and digit tokens mutate it; the one-shot
//! `‘`/`”` marks adjust a single note without touching it.
//!
//! Parsing only fails outright when the input matches no token at all.
//! A note token whose symbol falls outside the pitch set is dropped
//! with a warning instead of aborting the scan.

use thiserror::Error;
use tracing::warn;

use crate::notation::token::{tokenize, Token};

/// Octave every parse starts from; base frequencies are defined here
pub const DEFAULT_OCTAVE: i32 = 5;

/// The fixed set of pitch symbols, seven scale steps plus a rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    Do,
    Re,
    Mi,
    Fa,
    So,
    La,
    Si,
    /// ン - a rest; always silent regardless of octave
    Rest,
}

impl Pitch {
    /// Look up a pitch by its notation symbol
    pub fn from_symbol(symbol: &str) -> Option<Pitch> {
        match symbol {
            "ド" => Some(Pitch::Do),
            "レ" => Some(Pitch::Re),
            "ミ" => Some(Pitch::Mi),
            "ファ" => Some(Pitch::Fa),
            "ソ" => Some(Pitch::So),
            "ラ" => Some(Pitch::La),
            "シ" => Some(Pitch::Si),
            "ン" => Some(Pitch::Rest),
            _ => None,
        }
    }

    /// The notation symbol for this pitch
    pub fn symbol(self) -> &'static str {
        match self {
            Pitch::Do => "ド",
            Pitch::Re => "レ",
            Pitch::Mi => "ミ",
            Pitch::Fa => "ファ",
            Pitch::So => "ソ",
            Pitch::La => "ラ",
            Pitch::Si => "シ",
            Pitch::Rest => "ン",
        }
    }

    /// Base frequency in Hz at the reference octave (5)
    ///
    /// The rest maps to 0 Hz.
    pub fn base_frequency(self) -> f64 {
        match self {
            Pitch::Do => 261.63,
            Pitch::Re => 293.66,
            Pitch::Mi => 329.63,
            Pitch::Fa => 349.23,
            Pitch::So => 392.0,
            Pitch::La => 440.0,
            Pitch::Si => 493.88,
            Pitch::Rest => 0.0,
        }
    }
}

/// A single note event: what to play, at which octave, for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    /// Signed octave index; 5 is the reference octave, each step away
    /// doubles or halves the frequency
    pub octave: i32,
    /// Duration in units (1 + number of sustain marks), always >= 1
    pub duration_units: u32,
}

impl NoteEvent {
    /// Frequency in Hz for this event
    ///
    /// A rest is 0 Hz at any octave.
    pub fn frequency(&self) -> f64 {
        if self.pitch == Pitch::Rest {
            return 0.0;
        }
        self.pitch.base_frequency() * 2f64.powi(self.octave - DEFAULT_OCTAVE)
    }
}

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Note events in input order
    pub notes: Vec<NoteEvent>,
    /// One message per dropped note token
    pub warnings: Vec<String>,
}

impl Score {
    /// Whether the score contains no playable events
    ///
    /// An empty score is how "valid tokens but no notes" (e.g. `"↑↑"`)
    /// surfaces; callers should treat it as an invalid melody. An
    /// all-rest score is not empty.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total duration in units across all events
    pub fn duration_units(&self) -> u64 {
        self.notes.iter().map(|n| u64::from(n.duration_units)).sum()
    }
}

/// Parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained no recognizable notation at all
    #[error("input contains no recognizable notation")]
    InvalidInput,
}

/// Parse a Stoton notation string into a score
///
/// Fails only when no token matches anywhere in the input. Otherwise
/// degrades token by token: unrecognized characters are skipped by the
/// tokenizer, and note tokens outside the pitch set are dropped with a
/// warning.
pub fn parse(input: &str) -> Result<Score, ParseError> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(ParseError::InvalidInput);
    }
    Ok(interpret(&tokens))
}

/// Fold a token stream into a score
///
/// The octave state lives here, constructed fresh per call.
fn interpret(tokens: &[Token<'_>]) -> Score {
    let mut octave = DEFAULT_OCTAVE;
    let mut notes = Vec::new();
    let mut warnings = Vec::new();

    for token in tokens {
        match *token {
            Token::ShiftUp => octave += 1,
            Token::ShiftDown => octave -= 1,
            Token::SetOctave(digit) => octave = i32::from(digit),
            Token::Note {
                mark,
                symbol,
                sustains,
                accidental: _,
            } => {
                // Defensive: the tokenizer only emits symbols from the
                // pitch set, but a mismatch must never become an event
                let Some(pitch) = Pitch::from_symbol(symbol) else {
                    warn!(symbol, "dropping unrecognized pitch symbol");
                    warnings.push(format!("unrecognized pitch symbol: {symbol}"));
                    continue;
                };

                let note_octave = octave + mark.map_or(0, |m| m.offset());
                notes.push(NoteEvent {
                    pitch,
                    octave: note_octave,
                    duration_units: 1 + sustains,
                });
            }
        }
    }

    Score { notes, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(pitch: Pitch, octave: i32, duration_units: u32) -> NoteEvent {
        NoteEvent {
            pitch,
            octave,
            duration_units,
        }
    }

    #[test]
    fn test_simple_melody() {
        let score = parse("ドレミ").unwrap();
        assert_eq!(
            score.notes,
            vec![
                note(Pitch::Do, 5, 1),
                note(Pitch::Re, 5, 1),
                note(Pitch::Mi, 5, 1),
            ]
        );
        assert!(score.warnings.is_empty());
    }

    #[test]
    fn test_sustain_extends_duration() {
        let score = parse("ドー").unwrap();
        assert_eq!(score.notes, vec![note(Pitch::Do, 5, 2)]);

        let score = parse("ファーーー").unwrap();
        assert_eq!(score.notes, vec![note(Pitch::Fa, 5, 4)]);
    }

    #[test]
    fn test_octave_shift_persists() {
        let score = parse("↑ド↓ド").unwrap();
        assert_eq!(
            score.notes,
            vec![note(Pitch::Do, 6, 1), note(Pitch::Do, 5, 1)]
        );

        // The second event sounds exactly one octave below the first
        let high = score.notes[0].frequency();
        let low = score.notes[1].frequency();
        assert!((low - high / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_absolute_octave() {
        let score = parse("5ド0ド").unwrap();
        assert_eq!(
            score.notes,
            vec![note(Pitch::Do, 5, 1), note(Pitch::Do, 0, 1)]
        );

        let ratio = score.notes[1].frequency() / score.notes[0].frequency();
        assert!((ratio - 2f64.powi(-5)).abs() < 1e-12);
    }

    #[test]
    fn test_octave_below_zero() {
        let score = parse("0↓ド").unwrap();
        assert_eq!(score.notes, vec![note(Pitch::Do, -1, 1)]);
    }

    #[test]
    fn test_one_shot_mark_does_not_persist() {
        let score = parse("‘ドレ”ミソ").unwrap();
        assert_eq!(
            score.notes,
            vec![
                note(Pitch::Do, 6, 1),
                note(Pitch::Re, 5, 1),
                note(Pitch::Mi, 4, 1),
                note(Pitch::So, 5, 1),
            ]
        );
    }

    #[test]
    fn test_one_shot_mark_combines_with_state() {
        let score = parse("↑‘ド").unwrap();
        assert_eq!(score.notes, vec![note(Pitch::Do, 7, 1)]);
    }

    #[test]
    fn test_lone_rest_is_valid() {
        let score = parse("ン").unwrap();
        assert_eq!(score.notes, vec![note(Pitch::Rest, 5, 1)]);
        assert!(!score.is_empty());
        assert_eq!(score.notes[0].frequency(), 0.0);
    }

    #[test]
    fn test_rest_is_silent_at_any_octave() {
        let score = parse("↑↑ン9ン").unwrap();
        for event in &score.notes {
            assert_eq!(event.frequency(), 0.0);
        }
    }

    #[test]
    fn test_no_tokens_is_invalid_input() {
        assert_eq!(parse("hello"), Err(ParseError::InvalidInput));
        assert_eq!(parse(""), Err(ParseError::InvalidInput));
        assert_eq!(parse("、。！"), Err(ParseError::InvalidInput));
    }

    #[test]
    fn test_tokens_without_notes_is_empty_score() {
        // Arrows alone parse fine but yield zero events; the caller
        // distinguishes this from an all-rest melody
        let score = parse("↑↑").unwrap();
        assert!(score.is_empty());
        assert!(score.warnings.is_empty());
    }

    #[test]
    fn test_unrecognized_symbol_is_dropped_with_warning() {
        // The tokenizer cannot produce this, but the interpreter must
        // still refuse to turn it into an event
        let tokens = [
            Token::Note {
                mark: None,
                symbol: "ボ",
                sustains: 0,
                accidental: None,
            },
            Token::Note {
                mark: None,
                symbol: "レ",
                sustains: 0,
                accidental: None,
            },
        ];
        let score = interpret(&tokens);
        assert_eq!(score.notes, vec![note(Pitch::Re, 5, 1)]);
        assert_eq!(score.warnings, vec!["unrecognized pitch symbol: ボ"]);
    }

    #[test]
    fn test_accidentals_do_not_change_frequency() {
        let plain = parse("ド").unwrap();
        let sharp = parse("ド#").unwrap();
        let flat = parse("ド♭").unwrap();
        assert_eq!(plain.notes, sharp.notes);
        assert_eq!(plain.notes, flat.notes);
    }

    #[test]
    fn test_state_resets_between_calls() {
        let shifted = parse("↑↑↑ド").unwrap();
        assert_eq!(shifted.notes[0].octave, 8);

        // A fresh call starts back at the default octave
        let fresh = parse("ド").unwrap();
        assert_eq!(fresh.notes[0].octave, 5);
    }

    #[test]
    fn test_non_notation_characters_are_ignored() {
        let score = parse("ド レ\nミ!").unwrap();
        assert_eq!(score.notes.len(), 3);
        assert!(score.warnings.is_empty());
    }

    #[test]
    fn test_every_tokenizer_symbol_resolves() {
        for symbol in crate::notation::token::PITCH_SYMBOLS {
            assert!(
                Pitch::from_symbol(symbol).is_some(),
                "tokenizer symbol {symbol} has no pitch"
            );
        }
    }

    #[test]
    fn test_symbol_round_trip() {
        for pitch in [
            Pitch::Do,
            Pitch::Re,
            Pitch::Mi,
            Pitch::Fa,
            Pitch::So,
            Pitch::La,
            Pitch::Si,
            Pitch::Rest,
        ] {
            assert_eq!(Pitch::from_symbol(pitch.symbol()), Some(pitch));
        }
    }

    #[test]
    fn test_octave_doubles_frequency() {
        for pitch in [
            Pitch::Do,
            Pitch::Re,
            Pitch::Mi,
            Pitch::Fa,
            Pitch::So,
            Pitch::La,
            Pitch::Si,
        ] {
            for octave in -2..9 {
                let lower = note(pitch, octave, 1).frequency();
                let upper = note(pitch, octave + 1, 1).frequency();
                assert!(
                    (upper - 2.0 * lower).abs() < 1e-6,
                    "{pitch:?} octave {octave}"
                );
            }
        }
    }

    #[test]
    fn test_base_frequencies_at_reference_octave() {
        assert_eq!(note(Pitch::Do, 5, 1).frequency(), 261.63);
        assert_eq!(note(Pitch::La, 5, 1).frequency(), 440.0);
        assert_eq!(note(Pitch::Si, 5, 1).frequency(), 493.88);
    }
}
