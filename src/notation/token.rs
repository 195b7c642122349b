//! Tokenizer for Stoton notation
//!
//! Scans the input left to right and produces a typed token stream.
//! Characters that do not start any token are skipped silently; the
//! notation is permissive by design.
//!
//! Tokens:
//! - `↑` / `↓`: shift the persistent octave up / down
//! - a single digit `0`-`9`: set the persistent octave absolutely
//! - note: `[‘”]?<pitch symbol>ー*[#♭]?` where `‘`/`”` raise/lower the
//!   octave for that note only, each `ー` adds one duration unit, and a
//!   trailing accidental is consumed but carries no meaning

/// Pitch symbols recognized by the note production.
///
/// ファ must stay ahead of the single-char symbols so the two-char
/// digraph is matched as a whole.
pub(crate) const PITCH_SYMBOLS: [&str; 8] = ["ファ", "ド", "レ", "ミ", "ソ", "ラ", "シ", "ン"];

/// One-shot octave modifier attached to a single note token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveMark {
    /// `‘` - this note sounds one octave above the persistent octave
    Raise,
    /// `”` - this note sounds one octave below the persistent octave
    Lower,
}

impl OctaveMark {
    /// Octave offset contributed by the mark
    pub fn offset(self) -> i32 {
        match self {
            OctaveMark::Raise => 1,
            OctaveMark::Lower => -1,
        }
    }
}

/// Accidental suffix on a note token
///
/// Accidentals are part of the notation's surface grammar but do not
/// alter the rendered frequency. They are captured so the token stream
/// reflects the input faithfully, then ignored by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Sharp,
    Flat,
}

/// A single token from the notation stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `↑` - increment the persistent octave
    ShiftUp,
    /// `↓` - decrement the persistent octave
    ShiftDown,
    /// `0`-`9` - set the persistent octave to the literal digit
    SetOctave(u8),
    /// A note: optional one-shot octave mark, pitch symbol, sustain
    /// marks, optional inert accidental
    Note {
        mark: Option<OctaveMark>,
        symbol: &'a str,
        sustains: u32,
        accidental: Option<Accidental>,
    },
}

/// Tokenize a notation string
///
/// Returns every token in input order. Unrecognized characters are
/// skipped without producing anything; an input with no tokens at all
/// yields an empty vector.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '↑' => {
                tokens.push(Token::ShiftUp);
                rest = &rest[c.len_utf8()..];
            }
            '↓' => {
                tokens.push(Token::ShiftDown);
                rest = &rest[c.len_utf8()..];
            }
            '0'..='9' => {
                tokens.push(Token::SetOctave(c as u8 - b'0'));
                rest = &rest[c.len_utf8()..];
            }
            _ => {
                if let Some((token, tail)) = match_note(rest) {
                    tokens.push(token);
                    rest = tail;
                } else {
                    // Not the start of any production: skip one char
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
    }

    tokens
}

/// Try to match a note token at the start of `input`
///
/// Returns the token and the remaining input on success. A lone octave
/// mark with no pitch symbol behind it is not a note; the caller then
/// skips the mark like any other stray character.
fn match_note(input: &str) -> Option<(Token<'_>, &str)> {
    let (mark, after_mark) = match input.chars().next()? {
        '‘' => (Some(OctaveMark::Raise), &input['‘'.len_utf8()..]),
        '”' => (Some(OctaveMark::Lower), &input['”'.len_utf8()..]),
        _ => (None, input),
    };

    let symbol = PITCH_SYMBOLS
        .iter()
        .copied()
        .find(|s| after_mark.starts_with(s))?;
    let mut rest = &after_mark[symbol.len()..];

    let mut sustains = 0u32;
    while let Some(tail) = rest.strip_prefix('ー') {
        sustains += 1;
        rest = tail;
    }

    let accidental = match rest.chars().next() {
        Some('#') => {
            rest = &rest['#'.len_utf8()..];
            Some(Accidental::Sharp)
        }
        Some('♭') => {
            rest = &rest['♭'.len_utf8()..];
            Some(Accidental::Flat)
        }
        _ => None,
    };

    Some((
        Token::Note {
            mark,
            symbol,
            sustains,
            accidental,
        },
        rest,
    ))
}
