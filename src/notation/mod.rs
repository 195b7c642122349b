//! Stoton notation front end
//!
//! Turns a notation string into an ordered sequence of note events:
//! - Token: typed tokenizer over the notation alphabet
//! - Parser: interprets the token stream with the octave scan state

pub mod parser;
pub mod token;

pub use parser::{parse, NoteEvent, ParseError, Pitch, Score};
pub use token::{tokenize, Accidental, OctaveMark, Token};
