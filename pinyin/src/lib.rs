//! pinyin-drill crate root
//!
//! This crate provides the pinyin-specific pieces of the fill-in-the-blank
//! drill: tone normalization, the exercise document parser, the two
//! pinyin-to-hanzi conversion policies and a `Drill` engine that composes
//! them with the shared `drill-core` session types.
//!
//! Public API exported here:
//! - `ExerciseParser` from `parser`
//! - `IncrementalMatcher`, `FullMatchMatcher` from `matcher`
//! - `Drill` from `engine`
//! - `normalize_tones` and the tone helpers from `tone`

pub mod config;
pub mod engine;
pub mod matcher;
pub mod parser;
pub mod tone;

// Re-export the core exercise types so callers need only this crate.
pub use drill_core::{
    Blank, BlankConverter, BlankId, BlankInputState, DocumentParser, ExerciseDocument,
    ParseDiagnostic, Session,
};

pub use config::{MatchPolicy, PinyinConfig};
pub use engine::Drill;
pub use matcher::{
    convert_full_match, convert_incremental, converter_for, FullMatchMatcher, IncrementalMatcher,
    MatchOptions,
};
pub use parser::ExerciseParser;
pub use tone::{
    ends_with_tone_digit, has_tone_marks, join_syllables, normalize_tones, strip_tones,
    syllable_tone, Tone,
};

/// Parse an exercise document with the default dialect.
pub fn parse(source: &str) -> ExerciseDocument {
    ExerciseParser::new().parse(source)
}
