//! Parsed exercise model.
//!
//! An `ExerciseDocument` is the result of parsing one exercise source text.
//! It is a pure value: parsing the same text twice yields equal documents,
//! and nothing in it changes after construction.

use std::collections::BTreeMap;

use serde::Serialize;

/// Stable identifier of a blank within one document (`blank-0`, `blank-1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlankId(String);

impl BlankId {
    /// Identifier for the blank at `index` among the accepted entries.
    pub fn from_index(index: usize) -> Self {
        Self(format!("blank-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fill-in-the-blank slot with its expected answer.
///
/// `expected_characters` and `expected_syllables` are parallel-indexed but
/// not guaranteed to have the same length. A missing syllable at some
/// position means "nothing is expected there" and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blank {
    pub id: BlankId,
    /// The full expected answer, e.g. "妈妈".
    pub hanzi: String,
    /// One entry per Unicode scalar value of `hanzi`, in reading order.
    pub expected_characters: Vec<String>,
    /// Tone-marked syllables, e.g. ["mā", "ma"].
    pub expected_syllables: Vec<String>,
}

impl Blank {
    /// Build a blank from its answer text and already-normalized syllables.
    pub fn new<S: Into<String>>(id: BlankId, hanzi: S, expected_syllables: Vec<String>) -> Self {
        let hanzi = hanzi.into();
        let expected_characters = hanzi.chars().map(|c| c.to_string()).collect();
        Self {
            id,
            hanzi,
            expected_characters,
            expected_syllables,
        }
    }

    /// Expected syllable at `index`, if any.
    pub fn syllable(&self, index: usize) -> Option<&str> {
        self.expected_syllables.get(index).map(String::as_str)
    }

    /// Number of characters the answer consists of.
    pub fn len(&self) -> usize {
        self.expected_characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected_characters.is_empty()
    }
}

/// A structured exercise extracted from a source document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExerciseDocument {
    /// `title` from the front matter, empty when absent.
    pub title: String,
    /// All front matter `key: value` pairs.
    pub front_matter: BTreeMap<String, String>,
    pub description: String,
    pub instructions: String,
    /// Sentence containing literal placeholder tokens.
    pub sentence_template: String,
    /// Placeholder token the template was written with (e.g. "BLANK").
    pub placeholder: String,
    pub blanks: Vec<Blank>,
}

impl ExerciseDocument {
    /// Number of placeholder tokens in the sentence template.
    pub fn placeholder_count(&self) -> usize {
        if self.placeholder.is_empty() {
            return 0;
        }
        self.sentence_template.matches(self.placeholder.as_str()).count()
    }

    /// True when the template's placeholder count disagrees with the blanks.
    ///
    /// This is a presentation warning only; the blanks that did parse remain
    /// fully usable.
    pub fn has_mismatch(&self) -> bool {
        self.placeholder_count() != self.blanks.len()
    }

    /// Template text around the placeholders.
    ///
    /// A template with `n` placeholders yields `n + 1` parts.
    pub fn sentence_parts(&self) -> Vec<&str> {
        if self.placeholder.is_empty() {
            return vec![self.sentence_template.as_str()];
        }
        self.sentence_template
            .split(self.placeholder.as_str())
            .collect()
    }
}

/// A non-fatal observation made while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseDiagnostic {
    /// A section start marker was not found; the section is empty.
    MissingSection { marker: String },
    /// A blanks-section span was not of the form `answer (pinyin)`.
    DroppedBlank { entry: String, reason: String },
    /// The sentence placeholders and parsed blanks disagree in number.
    PlaceholderMismatch { placeholders: usize, blanks: usize },
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseDiagnostic::MissingSection { marker } => {
                write!(f, "section '{}' not found", marker)
            }
            ParseDiagnostic::DroppedBlank { entry, reason } => {
                write!(f, "dropped blank entry '{}': {}", entry, reason)
            }
            ParseDiagnostic::PlaceholderMismatch {
                placeholders,
                blanks,
            } => write!(
                f,
                "sentence has {} placeholder(s) but {} blank(s) were parsed",
                placeholders, blanks
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(template: &str, blanks: usize) -> ExerciseDocument {
        ExerciseDocument {
            sentence_template: template.to_string(),
            placeholder: "BLANK".to_string(),
            blanks: (0..blanks)
                .map(|i| Blank::new(BlankId::from_index(i), "你", vec!["nǐ".into()]))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_splits_hanzi_per_scalar_value() {
        let b = Blank::new(BlankId::from_index(0), "请问", vec!["qǐng".into(), "wèn".into()]);
        assert_eq!(b.expected_characters, vec!["请", "问"]);
        assert_eq!(b.syllable(2), None);
        assert_eq!(b.id.as_str(), "blank-0");
    }

    #[test]
    fn sentence_parts_surround_placeholders() {
        let d = doc("BLANK，王先生。", 1);
        assert_eq!(d.sentence_parts(), vec!["", "，王先生。"]);
        assert_eq!(d.placeholder_count(), 1);
        assert!(!d.has_mismatch());
    }

    #[test]
    fn mismatch_when_counts_differ() {
        assert!(doc("BLANK BLANK", 1).has_mismatch());
        assert!(doc("no placeholders", 1).has_mismatch());
        assert!(!doc("no placeholders", 0).has_mismatch());
    }

    #[test]
    fn diagnostics_render_readably() {
        let d = ParseDiagnostic::PlaceholderMismatch {
            placeholders: 2,
            blanks: 1,
        };
        assert_eq!(
            d.to_string(),
            "sentence has 2 placeholder(s) but 1 blank(s) were parsed"
        );
    }
}
