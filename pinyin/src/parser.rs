// pinyin/src/parser.rs
//
// Exercise document parser.
//
// Exercises are written in a small sectioned markdown dialect:
//
//   ---
//   title: Task 4
//   ---
//   # --description--
//   ...
//   # --instructions--
//   ...
//   # --fillInTheBlank--
//   ## --sentence--
//   `BLANK，王先生。`
//   ## --blanks--
//   `你好 (ni3 hao3)`
//
// Only the markers listed in `Config` are recognised; everything else is
// plain text. Parsing never fails: a missing section is empty and a blank
// entry that does not have the `answer (pinyin)` shape is dropped.

use std::collections::BTreeMap;

use drill_core::{utils, Blank, BlankId, Config, DocumentParser, ExerciseDocument, ParseDiagnostic};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::tone::normalize_tones;

/// `answer (pinyin syllables)`, surrounding whitespace insignificant.
static BLANK_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*\(([^)]+)\)\s*$").expect("valid blank entry pattern"));

/// Parser for pinyin fill-in-the-blank exercise documents.
#[derive(Debug, Clone)]
pub struct ExerciseParser {
    config: Config,
    code_span: Regex,
}

impl ExerciseParser {
    /// Create a parser for the default document dialect.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a parser using the markers and delimiter from `config`.
    pub fn with_config(config: Config) -> Self {
        let d = regex::escape(&config.code_delimiter.to_string());
        let code_span =
            Regex::new(&format!("{d}([^{d}]+){d}")).expect("escaped delimiter is a valid pattern");
        Self { config, code_span }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse `source` into an exercise document.
    pub fn parse(&self, source: &str) -> ExerciseDocument {
        self.parse_with_diagnostics(source).0
    }

    /// Parse `source` and also report what was skipped or inconsistent.
    ///
    /// The returned document is identical to the one `parse` produces.
    pub fn parse_with_diagnostics(&self, source: &str) -> (ExerciseDocument, Vec<ParseDiagnostic>) {
        let cfg = &self.config;
        let mut diagnostics = Vec::new();

        let mut section = |start: &str, ends: &[String]| -> String {
            match extract_section(source, start, ends) {
                Some(text) => text.to_string(),
                None => {
                    diagnostics.push(ParseDiagnostic::MissingSection {
                        marker: start.to_string(),
                    });
                    String::new()
                }
            }
        };

        let description = section(cfg.description_marker.as_str(), cfg.description_end_markers.as_slice());
        let instructions = section(cfg.instructions_marker.as_str(), cfg.instructions_end_markers.as_slice());
        let sentence_section = section(cfg.sentence_marker.as_str(), cfg.sentence_end_markers.as_slice());
        let blanks_section = section(cfg.blanks_marker.as_str(), cfg.blanks_end_markers.as_slice());

        let sentence_template = match self.code_spans(&sentence_section).into_iter().next() {
            Some(span) => span,
            None => sentence_section
                .replace(cfg.code_delimiter, "")
                .trim()
                .to_string(),
        };

        let mut blanks = Vec::new();
        for entry in self.code_spans(&blanks_section) {
            match parse_blank_entry(&entry, blanks.len()) {
                Ok(blank) => blanks.push(blank),
                Err(reason) => {
                    debug!(entry = entry.as_str(), reason, "dropping blank entry");
                    diagnostics.push(ParseDiagnostic::DroppedBlank {
                        entry,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let front_matter = parse_front_matter(source, &cfg.front_matter_delimiter);
        let title = front_matter.get("title").cloned().unwrap_or_default();

        let document = ExerciseDocument {
            title,
            front_matter,
            description,
            instructions,
            sentence_template,
            placeholder: cfg.placeholder.clone(),
            blanks,
        };

        if document.has_mismatch() {
            diagnostics.push(ParseDiagnostic::PlaceholderMismatch {
                placeholders: document.placeholder_count(),
                blanks: document.blanks.len(),
            });
        }

        debug!(
            blanks = document.blanks.len(),
            diagnostics = diagnostics.len(),
            "parsed exercise document"
        );
        (document, diagnostics)
    }

    /// All delimited literal spans of `text`, trimmed, in document order.
    pub fn code_spans(&self, text: &str) -> Vec<String> {
        self.code_span
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }
}

impl Default for ExerciseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for ExerciseParser {
    fn parse(&self, source: &str) -> ExerciseDocument {
        ExerciseParser::parse(self, source)
    }
}

/// Text between `start` and the nearest of `ends` (or the end of `source`),
/// trimmed. `None` when `start` does not occur.
pub fn extract_section<'a>(source: &'a str, start: &str, ends: &[String]) -> Option<&'a str> {
    let start_idx = source.find(start)?;
    let rest = &source[start_idx + start.len()..];
    let end_idx = ends
        .iter()
        .filter(|m| !m.is_empty())
        .filter_map(|m| rest.find(m.as_str()))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end_idx].trim())
}

/// Parse one blanks-section span of the form `answer (pinyin)`.
///
/// `index` is the position among accepted blanks and becomes the id.
pub fn parse_blank_entry(entry: &str, index: usize) -> Result<Blank, &'static str> {
    let caps = BLANK_ENTRY
        .captures(entry)
        .ok_or("expected `answer (pinyin)`")?;
    let hanzi = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if hanzi.is_empty() {
        return Err("empty answer");
    }
    // authored diacritics may be decomposed; compose them so they compare
    // equal to normalized input
    let raw_pinyin = caps.get(2).map(|m| utils::normalize(m.as_str())).unwrap_or_default();
    let syllables = raw_pinyin.split_whitespace().map(normalize_tones).collect();
    Ok(Blank::new(BlankId::from_index(index), hanzi, syllables))
}

/// Read `key: value` lines from a leading front matter block.
///
/// The block must start at the very beginning of the document and be closed
/// by a second delimiter; otherwise the result is empty.
pub fn parse_front_matter(source: &str, delimiter: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    if delimiter.is_empty() {
        return values;
    }
    let Some(rest) = source.strip_prefix(delimiter) else {
        return values;
    };
    let Some(end) = rest.find(delimiter) else {
        return values;
    };

    for line in rest[..end].lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim();
            if !key.is_empty() && !value.is_empty() {
                values.insert(key.to_string(), value.to_string());
            }
        }
    }
    values
}
