// pinyin/src/matcher.rs
//
// Pinyin-to-hanzi conversion policies for a single blank.
//
// Both policies turn the raw keystrokes of one blank into the text shown to
// the user. Converted characters appear only where the typed pinyin matches
// the expected syllable; everything else is shown tone-normalized.
//
// The neutral tone needs care: "ma" is both a finished neutral syllable and
// the start of "ma1".."ma4". A neutral syllable therefore only converts once
// its token ends in an explicit tone digit.

use drill_core::utils::{first_token, tokens};
use drill_core::{Blank, BlankConverter};
use tracing::trace;

use crate::config::{MatchPolicy, PinyinConfig};
use crate::tone::{ends_with_tone_digit, has_tone_marks, join_syllables, normalize_tones};

/// Input handling shared by both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Lower-case input before tone normalization.
    pub lowercase_input: bool,
    /// Withhold neutral-tone syllables until a tone digit is typed.
    pub neutral_tone_gate: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            lowercase_input: true,
            neutral_tone_gate: true,
        }
    }
}

impl From<&PinyinConfig> for MatchOptions {
    fn from(config: &PinyinConfig) -> Self {
        Self {
            lowercase_input: config.lowercase_input,
            neutral_tone_gate: config.neutral_tone_gate,
        }
    }
}

impl MatchOptions {
    /// Tone-normalized form of typed text.
    fn normalize(&self, text: &str) -> String {
        if self.lowercase_input {
            normalize_tones(&text.to_lowercase())
        } else {
            normalize_tones(text)
        }
    }

    /// Whether `typed` may be accepted for `expected` as far as tone
    /// disambiguation goes. Toned syllables are always unambiguous; neutral
    /// ones need the typed token to end in a digit.
    fn tone_settled(&self, expected: &str, typed: &str) -> bool {
        !self.neutral_tone_gate || has_tone_marks(expected) || ends_with_tone_digit(typed)
    }
}

/// Syllable-by-syllable conversion.
///
/// Walks the expected characters left to right and converts each typed
/// syllable that matches. At the first syllable that does not match (or is a
/// neutral syllable still missing its digit) conversion stops and the rest of
/// the input is shown tone-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalMatcher {
    options: MatchOptions,
}

impl IncrementalMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }
}

impl BlankConverter for IncrementalMatcher {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn convert(&self, raw: &str, blank: &Blank) -> String {
        let mut remaining = raw.trim();
        let mut out = String::new();

        for (i, expected_char) in blank.expected_characters.iter().enumerate() {
            // already-converted text (pasted, or kept from a previous pass)
            if let Some(rest) = remaining.strip_prefix(expected_char.as_str()) {
                out.push_str(expected_char);
                remaining = rest.trim_start();
                continue;
            }

            let token = first_token(remaining);
            let toned = self.options.normalize(token);
            let Some(expected) = blank.syllable(i) else {
                trace!(position = i, "no expected syllable, stopping");
                break;
            };
            if first_token(&toned) != expected {
                trace!(position = i, typed = toned.as_str(), expected, "syllable mismatch, stopping");
                break;
            }
            if !self.options.tone_settled(expected, token) {
                trace!(position = i, typed = token, "neutral tone awaiting digit");
                break;
            }

            out.push_str(expected_char);
            remaining = remaining[token.len()..].trim_start();
        }

        if !remaining.is_empty() {
            out.push_str(&self.options.normalize(remaining));
        }
        out
    }
}

/// All-or-nothing conversion.
///
/// The whole input must equal the expected syllables (joined with spaces, or
/// concatenated) after tone normalization, and every neutral position must
/// carry a tone digit. Anything less is shown tone-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullMatchMatcher {
    options: MatchOptions,
}

impl FullMatchMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }
}

impl BlankConverter for FullMatchMatcher {
    fn name(&self) -> &'static str {
        "full-match"
    }

    fn convert(&self, raw: &str, blank: &Blank) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        let toned = self.options.normalize(trimmed);

        let spaced = join_syllables(&blank.expected_syllables, " ");
        let joined = join_syllables(&blank.expected_syllables, "");
        if toned != spaced && toned != joined {
            return toned;
        }

        let typed = tokens(trimmed);
        for (k, expected) in blank.expected_syllables.iter().enumerate() {
            let token = typed.get(k).copied().unwrap_or("");
            if !self.options.tone_settled(expected, token) {
                trace!(position = k, "neutral tone awaiting digit, withholding conversion");
                return toned;
            }
        }

        blank.hanzi.clone()
    }
}

/// Build the converter for `policy`.
pub fn converter_for(policy: MatchPolicy, options: MatchOptions) -> Box<dyn BlankConverter> {
    match policy {
        MatchPolicy::Incremental => Box::new(IncrementalMatcher::new(options)),
        MatchPolicy::FullMatch => Box::new(FullMatchMatcher::new(options)),
    }
}

/// Incremental conversion with default options.
pub fn convert_incremental(raw: &str, blank: &Blank) -> String {
    IncrementalMatcher::default().convert(raw, blank)
}

/// Full-match conversion with default options.
pub fn convert_full_match(raw: &str, blank: &Blank) -> String {
    FullMatchMatcher::default().convert(raw, blank)
}
