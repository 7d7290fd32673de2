//! drill-core
//!
//! Exercise model, per-blank input state and session logic shared by the
//! language-specific drill crates (currently `pinyin-drill`).
//!
//! Public API:
//! - `ExerciseDocument`, `Blank`, `BlankId` - parsed exercise values
//! - `ParseDiagnostic` - non-fatal parser observations
//! - `BlankInputState` - raw input plus derived display/matched flag
//! - `BlankConverter`, `DocumentParser` - seams implemented by language crates
//! - `Session` - per-policy input states for one document
//! - `Config` - section markers and template conventions
use serde::{Deserialize, Serialize};

pub mod exercise;
pub use exercise::{Blank, BlankId, ExerciseDocument, ParseDiagnostic};

pub mod state;
pub use state::BlankInputState;

pub mod engine;
pub use engine::{BlankConverter, DocumentParser, Session};

/// Generic configuration for exercise documents.
///
/// Only the document dialect lives here. Conversion options (lower-casing,
/// neutral tone handling) belong in the language crate's config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Marker opening the description section.
    pub description_marker: String,
    /// Marker opening the instructions section.
    pub instructions_marker: String,
    /// Marker opening the sentence section.
    pub sentence_marker: String,
    /// Marker opening the blanks section.
    pub blanks_marker: String,

    /// Markers that may end the description section.
    pub description_end_markers: Vec<String>,
    /// Markers that may end the instructions section.
    pub instructions_end_markers: Vec<String>,
    /// Markers that may end the sentence section.
    pub sentence_end_markers: Vec<String>,
    /// Markers that may end the blanks section.
    pub blanks_end_markers: Vec<String>,

    /// Character enclosing literal spans (sentence template, blank entries).
    pub code_delimiter: char,
    /// Token marking a blank inside the sentence template.
    pub placeholder: String,
    /// Delimiter line surrounding the front matter block.
    pub front_matter_delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            description_marker: "# --description--".to_string(),
            instructions_marker: "# --instructions--".to_string(),
            sentence_marker: "## --sentence--".to_string(),
            blanks_marker: "## --blanks--".to_string(),
            description_end_markers: vec!["# --instructions--".to_string()],
            instructions_end_markers: vec!["# --fillInTheBlank--".to_string()],
            sentence_end_markers: vec!["## --blanks--".to_string()],
            blanks_end_markers: vec![
                "### --feedback--".to_string(),
                "# --explanation--".to_string(),
            ],
            code_delimiter: '`',
            placeholder: "BLANK".to_string(),
            front_matter_delimiter: "---".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// First whitespace-delimited token of `s` (empty when `s` is blank).
    pub fn first_token(s: &str) -> &str {
        s.split_whitespace().next().unwrap_or("")
    }

    /// Split `s` on runs of whitespace, dropping empty pieces.
    pub fn tokens(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("placeholder = \"___\"\n").unwrap();
        assert_eq!(cfg.placeholder, "___");
        assert_eq!(cfg.sentence_marker, "## --sentence--");
        assert_eq!(cfg.code_delimiter, '`');
    }

    #[test]
    fn load_toml_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "drill_core_config_{}.toml", std::process::id()
        ));
        std::fs::write(&path, "placeholder = \"___\"\ncode_delimiter = \"|\"\n").unwrap();
        let cfg = Config::load_toml(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.placeholder, "___");
        assert_eq!(cfg.code_delimiter, '|');
        assert_eq!(cfg.blanks_marker, Config::default().blanks_marker);

        assert!(Config::load_toml(&path).is_err());
    }

    #[test]
    fn normalize_composes_and_trims() {
        assert_eq!(utils::normalize("  ma\u{304} "), "mā");
        assert_eq!(utils::first_token("  ni3 hao3"), "ni3");
        assert_eq!(utils::first_token("   "), "");
        assert_eq!(utils::tokens(" a  b\tc "), vec!["a", "b", "c"]);
    }
}
