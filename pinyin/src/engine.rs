//! Pinyin drill engine
//!
//! Provides `Drill`, which combines the exercise parser with one input
//! session per matching policy. Every (re)load parses the document once and
//! hands the same parsed value to both sessions, resetting all input.

use std::sync::Arc;

use drill_core::{BlankInputState, ExerciseDocument, ParseDiagnostic, Session};
use tracing::info;

use crate::config::{MatchPolicy, PinyinConfig};
use crate::matcher::{FullMatchMatcher, IncrementalMatcher, MatchOptions};
use crate::parser::ExerciseParser;

/// A loaded exercise with independent incremental and full-match input.
pub struct Drill {
    parser: ExerciseParser,
    config: PinyinConfig,
    document: Arc<ExerciseDocument>,
    diagnostics: Vec<ParseDiagnostic>,
    incremental: Session<IncrementalMatcher>,
    full_match: Session<FullMatchMatcher>,
}

impl Drill {
    /// Create an engine with no document loaded.
    pub fn new(config: PinyinConfig) -> Self {
        let options = MatchOptions::from(&config);
        Self {
            parser: ExerciseParser::with_config(config.base.clone()),
            config,
            document: Arc::new(ExerciseDocument::default()),
            diagnostics: Vec::new(),
            incremental: Session::new(IncrementalMatcher::new(options)),
            full_match: Session::new(FullMatchMatcher::new(options)),
        }
    }

    /// Create an engine with default configuration and load `source`.
    pub fn from_source(source: &str) -> Self {
        let mut drill = Self::new(PinyinConfig::default());
        drill.load(source);
        drill
    }

    /// Parse `source` and reset the input of every blank in both policies.
    pub fn load(&mut self, source: &str) -> &ExerciseDocument {
        let (document, diagnostics) = self.parser.parse_with_diagnostics(source);
        let document = Arc::new(document);
        info!(
            title = document.title.as_str(),
            blanks = document.blanks.len(),
            mismatch = document.has_mismatch(),
            "exercise loaded"
        );

        self.incremental.load(Arc::clone(&document));
        self.full_match.load(Arc::clone(&document));
        self.document = document;
        self.diagnostics = diagnostics;
        &self.document
    }

    pub fn document(&self) -> &ExerciseDocument {
        &self.document
    }

    /// Non-fatal observations from the last load.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn config(&self) -> &PinyinConfig {
        &self.config
    }

    /// Placeholder/blank count disagreement in the loaded document.
    pub fn has_mismatch(&self) -> bool {
        self.document.has_mismatch()
    }

    /// Apply raw input to blank `index` under `policy`.
    ///
    /// Returns `None` if the document has no such blank.
    pub fn input(&mut self, policy: MatchPolicy, index: usize, raw: &str) -> Option<&BlankInputState> {
        match policy {
            MatchPolicy::Incremental => self.incremental.input(index, raw),
            MatchPolicy::FullMatch => self.full_match.input(index, raw),
        }
    }

    /// Current state of blank `index` under `policy`.
    pub fn state(&self, policy: MatchPolicy, index: usize) -> Option<&BlankInputState> {
        match policy {
            MatchPolicy::Incremental => self.incremental.state(index),
            MatchPolicy::FullMatch => self.full_match.state(index),
        }
    }

    /// Clear the input of blank `index` under `policy`.
    pub fn clear(&mut self, policy: MatchPolicy, index: usize) -> bool {
        match policy {
            MatchPolicy::Incremental => self.incremental.clear(index),
            MatchPolicy::FullMatch => self.full_match.clear(index),
        }
    }

    /// True when every blank is matched under `policy`.
    pub fn is_complete(&self, policy: MatchPolicy) -> bool {
        match policy {
            MatchPolicy::Incremental => self.incremental.is_complete(),
            MatchPolicy::FullMatch => self.full_match.is_complete(),
        }
    }

    /// Sentence with each placeholder replaced by the display value of the
    /// corresponding blank under `policy`. Placeholders without a blank stay
    /// empty; surplus blanks are not shown.
    pub fn render_sentence(&self, policy: MatchPolicy) -> String {
        let parts = self.document.sentence_parts();
        let mut out = String::new();
        for (i, part) in parts.iter().enumerate() {
            out.push_str(part);
            if i + 1 < parts.len() {
                if let Some(state) = self.state(policy, i) {
                    out.push_str(state.display());
                }
            }
        }
        out
    }
}

impl Default for Drill {
    fn default() -> Self {
        Self::new(PinyinConfig::default())
    }
}
