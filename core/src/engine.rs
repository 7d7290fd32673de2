// core/src/engine.rs
//
// Generic exercise session that works with any blank converter.
// The language crates supply the document parser and the conversion
// policies; this module only owns the per-blank state.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::exercise::{Blank, ExerciseDocument};
use crate::state::BlankInputState;

/// Trait that conversion policies must implement to drive a `Session`.
pub trait BlankConverter {
    /// Short policy name used in logs (e.g. "incremental").
    fn name(&self) -> &'static str;

    /// Convert raw keystrokes into the display value for `blank`.
    ///
    /// Must be pure and total: "no match" is an ordinary outcome and is
    /// reported by returning unconverted text.
    fn convert(&self, raw: &str, blank: &Blank) -> String;
}

impl<C: BlankConverter + ?Sized> BlankConverter for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn convert(&self, raw: &str, blank: &Blank) -> String {
        (**self).convert(raw, blank)
    }
}

/// Trait for parsers that turn a source document into an exercise.
pub trait DocumentParser {
    /// Parse `source`. Must never fail; malformed parts degrade to empty values.
    fn parse(&self, source: &str) -> ExerciseDocument;
}

/// Input states for every blank of one document under one policy.
///
/// The state vector is always index-aligned with `document.blanks`. Loading
/// a new document resets every state.
pub struct Session<C> {
    converter: C,
    document: Arc<ExerciseDocument>,
    states: Vec<BlankInputState>,
}

impl<C: BlankConverter> Session<C> {
    /// Create a session with an empty document.
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            document: Arc::new(ExerciseDocument::default()),
            states: Vec::new(),
        }
    }

    /// Create a session and load `document` into it.
    pub fn with_document(converter: C, document: Arc<ExerciseDocument>) -> Self {
        let mut session = Self::new(converter);
        session.load(document);
        session
    }

    /// Replace the document and reset all input states to empty.
    pub fn load(&mut self, document: Arc<ExerciseDocument>) {
        debug!(
            policy = self.converter.name(),
            blanks = document.blanks.len(),
            "loading document, resetting input states"
        );
        self.states = vec![BlankInputState::new(); document.blanks.len()];
        self.document = document;
    }

    /// Apply new raw input to the blank at `index`.
    ///
    /// Returns the recomputed state, or `None` when `index` is out of range.
    /// Only the addressed blank's state is touched.
    pub fn input(&mut self, index: usize, raw: &str) -> Option<&BlankInputState> {
        let Some(blank) = self.document.blanks.get(index) else {
            warn!(
                policy = self.converter.name(),
                index,
                blanks = self.states.len(),
                "input for a blank that does not exist"
            );
            return None;
        };

        let slot = self.states.get_mut(index)?;
        let next = std::mem::take(slot).reduce(raw, blank, &self.converter);
        debug!(
            policy = self.converter.name(),
            index,
            raw,
            display = next.display(),
            matched = next.matched(),
            "blank updated"
        );
        *slot = next;
        Some(&*slot)
    }

    /// Clear the input of one blank.
    pub fn clear(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(slot) => {
                *slot = BlankInputState::new();
                true
            }
            None => false,
        }
    }

    /// Current state of the blank at `index`.
    pub fn state(&self, index: usize) -> Option<&BlankInputState> {
        self.states.get(index)
    }

    /// All states, index-aligned with the document's blanks.
    pub fn states(&self) -> &[BlankInputState] {
        &self.states
    }

    pub fn document(&self) -> &Arc<ExerciseDocument> {
        &self.document
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Number of blanks currently matched.
    pub fn matched_count(&self) -> usize {
        self.states.iter().filter(|s| s.matched()).count()
    }

    /// True when there is at least one blank and every blank is matched.
    pub fn is_complete(&self) -> bool {
        !self.states.is_empty() && self.states.iter().all(BlankInputState::matched)
    }
}
