//! Per-blank input state.
//!
//! The raw keystrokes are the only source of truth. The display value and
//! the matched flag are always recomputed from them in one step, so the three
//! fields can never drift apart.

use serde::Serialize;

use crate::engine::BlankConverter;
use crate::exercise::Blank;

/// Input state for one blank under one matching policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlankInputState {
    raw: String,
    display: String,
    matched: bool,
}

impl BlankInputState {
    /// Empty state, as after a document (re)load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact keystrokes typed so far.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Converted text shown to the user.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// True when the display equals the blank's full expected answer.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Produce the next state for `raw` typed into `blank`.
    ///
    /// Pure: the result depends only on `raw`, `blank` and the converter.
    pub fn reduce<C: BlankConverter + ?Sized>(
        self,
        raw: &str,
        blank: &Blank,
        converter: &C,
    ) -> Self {
        Self::derive(raw, blank, converter)
    }

    /// Build a state directly from raw input.
    pub fn derive<C: BlankConverter + ?Sized>(raw: &str, blank: &Blank, converter: &C) -> Self {
        let display = converter.convert(raw, blank);
        let matched = display == blank.hanzi;
        Self {
            raw: raw.to_string(),
            display,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::BlankId;

    /// Converts only on an exact copy of the answer.
    struct Echo;

    impl BlankConverter for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn convert(&self, raw: &str, _blank: &Blank) -> String {
            raw.trim().to_string()
        }
    }

    #[test]
    fn reduce_recomputes_all_fields() {
        let blank = Blank::new(BlankId::from_index(0), "你好", vec![]);
        let s = BlankInputState::new().reduce("你", &blank, &Echo);
        assert_eq!(s.raw(), "你");
        assert_eq!(s.display(), "你");
        assert!(!s.matched());

        let s = s.reduce(" 你好 ", &blank, &Echo);
        assert_eq!(s.raw(), " 你好 ");
        assert_eq!(s.display(), "你好");
        assert!(s.matched());

        let s = s.reduce("", &blank, &Echo);
        assert_eq!(s, BlankInputState::new());
    }
}
