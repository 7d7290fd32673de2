//! Integration tests for the generic session with a boxed converter.
//!
//! Uses a toy converter that maps "a" to the answer so the tests exercise
//! only the state bookkeeping, not any language rules.

use std::sync::Arc;

use drill_core::{Blank, BlankConverter, BlankId, BlankInputState, ExerciseDocument, Session};

struct Toy;

impl BlankConverter for Toy {
    fn name(&self) -> &'static str {
        "toy"
    }

    fn convert(&self, raw: &str, blank: &Blank) -> String {
        raw.trim()
            .split_whitespace()
            .map(|t| if t == "a" { blank.hanzi.as_str() } else { t })
            .collect()
    }
}

fn document(answers: &[&str]) -> Arc<ExerciseDocument> {
    Arc::new(ExerciseDocument {
        sentence_template: vec!["BLANK"; answers.len()].join(" "),
        placeholder: "BLANK".to_string(),
        blanks: answers
            .iter()
            .enumerate()
            .map(|(i, a)| Blank::new(BlankId::from_index(i), *a, vec![]))
            .collect(),
        ..Default::default()
    })
}

#[test]
fn boxed_converter_drives_session() {
    let converter: Box<dyn BlankConverter> = Box::new(Toy);
    let mut session = Session::with_document(converter, document(&["你", "好"]));

    let state = session.input(1, "a").unwrap();
    assert_eq!(state.display(), "好");
    assert!(state.matched());

    assert_eq!(session.state(0), Some(&BlankInputState::new()));
    assert_eq!(session.matched_count(), 1);
    assert_eq!(session.converter().name(), "toy");
}

#[test]
fn state_is_derived_from_latest_raw_only() {
    let mut session = Session::with_document(Toy, document(&["你"]));
    session.input(0, "a");
    let state = session.input(0, "b").unwrap();
    assert_eq!(state.raw(), "b");
    assert_eq!(state.display(), "b");
    assert!(!state.matched());
}

#[test]
fn clear_and_reload() {
    let mut session = Session::with_document(Toy, document(&["你", "好"]));
    session.input(0, "a");
    session.input(1, "a");
    assert!(session.is_complete());

    assert!(session.clear(0));
    assert!(!session.is_complete());

    session.load(document(&["我"]));
    assert_eq!(session.states().len(), 1);
    assert_eq!(session.document().blanks[0].hanzi, "我");
    assert_eq!(session.matched_count(), 0);
}
