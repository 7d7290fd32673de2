//! Integration tests for exercise document parsing.
//!
//! Covers the full sectioned dialect, front matter, malformed entries and
//! the placeholder/blank mismatch signal.

use pinyin_drill::{parse, ExerciseParser, ParseDiagnostic};

const NEUTRAL_TONE_TASK: &str = "---
id: 68fe153a6494282327edcb3a
title: Task 4
challengeType: 22
dashedName: task-4
inputType: pinyin-to-hanzi
---

<!-- (Audio) Example with neutral tone (tone 5) -->

# --description--

Practice typing Pinyin with neutral tone.

# --instructions--

Type the Pinyin below. For neutral tone, you must type the number 5.

# --fillInTheBlank--

## --sentence--

`BLANK`

## --blanks--

`妈妈 (ma1 ma5)`
";

#[test]
fn full_document_sections() {
    let doc = parse(NEUTRAL_TONE_TASK);
    assert_eq!(doc.title, "Task 4");
    assert_eq!(doc.front_matter.get("inputType").map(String::as_str), Some("pinyin-to-hanzi"));
    assert_eq!(doc.description, "Practice typing Pinyin with neutral tone.");
    assert_eq!(
        doc.instructions,
        "Type the Pinyin below. For neutral tone, you must type the number 5."
    );
    assert_eq!(doc.sentence_template, "BLANK");
    assert_eq!(doc.blanks.len(), 1);

    let blank = &doc.blanks[0];
    assert_eq!(blank.id.as_str(), "blank-0");
    assert_eq!(blank.hanzi, "妈妈");
    assert_eq!(blank.expected_characters, vec!["妈", "妈"]);
    assert_eq!(blank.expected_syllables, vec!["mā", "ma"]);
    assert!(!doc.has_mismatch());
}

#[test]
fn parsing_is_pure() {
    assert_eq!(parse(NEUTRAL_TONE_TASK), parse(NEUTRAL_TONE_TASK));
}

#[test]
fn empty_document_degrades_to_empty_values() {
    let doc = parse("");
    assert_eq!(doc.title, "");
    assert_eq!(doc.description, "");
    assert_eq!(doc.sentence_template, "");
    assert!(doc.blanks.is_empty());
    assert!(!doc.has_mismatch());
}

#[test]
fn blanks_section_without_spans_yields_no_blanks() {
    let doc = parse("## --sentence--\n`BLANK`\n## --blanks--\nnothing delimited here\n");
    assert!(doc.blanks.is_empty());
    assert!(doc.has_mismatch());
}

#[test]
fn malformed_entries_are_dropped_without_reserving_ids() {
    let src = "## --sentence--\n`BLANK BLANK BLANK`\n## --blanks--\n\
               `你好 (ni3 hao3)`\n`no pinyin here`\n`王 (wang2)`\n";
    let (doc, diagnostics) = ExerciseParser::new().parse_with_diagnostics(src);

    let ids: Vec<&str> = doc.blanks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["blank-0", "blank-1"]);
    assert_eq!(doc.blanks[1].hanzi, "王");
    assert_eq!(doc.blanks[1].expected_syllables, vec!["wáng"]);

    // both parsed blanks survive the mismatch
    assert!(doc.has_mismatch());
    assert!(diagnostics.iter().any(|d| matches!(
        d,
        ParseDiagnostic::DroppedBlank { entry, .. } if entry == "no pinyin here"
    )));
    assert!(diagnostics.contains(&ParseDiagnostic::PlaceholderMismatch {
        placeholders: 3,
        blanks: 2
    }));
}

#[test]
fn diagnostics_do_not_change_the_document() {
    let parser = ExerciseParser::new();
    let (with_diag, _) = parser.parse_with_diagnostics(NEUTRAL_TONE_TASK);
    assert_eq!(with_diag, parser.parse(NEUTRAL_TONE_TASK));
}

#[test]
fn missing_sections_are_reported() {
    let (_, diagnostics) = ExerciseParser::new().parse_with_diagnostics("## --blanks--\n`你 (ni3)`");
    assert!(diagnostics.contains(&ParseDiagnostic::MissingSection {
        marker: "# --description--".to_string()
    }));
}

#[test]
fn sentence_falls_back_to_raw_section_text() {
    let doc = parse("## --sentence--\nBLANK，王先生。\n## --blanks--\n`你好 (nǐ hǎo)`");
    assert_eq!(doc.sentence_template, "BLANK，王先生。");
    assert_eq!(doc.sentence_parts(), vec!["", "，王先生。"]);
    assert_eq!(doc.blanks[0].expected_syllables, vec!["nǐ", "hǎo"]);
}

#[test]
fn blanks_section_ends_at_feedback() {
    let src = "## --blanks--\n`你 (ni3)`\n### --feedback--\n`好 (hao3)`\n";
    let doc = parse(src);
    assert_eq!(doc.blanks.len(), 1);
    assert_eq!(doc.blanks[0].hanzi, "你");
}

#[test]
fn syllable_count_may_differ_from_characters() {
    let doc = parse("## --blanks--\n`你好吗 (ni3 hao3)`");
    let blank = &doc.blanks[0];
    assert_eq!(blank.expected_characters.len(), 3);
    assert_eq!(blank.expected_syllables.len(), 2);
    assert_eq!(blank.syllable(2), None);
}
