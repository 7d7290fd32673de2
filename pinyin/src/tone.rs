// pinyin/src/tone.rs
//
// Tone handling for pinyin text.
//
// Two representations of a tone occur in exercise input:
// - a trailing digit typed by the user ("ma1", "ma5")
// - a diacritic on the nucleus vowel ("mā"), as used in expected answers
//
// `normalize_tones` rewrites the first form into the second. The remaining
// helpers classify syllables so the matchers can treat the neutral tone
// (which has no diacritic) specially.

use phf::phf_map;
use unicode_normalization::UnicodeNormalization;

/// The five Mandarin tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    /// Toneless syllable, written without any diacritic.
    Neutral,
}

impl Tone {
    /// Tone for a typed digit `1`-`5`, neutral being 5.
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            1 => Some(Tone::First),
            2 => Some(Tone::Second),
            3 => Some(Tone::Third),
            4 => Some(Tone::Fourth),
            5 => Some(Tone::Neutral),
            _ => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Tone::Neutral
    }

    /// Combining mark placed on the nucleus vowel, if the tone has one.
    fn combining_mark(self) -> Option<char> {
        match self {
            Tone::First => Some('\u{0304}'),
            Tone::Second => Some('\u{0301}'),
            Tone::Third => Some('\u{030C}'),
            Tone::Fourth => Some('\u{0300}'),
            Tone::Neutral => None,
        }
    }
}

/// Precomposed tone-marked letters and their unmarked base letter.
static TONE_MARKS: phf::Map<char, (char, Tone)> = phf_map! {
    'ā' => ('a', Tone::First), 'á' => ('a', Tone::Second), 'ǎ' => ('a', Tone::Third), 'à' => ('a', Tone::Fourth),
    'ē' => ('e', Tone::First), 'é' => ('e', Tone::Second), 'ě' => ('e', Tone::Third), 'è' => ('e', Tone::Fourth),
    'ī' => ('i', Tone::First), 'í' => ('i', Tone::Second), 'ǐ' => ('i', Tone::Third), 'ì' => ('i', Tone::Fourth),
    'ō' => ('o', Tone::First), 'ó' => ('o', Tone::Second), 'ǒ' => ('o', Tone::Third), 'ò' => ('o', Tone::Fourth),
    'ū' => ('u', Tone::First), 'ú' => ('u', Tone::Second), 'ǔ' => ('u', Tone::Third), 'ù' => ('u', Tone::Fourth),
    'ǖ' => ('ü', Tone::First), 'ǘ' => ('ü', Tone::Second), 'ǚ' => ('ü', Tone::Third), 'ǜ' => ('ü', Tone::Fourth),
    'Ā' => ('A', Tone::First), 'Á' => ('A', Tone::Second), 'Ǎ' => ('A', Tone::Third), 'À' => ('A', Tone::Fourth),
    'Ē' => ('E', Tone::First), 'É' => ('E', Tone::Second), 'Ě' => ('E', Tone::Third), 'È' => ('E', Tone::Fourth),
    'Ī' => ('I', Tone::First), 'Í' => ('I', Tone::Second), 'Ǐ' => ('I', Tone::Third), 'Ì' => ('I', Tone::Fourth),
    'Ō' => ('O', Tone::First), 'Ó' => ('O', Tone::Second), 'Ǒ' => ('O', Tone::Third), 'Ò' => ('O', Tone::Fourth),
    'Ū' => ('U', Tone::First), 'Ú' => ('U', Tone::Second), 'Ǔ' => ('U', Tone::Third), 'Ù' => ('U', Tone::Fourth),
    'Ǖ' => ('Ü', Tone::First), 'Ǘ' => ('Ü', Tone::Second), 'Ǚ' => ('Ü', Tone::Third), 'Ǜ' => ('Ü', Tone::Fourth),
    'ń' => ('n', Tone::Second), 'ň' => ('n', Tone::Third), 'ǹ' => ('n', Tone::Fourth),
};

fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'ü' | 'v'
    )
}

/// Characters that may appear inside a syllable run.
fn is_syllable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == 'ü' || c == 'Ü' || TONE_MARKS.contains_key(&c)
}

/// True when `text` contains at least one tone diacritic.
///
/// Decomposed input (base letter + combining mark) is recognised as well.
pub fn has_tone_marks(text: &str) -> bool {
    text.nfc().any(|c| TONE_MARKS.contains_key(&c))
}

/// True when `token` ends with an explicit tone digit `1`-`5`.
pub fn ends_with_tone_digit(token: &str) -> bool {
    matches!(token.chars().last(), Some('1'..='5'))
}

/// Join syllables with `separator` (`" "` for the spaced form, `""` for the
/// concatenated form).
pub fn join_syllables<S: AsRef<str>>(syllables: &[S], separator: &str) -> String {
    syllables
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Tone of a tone-marked syllable. Syllables without a diacritic are neutral.
pub fn syllable_tone(syllable: &str) -> Tone {
    syllable
        .nfc()
        .find_map(|c| TONE_MARKS.get(&c).map(|&(_, tone)| tone))
        .unwrap_or(Tone::Neutral)
}

/// Remove tone diacritics, keeping `ü`.
pub fn strip_tones(text: &str) -> String {
    text.nfc()
        .map(|c| TONE_MARKS.get(&c).map(|&(base, _)| base).unwrap_or(c))
        .collect()
}

/// Rewrite numbered pinyin into tone-marked pinyin.
///
/// - `ni3 hao3` becomes `nǐ hǎo`
/// - a trailing `5` is dropped without adding a mark: `ma5` becomes `ma`;
///   any other digit is kept: `ma0` stays `ma0`
/// - syllables without a digit, hanzi, punctuation and whitespace are left as is
/// - `v` and `u:` are written `ü` once a tone digit is given: `lv4` becomes `lǜ`
///
/// Letter case is preserved.
pub fn normalize_tones(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_syllable_char(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() {
            let c = chars[i];
            let umlaut_colon = c == ':' && i > start && matches!(chars[i - 1], 'u' | 'U');
            if is_syllable_char(c) || umlaut_colon {
                i += 1;
            } else {
                break;
            }
        }
        let run: String = chars[start..i].iter().collect();

        let tone = chars
            .get(i)
            .and_then(|c| c.to_digit(10))
            .and_then(Tone::from_digit);
        match tone {
            Some(tone) if !has_tone_marks(&run) && run.chars().any(is_vowel) => {
                out.push_str(&apply_tone(&run, tone));
                // consume the digit
                i += 1;
            }
            _ => out.push_str(&run),
        }
    }

    out
}

/// Replace `v` / `u:` spellings with `ü`.
fn with_umlaut(syllable: &str) -> String {
    syllable
        .replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

/// Place the mark for `tone` on the nucleus vowel of a single syllable.
fn apply_tone(syllable: &str, tone: Tone) -> String {
    let syllable = with_umlaut(syllable);
    let Some(mark) = tone.combining_mark() else {
        return syllable;
    };

    let chars: Vec<char> = syllable.chars().collect();
    let Some(nucleus) = nucleus_index(&chars) else {
        return syllable;
    };

    let mut marked = String::with_capacity(syllable.len() + 2);
    for (idx, &c) in chars.iter().enumerate() {
        marked.push(c);
        if idx == nucleus {
            marked.push(mark);
        }
    }
    marked.nfc().collect()
}

/// Index of the vowel that carries the tone mark.
///
/// `a` or `e` always take the mark; in `ou` the `o` does; otherwise the last
/// vowel of the syllable.
fn nucleus_index(chars: &[char]) -> Option<usize> {
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    if let Some(idx) = lower.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(idx);
    }
    if let Some(idx) = lower.windows(2).position(|w| w[0] == 'o' && w[1] == 'u') {
        return Some(idx);
    }
    lower.iter().rposition(|&c| is_vowel(c))
}
