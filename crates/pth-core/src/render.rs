//! Tone rendering: a trailing digit or a combining mark on the nucleus.

use crate::normalize::Syllable;
use crate::options::ToneNotation;

/// Combining marks for tones 1 to 4.
const TONE_MARKS: [char; 4] = ['\u{304}', '\u{301}', '\u{30C}', '\u{300}'];

/// Precomposed marked vowels, as `(marked, base, tone)`.
#[rustfmt::skip]
const PRECOMPOSED: &[(char, char, u8)] = &[
    ('ā', 'a', 1), ('á', 'a', 2), ('ǎ', 'a', 3), ('à', 'a', 4),
    ('ē', 'e', 1), ('é', 'e', 2), ('ě', 'e', 3), ('è', 'e', 4),
    ('ī', 'i', 1), ('í', 'i', 2), ('ǐ', 'i', 3), ('ì', 'i', 4),
    ('ō', 'o', 1), ('ó', 'o', 2), ('ǒ', 'o', 3), ('ò', 'o', 4),
    ('ū', 'u', 1), ('ú', 'u', 2), ('ǔ', 'u', 3), ('ù', 'u', 4),
    ('ǖ', 'ü', 1), ('ǘ', 'ü', 2), ('ǚ', 'ü', 3), ('ǜ', 'ü', 4),
];

/// Vowel classes in placement priority order.
const NUCLEUS_CLASSES: [&[char]; 3] = [&['a'], &['e', 'o'], &['i', 'u', 'ü']];

fn tone_mark(tone: u8) -> Option<char> {
    TONE_MARKS.get(usize::from(tone).checked_sub(1)?).copied()
}

/// Byte offset just past the vowel that carries the tone mark: the last
/// vowel of the highest-priority class present in `final_`.
fn mark_offset(final_: &str) -> Option<usize> {
    NUCLEUS_CLASSES.iter().find_map(|class| {
        final_
            .char_indices()
            .rev()
            .find(|(_, c)| class.contains(c))
            .map(|(i, c)| i + c.len_utf8())
    })
}

pub fn render(syl: &Syllable, tone: Option<u8>, notation: ToneNotation) -> String {
    let mut out = String::with_capacity(syl.initial.len() + syl.final_.len() + 2);
    out.push_str(&syl.initial);
    match notation {
        ToneNotation::Numeric => {
            out.push_str(&syl.final_);
            if let Some(t) = tone {
                out.push_str(&t.to_string());
            }
        }
        ToneNotation::Diacritic => {
            let marked = tone
                .and_then(tone_mark)
                .zip(mark_offset(&syl.final_));
            match marked {
                Some((mark, at)) => {
                    out.push_str(&syl.final_[..at]);
                    out.push(mark);
                    out.push_str(&syl.final_[at..]);
                }
                None => out.push_str(&syl.final_),
            }
        }
    }
    out
}

/// Read the tone back out of a rendered syllable in either notation.
/// Precomposed marked vowels are accepted as well as combining marks.
pub fn split_tone(rendered: &str) -> (String, Option<u8>) {
    if let Some(last) = rendered.chars().last() {
        if let Some(t) = last.to_digit(10).filter(|t| (1..=4).contains(t)) {
            let base = &rendered[..rendered.len() - last.len_utf8()];
            return (base.to_string(), Some(t as u8));
        }
    }

    let mut base = String::with_capacity(rendered.len());
    let mut tone = None;
    for c in rendered.chars() {
        if let Some(i) = TONE_MARKS.iter().position(|&m| m == c) {
            tone = Some(i as u8 + 1);
        } else if let Some(&(_, plain, t)) = PRECOMPOSED.iter().find(|(m, _, _)| *m == c) {
            base.push(plain);
            tone = Some(t);
        } else {
            base.push(c);
        }
    }
    (base, tone)
}
