//! Spelling normalization of a raw (initial, final) pair into Hanyu Pinyin.
//!
//! The rewrites run in a fixed order and each one sees the output of the
//! previous one. Tone is not involved.

use std::fmt;

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Syllable {
    pub initial: String,
    #[serde(rename = "final")]
    pub final_: String,
}

impl Syllable {
    pub fn new(initial: impl Into<String>, final_: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            final_: final_.into(),
        }
    }

    fn first(&self) -> Option<char> {
        self.final_.chars().next()
    }

    fn second(&self) -> Option<char> {
        self.final_.chars().nth(1)
    }

    fn initial_in(&self, set: &[&str]) -> bool {
        set.contains(&self.initial.as_str())
    }

    /// Drop the first letter of the final.
    fn drop_first(&mut self) {
        if let Some(c) = self.first() {
            self.final_.replace_range(..c.len_utf8(), "");
        }
    }

    /// Replace the first letter of the final.
    fn replace_first(&mut self, with: char) {
        if let Some(c) = self.first() {
            self.final_.replace_range(..c.len_utf8(), with.encode_utf8(&mut [0; 4]));
        }
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.initial, self.final_)
    }
}

/// A single spelling rewrite.
pub(crate) trait Rewrite {
    fn name(&self) -> &'static str;
    fn rewrite(&self, syl: &mut Syllable);
}

/// g k h and z c s become j q x before i and ü.
struct Palatalize;

impl Rewrite for Palatalize {
    fn name(&self) -> &'static str {
        "palatalize"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        if !matches!(syl.first(), Some('i' | 'ü')) {
            return;
        }
        let to = match syl.initial.as_str() {
            "g" | "z" => "j",
            "k" | "c" => "q",
            "h" | "s" => "x",
            _ => return,
        };
        syl.initial = to.to_string();
    }
}

/// `er` keeps only the r-less form after 日母 and is an apical i elsewhere.
/// A bare `er` (no initial) is already final.
struct ErFinal;

impl Rewrite for ErFinal {
    fn name(&self) -> &'static str {
        "er-final"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        // A null-initial er is left alone so that normalizing twice gives
        // the same syllable as normalizing once.
        if syl.final_ != "er" || syl.initial.is_empty() {
            return;
        }
        if syl.initial == "r" {
            syl.initial.clear();
        } else {
            syl.final_ = "i".to_string();
        }
    }
}

/// n and l lose the medial u of ua uai uang uei.
struct DentalGlide;

impl Rewrite for DentalGlide {
    fn name(&self) -> &'static str {
        "dental-glide"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        let glided = matches!(syl.final_.as_str(), "ua" | "uai" | "uang" | "uei");
        if glided && syl.initial_in(&["n", "l"]) {
            syl.drop_first();
        }
    }
}

/// ü is written u except in nü lü nüe lüe; a bare ü takes y.
struct Umlaut;

impl Rewrite for Umlaut {
    fn name(&self) -> &'static str {
        "umlaut"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        if syl.first() != Some('ü') {
            return;
        }
        if syl.initial_in(&["n", "l"]) && matches!(syl.final_.as_str(), "ü" | "üe") {
            return;
        }
        if syl.initial.is_empty() {
            syl.initial = "y".to_string();
        }
        syl.replace_first('u');
    }
}

/// After zh ch sh r: in → en, ing → eng, other i-medials drop, ue → uo.
struct Retroflex;

impl Rewrite for Retroflex {
    fn name(&self) -> &'static str {
        "retroflex"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        if !syl.initial_in(&["zh", "ch", "sh", "r"]) {
            return;
        }
        if syl.first() == Some('i') {
            match syl.second() {
                Some('n') => syl.replace_first('e'),
                Some(_) => syl.drop_first(),
                None => {}
            }
        }
        if syl.final_ == "ue" {
            syl.final_ = "uo".to_string();
        }
    }
}

/// Labials lose a medial u; f and w also lose i (a bare i becomes ei).
struct LabialGlide;

impl Rewrite for LabialGlide {
    fn name(&self) -> &'static str {
        "labial-glide"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        if syl.initial_in(&["b", "p", "m", "f", "w"])
            && syl.first() == Some('u')
            && syl.second().is_some()
        {
            syl.drop_first();
        }
        if syl.initial_in(&["f", "w"]) && syl.first() == Some('i') {
            syl.drop_first();
            if syl.final_.is_empty() {
                syl.final_ = "ei".to_string();
            }
        }
    }
}

/// Zero-initial i and u are written with y and w.
struct NullInitial;

impl Rewrite for NullInitial {
    fn name(&self) -> &'static str {
        "null-initial"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        if !syl.initial.is_empty() {
            return;
        }
        let glide = match syl.first() {
            Some('i') => "y",
            Some('u') => "w",
            _ => return,
        };
        syl.initial = glide.to_string();
        if syl.second().is_some_and(|c| c != 'n') {
            syl.drop_first();
        }
    }
}

/// iou uei uen ueng are written iu ui un ong.
struct Contract;

impl Rewrite for Contract {
    fn name(&self) -> &'static str {
        "contract"
    }

    fn rewrite(&self, syl: &mut Syllable) {
        let short = match syl.final_.as_str() {
            "iou" => "iu",
            "uei" => "ui",
            "uen" => "un",
            "ueng" => "ong",
            _ => return,
        };
        syl.final_ = short.to_string();
    }
}

const REWRITES: &[&dyn Rewrite] = &[
    &Palatalize,
    &ErFinal,
    &DentalGlide,
    &Umlaut,
    &Retroflex,
    &LabialGlide,
    &NullInitial,
    &Contract,
];

/// A rewrite that changed the syllable, and what it changed it into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRewrite {
    pub rewrite: &'static str,
    pub result: Syllable,
}

/// Run all rewrites in sequence, reporting each one that changed the
/// syllable.
fn run_rewrites(
    rewrites: &[&dyn Rewrite],
    mut syl: Syllable,
    mut on_change: impl FnMut(&'static str, &Syllable),
) -> Syllable {
    for rw in rewrites {
        let before = syl.clone();
        rw.rewrite(&mut syl);
        if syl != before {
            debug!(rewrite = rw.name(), from = %before, to = %syl);
            on_change(rw.name(), &syl);
        }
    }
    syl
}

pub fn normalize(syl: Syllable) -> Syllable {
    run_rewrites(REWRITES, syl, |_, _| {})
}

/// `normalize`, also returning the rewrites that fired.
pub fn normalize_traced(syl: Syllable) -> (Syllable, Vec<AppliedRewrite>) {
    let mut applied = Vec::new();
    let out = run_rewrites(REWRITES, syl, |rewrite, result| {
        applied.push(AppliedRewrite {
            rewrite,
            result: result.clone(),
        })
    });
    (out, applied)
}
