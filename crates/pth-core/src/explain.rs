use serde::Serialize;

use crate::derive::RawTriple;
use crate::error::DeriveError;
use crate::normalize::{normalize_traced, AppliedRewrite, Syllable};
use crate::options::Options;
use crate::position::Position;
use crate::render::render;
use crate::rules::{RuleSet, TableKind};
use crate::variant::{self, VariantOverride};

/// Full diagnostic result for a single position.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub position: String,
    pub options: Options,
    pub lookups: Vec<ExplainLookup>,
    pub raw: RawTriple,
    pub overrides: Vec<VariantOverride>,
    pub rewrites: Vec<AppliedRewrite>,
    pub syllable: Syllable,
    pub tone: Option<u8>,
    pub surface: String,
}

/// One table lookup: the conditions that matched at each nesting level and
/// the value they led to.
#[derive(Debug, Serialize)]
pub struct ExplainLookup {
    pub table: &'static str,
    pub path: Vec<String>,
    pub value: String,
}

pub fn explain(
    rules: &RuleSet,
    pos: &Position,
    options: &Options,
) -> Result<ExplainResult, DeriveError> {
    let kinds = [TableKind::Initial, rules.final_table(pos), TableKind::Tone];
    let mut lookups = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let (value, path) = rules.table(kind).evaluate_traced(pos, kind.name())?;
        lookups.push(ExplainLookup {
            table: kind.name(),
            path: path.into_iter().map(str::to_string).collect(),
            value: value.to_string(),
        });
    }

    let raw = RawTriple {
        initial: lookups[0].value.clone(),
        final_: lookups[1].value.clone(),
        tone: lookups[2].value.parse().ok(),
    };
    let mut resolved = raw.clone();
    let overrides = variant::resolve(pos, options, &mut resolved);
    let (syllable, rewrites) =
        normalize_traced(Syllable::new(resolved.initial, resolved.final_));
    let surface = render(&syllable, resolved.tone, options.tone_notation);

    Ok(ExplainResult {
        position: pos.to_string(),
        options: *options,
        lookups,
        raw,
        overrides,
        rewrites,
        syllable,
        tone: resolved.tone,
        surface,
    })
}

fn show_tone(tone: Option<u8>) -> String {
    tone.map_or_else(|| "-".to_string(), |t| t.to_string())
}

fn pad(label: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let display_width = UnicodeWidthStr::width(label);
    if display_width < width {
        format!("{}{}", label, " ".repeat(width - display_width))
    } else {
        label.to_string()
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} -> {} ===\n",
        result.position, result.surface
    ));

    out.push_str("\n  Tables:\n");
    for lookup in &result.lookups {
        let path: Vec<&str> = lookup
            .path
            .iter()
            .map(|p| if p.is_empty() { "(else)" } else { p.as_str() })
            .collect();
        let value = if lookup.value.is_empty() {
            "∅"
        } else {
            lookup.value.as_str()
        };
        out.push_str(&format!(
            "    {:<16} {} => {}\n",
            lookup.table,
            pad(&path.join(" / "), 28),
            value,
        ));
    }

    out.push_str(&format!(
        "\n  Raw: initial={:?} final={:?} tone={}\n",
        result.raw.initial,
        result.raw.final_,
        show_tone(result.raw.tone),
    ));

    if !result.overrides.is_empty() {
        out.push_str("\n  Overrides:\n");
        for o in &result.overrides {
            match o {
                VariantOverride::Initial { from, to } => {
                    out.push_str(&format!("    initial {from:?} -> {to:?}\n"));
                }
                VariantOverride::Tone { policy, from, to } => {
                    out.push_str(&format!(
                        "    tone {} -> {} ({})\n",
                        show_tone(*from),
                        show_tone(*to),
                        policy.label(),
                    ));
                }
            }
        }
    }

    if !result.rewrites.is_empty() {
        out.push_str("\n  Rewrites:\n");
        for rw in &result.rewrites {
            out.push_str(&format!("    {:<14} {}\n", rw.rewrite, rw.result));
        }
    }

    out.push_str(&format!(
        "\n  Result: {} tone={} -> {}\n",
        result.syllable,
        show_tone(result.tone),
        result.surface,
    ));

    out
}
