use serde::Serialize;
use tracing::{debug, debug_span};

use crate::error::DeriveError;
use crate::normalize::{normalize, Syllable};
use crate::options::Options;
use crate::position::Position;
use crate::render::render;
use crate::rules::{RuleSet, TableKind};
use crate::variant::{self, VariantOverride};

/// Table output before any option or spelling rule is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RawTriple {
    pub initial: String,
    #[serde(rename = "final")]
    pub final_: String,
    /// `None` for a toneless (unassigned checked) syllable.
    pub tone: Option<u8>,
}

/// Every stage of one derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub position: String,
    pub raw: RawTriple,
    pub overrides: Vec<VariantOverride>,
    pub syllable: Syllable,
    pub tone: Option<u8>,
    pub surface: String,
}

fn parse_tone(value: &str) -> Option<u8> {
    value.parse().ok()
}

impl RuleSet {
    /// Look the position up in the initial, final and tone tables.
    pub fn raw(&self, pos: &Position) -> Result<RawTriple, DeriveError> {
        let lookup = |kind: TableKind| self.table(kind).evaluate(pos, kind.name());
        Ok(RawTriple {
            initial: lookup(TableKind::Initial)?.to_string(),
            final_: lookup(self.final_table(pos))?.to_string(),
            tone: parse_tone(lookup(TableKind::Tone)?),
        })
    }

    pub fn derive(&self, pos: &Position, options: &Options) -> Result<String, DeriveError> {
        Ok(self.derive_full(pos, options)?.surface)
    }

    pub fn derive_full(&self, pos: &Position, options: &Options) -> Result<Derivation, DeriveError> {
        let _span = debug_span!("derive", position = %pos).entered();

        let raw = self.raw(pos)?;
        let mut resolved = raw.clone();
        let overrides = variant::resolve(pos, options, &mut resolved);
        let syllable = normalize(Syllable::new(resolved.initial, resolved.final_));
        let surface = render(&syllable, resolved.tone, options.tone_notation);

        debug!(raw_initial = %raw.initial, raw_final = %raw.final_, overrides = overrides.len(), %surface);

        Ok(Derivation {
            position: pos.to_string(),
            raw,
            overrides,
            syllable,
            tone: resolved.tone,
            surface,
        })
    }

    /// Evaluate every legal position against the tables, returning how many
    /// were checked. Fails on the first position some table does not cover.
    pub fn verify_total(&self) -> Result<usize, DeriveError> {
        let _span = debug_span!("verify_total").entered();
        let mut checked = 0;
        for pos in Position::all() {
            self.raw(&pos)?;
            checked += 1;
        }
        debug!(checked);
        Ok(checked)
    }
}

/// Derive the pronunciation of `pos` with the global rule tables.
pub fn derive(pos: &Position, options: &Options) -> Result<String, DeriveError> {
    RuleSet::global()?.derive(pos, options)
}
