//! Derivation rule tables, loaded from TOML.
//!
//! - `RuleSet::from_toml` compiles every expression up front, so a table
//!   that loads can only fail at query time on a coverage gap
//! - `RuleSet::init_custom` installs a custom table before first use
//! - `RuleSet::global()` returns the process-wide tables (lazy-init)

mod cascade;

use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

pub use cascade::{Cascade, Condition, Rule};

use crate::category::Predicate;
use crate::error::TableError;
use crate::position::{Position, Tone};

pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");

static INSTANCE: OnceLock<Result<RuleSet, TableError>> = OnceLock::new();

/// Returns the embedded default rule tables.
pub fn default_toml() -> &'static str {
    DEFAULT_RULES_TOML
}

const INITIALS: &[&str] = &[
    "", "b", "p", "m", "f", "d", "t", "n", "l", "z", "c", "s", "zh", "ch", "sh", "r", "j", "q",
    "x", "g", "k", "h", "w", "y",
];

const FINAL_LETTERS: &str = "aeiouüngr";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Initial,
    FinalUnchecked,
    FinalChecked,
    Tone,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Initial,
        TableKind::FinalUnchecked,
        TableKind::FinalChecked,
        TableKind::Tone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Initial => "initial",
            TableKind::FinalUnchecked => "final_unchecked",
            TableKind::FinalChecked => "final_checked",
            TableKind::Tone => "tone",
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            TableKind::Initial => INITIALS.contains(&value),
            TableKind::FinalUnchecked | TableKind::FinalChecked => {
                !value.is_empty() && value.chars().all(|c| FINAL_LETTERS.contains(c))
            }
            TableKind::Tone => matches!(value, "" | "1" | "2" | "3" | "4"),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// On-disk shape of a rule: a spelling or a nested list of entries.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSource {
    Literal(String),
    Cascade(Vec<(String, RuleSource)>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    initial: Vec<(String, RuleSource)>,
    final_unchecked: Vec<(String, RuleSource)>,
    final_checked: Vec<(String, RuleSource)>,
    tone: Vec<(String, RuleSource)>,
}

/// The four derivation tables. `RuleSet::default()` is empty and fails
/// every query.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    initial: Cascade,
    final_unchecked: Cascade,
    final_checked: Cascade,
    tone: Cascade,
}

impl RuleSet {
    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        let file: RuleFile =
            toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
        Ok(Self {
            initial: compile(file.initial, TableKind::Initial)?,
            final_unchecked: compile(file.final_unchecked, TableKind::FinalUnchecked)?,
            final_checked: compile(file.final_checked, TableKind::FinalChecked)?,
            tone: compile(file.tone, TableKind::Tone)?,
        })
    }

    /// Install custom tables before first `global()` call.
    pub fn init_custom(toml_content: &str) -> Result<(), TableError> {
        // Validate eagerly
        let rules = Self::from_toml(toml_content)?;
        INSTANCE
            .set(Ok(rules))
            .map_err(|_| TableError::AlreadyInitialized)
    }

    /// Get or initialize the global tables. A table that failed to compile
    /// keeps failing; nothing is served from it.
    pub fn global() -> Result<&'static RuleSet, TableError> {
        INSTANCE
            .get_or_init(|| {
                let rules = Self::from_toml(DEFAULT_RULES_TOML);
                if let Err(e) = &rules {
                    warn!("default rule tables rejected: {e}");
                }
                rules
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn table(&self, kind: TableKind) -> &Cascade {
        match kind {
            TableKind::Initial => &self.initial,
            TableKind::FinalUnchecked => &self.final_unchecked,
            TableKind::FinalChecked => &self.final_checked,
            TableKind::Tone => &self.tone,
        }
    }

    /// The final table consulted for `pos`: checked syllables have their
    /// own.
    pub fn final_table(&self, pos: &Position) -> TableKind {
        if pos.tone() == Tone::Checked {
            TableKind::FinalChecked
        } else {
            TableKind::FinalUnchecked
        }
    }
}

fn compile(entries: Vec<(String, RuleSource)>, kind: TableKind) -> Result<Cascade, TableError> {
    let mut compiled = Vec::with_capacity(entries.len());
    for (expr, source) in entries {
        let predicate = Predicate::parse(&expr)?;
        let rule = match source {
            RuleSource::Literal(value) => {
                if !kind.accepts(&value) {
                    return Err(TableError::InvalidLiteral {
                        table: kind.name(),
                        value,
                    });
                }
                Rule::Literal(value)
            }
            RuleSource::Cascade(inner) => Rule::Cascade(compile(inner, kind)?),
        };
        compiled.push((Condition::new(expr, predicate), rule));
    }
    Ok(Cascade::new(compiled))
}
