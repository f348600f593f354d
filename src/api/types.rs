use pth_core::explain::ExplainResult;
use pth_core::options::{OptionChoice, OptionSpec};
use pth_core::{
    ChangChuanInitial, CheckedTonePolicy, Derivation, DeriveError, Options, OptionsError,
    PositionError, TableError, ToneNotation,
};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PthError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid position: {msg}")]
    InvalidPosition { msg: String },
    #[error("invalid options: {msg}")]
    InvalidOptions { msg: String },
    #[error("invalid rule table: {msg}")]
    InvalidTable { msg: String },
    #[error("no matching rule: {msg}")]
    NoMatchingRule { msg: String },
    #[error("internal error: {msg}")]
    Internal { msg: String },
}

impl From<PositionError> for PthError {
    fn from(e: PositionError) -> Self {
        Self::InvalidPosition { msg: e.to_string() }
    }
}

impl From<OptionsError> for PthError {
    fn from(e: OptionsError) -> Self {
        Self::InvalidOptions { msg: e.to_string() }
    }
}

impl From<TableError> for PthError {
    fn from(e: TableError) -> Self {
        Self::InvalidTable { msg: e.to_string() }
    }
}

impl From<DeriveError> for PthError {
    fn from(e: DeriveError) -> Self {
        match e {
            DeriveError::InvalidTable(inner) => inner.into(),
            e @ DeriveError::NoMatchingRule { .. } => Self::NoMatchingRule { msg: e.to_string() },
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PthToneNotation {
    Numeric,
    Diacritic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PthCheckedTonePolicy {
    AllRising,
    AllLevel,
    AspirateFricativeNullDeparting,
    AspirateNullDeparting,
    Unmarked,
    AllDeparting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PthChangChuanInitial {
    Ch,
    Sh,
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct PthOptions {
    pub tone_notation: PthToneNotation,
    pub extended: bool,
    pub checked_tone_policy: PthCheckedTonePolicy,
    pub chang_chuan_initial: PthChangChuanInitial,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct PthDerivation {
    pub position: String,
    pub raw_initial: String,
    pub raw_final: String,
    pub raw_tone: Option<u8>,
    pub initial: String,
    pub final_: String,
    pub tone: Option<u8>,
    pub surface: String,
    /// Number of option-driven overrides applied to the raw triple.
    pub override_count: u32,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct PthOptionChoice {
    pub value: String,
    pub label: String,
}

/// One field of the options form.
#[derive(Clone, Debug, uniffi::Record)]
pub struct PthOptionSpec {
    pub key: String,
    pub label: String,
    pub choices: Vec<PthOptionChoice>,
    pub default_value: String,
    pub extended_only: bool,
}

/// Text and JSON renderings of an explain result.
#[derive(Clone, Debug, uniffi::Record)]
pub struct PthExplain {
    pub surface: String,
    pub text: String,
    pub json: String,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

impl From<PthOptions> for Options {
    fn from(o: PthOptions) -> Self {
        Options {
            tone_notation: match o.tone_notation {
                PthToneNotation::Numeric => ToneNotation::Numeric,
                PthToneNotation::Diacritic => ToneNotation::Diacritic,
            },
            extended: o.extended,
            checked_tone_policy: match o.checked_tone_policy {
                PthCheckedTonePolicy::AllRising => CheckedTonePolicy::AllRising,
                PthCheckedTonePolicy::AllLevel => CheckedTonePolicy::AllLevel,
                PthCheckedTonePolicy::AspirateFricativeNullDeparting => {
                    CheckedTonePolicy::AspirateFricativeNullDeparting
                }
                PthCheckedTonePolicy::AspirateNullDeparting => {
                    CheckedTonePolicy::AspirateNullDeparting
                }
                PthCheckedTonePolicy::Unmarked => CheckedTonePolicy::Unmarked,
                PthCheckedTonePolicy::AllDeparting => CheckedTonePolicy::AllDeparting,
            },
            chang_chuan_initial: match o.chang_chuan_initial {
                PthChangChuanInitial::Ch => ChangChuanInitial::Ch,
                PthChangChuanInitial::Sh => ChangChuanInitial::Sh,
            },
        }
    }
}

impl From<Options> for PthOptions {
    fn from(o: Options) -> Self {
        PthOptions {
            tone_notation: match o.tone_notation {
                ToneNotation::Numeric => PthToneNotation::Numeric,
                ToneNotation::Diacritic => PthToneNotation::Diacritic,
            },
            extended: o.extended,
            checked_tone_policy: match o.checked_tone_policy {
                CheckedTonePolicy::AllRising => PthCheckedTonePolicy::AllRising,
                CheckedTonePolicy::AllLevel => PthCheckedTonePolicy::AllLevel,
                CheckedTonePolicy::AspirateFricativeNullDeparting => {
                    PthCheckedTonePolicy::AspirateFricativeNullDeparting
                }
                CheckedTonePolicy::AspirateNullDeparting => {
                    PthCheckedTonePolicy::AspirateNullDeparting
                }
                CheckedTonePolicy::Unmarked => PthCheckedTonePolicy::Unmarked,
                CheckedTonePolicy::AllDeparting => PthCheckedTonePolicy::AllDeparting,
            },
            chang_chuan_initial: match o.chang_chuan_initial {
                ChangChuanInitial::Ch => PthChangChuanInitial::Ch,
                ChangChuanInitial::Sh => PthChangChuanInitial::Sh,
            },
        }
    }
}

impl From<Derivation> for PthDerivation {
    fn from(d: Derivation) -> Self {
        PthDerivation {
            position: d.position,
            raw_initial: d.raw.initial,
            raw_final: d.raw.final_,
            raw_tone: d.raw.tone,
            initial: d.syllable.initial,
            final_: d.syllable.final_,
            tone: d.tone,
            surface: d.surface,
            override_count: d.overrides.len() as u32,
        }
    }
}

impl From<OptionSpec> for PthOptionSpec {
    fn from(s: OptionSpec) -> Self {
        PthOptionSpec {
            key: s.key.to_string(),
            label: s.label.to_string(),
            choices: s
                .choices
                .into_iter()
                .map(|OptionChoice { value, label }| PthOptionChoice {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            default_value: s.default,
            extended_only: s.extended_only,
        }
    }
}

pub(super) fn explain_record(result: &ExplainResult) -> Result<PthExplain, PthError> {
    let json = serde_json::to_string(result).map_err(|e| PthError::Internal { msg: e.to_string() })?;
    Ok(PthExplain {
        surface: result.surface.clone(),
        text: pth_core::explain::format_text(result),
        json,
    })
}
