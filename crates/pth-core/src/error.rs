//! Error types shared across the engine.
//!
//! `TableError` covers everything that can go wrong while compiling rule
//! tables and is only raised at load time. `DeriveError` is what a query
//! can return; both of its variants indicate a defective table rather than
//! bad input.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("unknown category `{name}` in `{expr}`")]
    InvalidCategory { name: String, expr: String },

    #[error("malformed expression `{expr}`: {reason}")]
    MalformedExpression { expr: String, reason: String },

    #[error("invalid value `{value}` in table `{table}`")]
    InvalidLiteral { table: &'static str, value: String },

    #[error("rule tables already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    #[error("no matching rule in table `{table}` for {position}")]
    NoMatchingRule {
        table: &'static str,
        position: String,
    },

    #[error("rule tables unavailable: {0}")]
    InvalidTable(#[from] TableError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("{rhyme}韻 has no checked tone")]
    CheckedToneOnVocalicRhyme { rhyme: char },

    #[error("{rhyme}韻 only occurs in the departing tone")]
    DepartingOnly { rhyme: char },

    #[error("{rhyme}韻 does not occur in division {division}")]
    Division { rhyme: char, division: char },

    #[error("labial initial {initial}母 takes no openness")]
    LabialOpenness { initial: char },

    #[error("class {class} only applies to division 三")]
    ClassOutsideThird { class: char },

    #[error("{rhyme}韻 takes no class {class}")]
    Class { rhyme: char, class: char },

    #[error("{rhyme}韻 has no labial initial {initial}母")]
    LabialRhyme { rhyme: char, initial: char },

    #[error("invalid description `{input}`: {reason}")]
    Description { input: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("unknown value `{value}` for {field}")]
    UnknownValue { field: &'static str, value: String },
}
