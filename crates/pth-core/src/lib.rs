pub mod category;
pub mod derive;
pub mod error;
pub mod explain;
pub mod normalize;
pub mod options;
pub mod position;
pub mod render;
pub mod rules;
pub mod variant;

#[cfg(test)]
mod tests;

pub use derive::{derive, Derivation, RawTriple};
pub use error::{DeriveError, OptionsError, PositionError, TableError};
pub use options::{CheckedTonePolicy, ChangChuanInitial, Options, ToneNotation};
pub use position::Position;
pub use rules::RuleSet;
