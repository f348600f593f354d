mod scenarios;

use crate::options::Options;
use crate::position::Position;
use crate::rules::RuleSet;

pub(super) fn rules() -> &'static RuleSet {
    RuleSet::global().unwrap()
}

pub(super) fn pos(desc: &str) -> Position {
    Position::from_description(desc).unwrap()
}

pub(super) fn derive_with(desc: &str, options: &Options) -> String {
    rules().derive(&pos(desc), options).unwrap()
}

pub(super) fn derive_default(desc: &str) -> String {
    derive_with(desc, &Options::default())
}
