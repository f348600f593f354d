uniffi::setup_scaffolding!();

pub mod api;
mod trace_init;

pub use pth_core;
pub use pth_core::{derive, Derivation, DeriveError, Options, Position, RuleSet};
