//! UniFFI export layer consumed by UI collaborators.
//!
//! Each public type here maps to a generated class, struct, or enum.

mod engine;
mod types;

pub use engine::PthEngine;
pub use types::{
    PthChangChuanInitial, PthCheckedTonePolicy, PthDerivation, PthError, PthExplain,
    PthOptionChoice, PthOptionSpec, PthOptions, PthToneNotation,
};

use std::path::Path;

use pth_core::options::{options_schema, parse_options_toml};
use pth_core::{Options, Position, RuleSet};
use tracing::debug;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Derive with the global rule tables.
#[uniffi::export]
fn derive(position: String, options: PthOptions) -> Result<String, PthError> {
    let pos = Position::from_description(&position)?;
    let surface = pth_core::derive(&pos, &options.into())?;
    debug!(%pos, %surface, "derive");
    Ok(surface)
}

#[uniffi::export]
fn options_default() -> PthOptions {
    Options::default().into()
}

#[uniffi::export]
fn options_schema_list() -> Vec<PthOptionSpec> {
    options_schema().into_iter().map(Into::into).collect()
}

#[uniffi::export]
fn options_parse(toml: String) -> Result<PthOptions, PthError> {
    Ok(parse_options_toml(&toml)?.into())
}

#[uniffi::export]
fn options_default_config() -> String {
    pth_core::options::default_toml().to_string()
}

/// Install custom rule tables for the global engine. Only possible before
/// the first derivation.
#[uniffi::export]
fn rules_load_config(path: String) -> Result<(), PthError> {
    let content = std::fs::read_to_string(&path).map_err(|e| PthError::Io {
        msg: format!("{path}: {e}"),
    })?;
    RuleSet::init_custom(&content)?;
    debug!(%path, "custom rule tables installed");
    Ok(())
}

#[uniffi::export]
fn rules_default_config() -> String {
    pth_core::rules::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
