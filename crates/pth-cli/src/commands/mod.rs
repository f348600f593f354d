pub mod check_ops;
pub mod config_ops;
pub mod derive_ops;

use std::fs;

use clap::Args;

use pth_core::options::parse_options_toml;
use pth_core::{
    ChangChuanInitial, CheckedTonePolicy, DeriveError, Options, OptionsError, PositionError,
    RuleSet, TableError, ToneNotation,
};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}
pub(crate) use die;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Position(#[from] PositionError),
    #[error("{0}")]
    Options(#[from] OptionsError),
    #[error("{0}")]
    Table(#[from] TableError),
    #[error("{0}")]
    Derive(#[from] DeriveError),
    #[error("corpus parse error: {0}")]
    Corpus(String),
}

/// Rule table and option flags shared by every derivation command.
#[derive(Debug, Default, Args)]
pub struct EngineArgs {
    /// Path to a rule table TOML replacing the built-in tables
    #[arg(long)]
    pub rules: Option<String>,
    /// Path to an options TOML file; the flags below override it
    #[arg(long)]
    pub options_file: Option<String>,
    /// Tone notation (numeric, diacritic)
    #[arg(long)]
    pub notation: Option<ToneNotation>,
    /// Enable the extended options below
    #[arg(long)]
    pub extended: bool,
    /// Checked-tone policy for voiceless initials (needs --extended)
    #[arg(long)]
    pub policy: Option<CheckedTonePolicy>,
    /// Initial of level-tone 常/船 syllables, ch or sh (needs --extended)
    #[arg(long)]
    pub chang_chuan: Option<ChangChuanInitial>,
}

impl EngineArgs {
    pub fn options(&self) -> Result<Options, CliError> {
        let mut opts = match &self.options_file {
            Some(path) => parse_options_toml(&fs::read_to_string(path)?)?,
            None => Options::default(),
        };
        if let Some(notation) = self.notation {
            opts.tone_notation = notation;
        }
        if self.extended {
            opts.extended = true;
        }
        if let Some(policy) = self.policy {
            opts.checked_tone_policy = policy;
        }
        if let Some(initial) = self.chang_chuan {
            opts.chang_chuan_initial = initial;
        }
        Ok(opts)
    }

    /// Install the custom tables (if any) and return the global rule set.
    pub fn rules(&self) -> Result<&'static RuleSet, CliError> {
        if let Some(path) = &self.rules {
            RuleSet::init_custom(&fs::read_to_string(path)?)?;
        }
        Ok(RuleSet::global()?)
    }

    pub fn load(&self) -> Result<(&'static RuleSet, Options), CliError> {
        Ok((self.rules()?, self.options()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = EngineArgs {
            notation: Some(ToneNotation::Diacritic),
            extended: true,
            policy: Some(CheckedTonePolicy::AllDeparting),
            ..EngineArgs::default()
        };
        let opts = args.options().unwrap();
        assert_eq!(opts.tone_notation, ToneNotation::Diacritic);
        assert!(opts.extended);
        assert_eq!(opts.checked_tone_policy, CheckedTonePolicy::AllDeparting);
        assert_eq!(opts.chang_chuan_initial, ChangChuanInitial::Ch);
    }

    #[test]
    fn missing_options_file() {
        let args = EngineArgs {
            options_file: Some("/nonexistent/options.toml".into()),
            ..EngineArgs::default()
        };
        assert!(matches!(args.options(), Err(CliError::Io(_))));
    }
}
