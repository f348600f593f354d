use std::sync::Arc;

use pth_core::explain::explain;
use pth_core::{Position, RuleSet};
use tracing::debug;

use super::types::explain_record;
use super::{PthDerivation, PthError, PthExplain, PthOptions};

/// A compiled rule set. Stateless between calls and safe to share.
#[derive(uniffi::Object)]
pub struct PthEngine {
    rules: RuleSet,
}

impl PthEngine {
    fn position(description: &str) -> Result<Position, PthError> {
        Ok(Position::from_description(description)?)
    }
}

#[uniffi::export]
impl PthEngine {
    /// Engine over the global rule tables (built-in or installed with
    /// `rules_load_config`).
    #[uniffi::constructor]
    fn new() -> Result<Arc<Self>, PthError> {
        Ok(Arc::new(Self {
            rules: RuleSet::global()?.clone(),
        }))
    }

    /// Engine over a custom rule table, independent of the global one.
    #[uniffi::constructor]
    fn from_toml(toml: String) -> Result<Arc<Self>, PthError> {
        Ok(Arc::new(Self {
            rules: RuleSet::from_toml(&toml)?,
        }))
    }

    fn derive(&self, position: String, options: PthOptions) -> Result<String, PthError> {
        let pos = Self::position(&position)?;
        let surface = self.rules.derive(&pos, &options.into())?;
        debug!(%pos, %surface, "engine derive");
        Ok(surface)
    }

    fn derive_full(
        &self,
        position: String,
        options: PthOptions,
    ) -> Result<PthDerivation, PthError> {
        let pos = Self::position(&position)?;
        Ok(self.rules.derive_full(&pos, &options.into())?.into())
    }

    fn explain(&self, position: String, options: PthOptions) -> Result<PthExplain, PthError> {
        let pos = Self::position(&position)?;
        let result = explain(&self.rules, &pos, &options.into())?;
        explain_record(&result)
    }

    /// Check every legal position against the tables; returns how many
    /// were checked.
    fn verify_total(&self) -> Result<u32, PthError> {
        Ok(self.rules.verify_total()? as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PthCheckedTonePolicy, PthToneNotation};

    fn engine() -> Arc<PthEngine> {
        PthEngine::new().unwrap()
    }

    fn defaults() -> PthOptions {
        pth_core::Options::default().into()
    }

    #[test]
    fn derive_default() {
        assert_eq!(
            engine().derive("見三東平".into(), defaults()).unwrap(),
            "jiong1"
        );
    }

    #[test]
    fn derive_full_record() {
        let opts = PthOptions {
            extended: true,
            checked_tone_policy: PthCheckedTonePolicy::AllDeparting,
            ..defaults()
        };
        let d = engine().derive_full("見三屋入".into(), opts).unwrap();
        assert_eq!(d.raw_initial, "g");
        assert_eq!(d.raw_final, "ü");
        assert_eq!(d.raw_tone, None);
        assert_eq!(d.initial, "j");
        assert_eq!(d.final_, "u");
        assert_eq!(d.tone, Some(4));
        assert_eq!(d.surface, "ju4");
        assert_eq!(d.override_count, 1);
    }

    #[test]
    fn diacritic_option() {
        let opts = PthOptions {
            tone_notation: PthToneNotation::Diacritic,
            ..defaults()
        };
        assert_eq!(
            engine().derive("曉開一豪上".into(), opts).unwrap(),
            "ha\u{30C}o"
        );
    }

    #[test]
    fn invalid_position_error() {
        let err = engine().derive("見開三歌入".into(), defaults()).unwrap_err();
        assert!(matches!(err, PthError::InvalidPosition { .. }));
        let err = engine().derive("nonsense".into(), defaults()).unwrap_err();
        assert!(matches!(err, PthError::InvalidPosition { .. }));
    }

    #[test]
    fn custom_table_gap() {
        let toml = r#"
initial = [["", "b"]]
final_unchecked = [["", "a"]]
final_checked = [["幫母", "a"]]
tone = [["", "1"]]
"#;
        let engine = PthEngine::from_toml(toml.into()).unwrap();
        assert_eq!(engine.derive("幫一唐平".into(), defaults()).unwrap(), "ba1");
        let err = engine.derive("見開一唐入".into(), defaults()).unwrap_err();
        assert!(matches!(err, PthError::NoMatchingRule { .. }));
        assert!(engine.verify_total().is_err());
    }

    #[test]
    fn invalid_table_error() {
        let err = PthEngine::from_toml("initial = 3".into()).err().unwrap();
        assert!(matches!(err, PthError::InvalidTable { .. }));
    }

    #[test]
    fn explain_record_renders_both() {
        let e = engine().explain("幫三東平".into(), defaults()).unwrap();
        assert_eq!(e.surface, "beng1");
        assert!(e.text.starts_with("=== 幫三東平 -> beng1 ==="));
        let json: serde_json::Value = serde_json::from_str(&e.json).unwrap();
        assert_eq!(json["surface"], "beng1");
    }

    #[test]
    fn options_round_trip() {
        let opts = PthOptions {
            tone_notation: PthToneNotation::Diacritic,
            extended: true,
            checked_tone_policy: PthCheckedTonePolicy::AspirateNullDeparting,
            chang_chuan_initial: crate::api::PthChangChuanInitial::Sh,
        };
        let core: pth_core::Options = opts.clone().into();
        assert_eq!(PthOptions::from(core), opts);
    }
}
