//! Per-query derivation options.
//!
//! Options are plain values; nothing here is global. A UI collaborator
//! renders `options_schema()` as its form and hands the result back as an
//! `Options` (directly, or as TOML through `parse_options_toml`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

pub const DEFAULT_OPTIONS_TOML: &str = include_str!("default_options.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToneNotation {
    #[default]
    #[serde(alias = "數字")]
    Numeric,
    #[serde(alias = "附標")]
    Diacritic,
}

/// How voiceless checked-tone syllables are distributed over the modern
/// tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckedTonePolicy {
    #[serde(alias = "皆派入上聲")]
    AllRising,
    #[default]
    #[serde(alias = "皆派入陰平")]
    AllLevel,
    #[serde(alias = "次清、擦音和零聲母字派入去聲，其餘派入陽平")]
    AspirateFricativeNullDeparting,
    #[serde(alias = "次清和零聲母字派入去聲，其餘派入陽平")]
    AspirateNullDeparting,
    #[serde(alias = "皆不標調")]
    Unmarked,
    /// Also moves voiced checked syllables.
    #[serde(alias = "連同濁聲母，所有入聲字皆派入去聲")]
    AllDeparting,
}

/// Initial of level-tone 常母 (vocalic rhymes) and 船母 syllables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangChuanInitial {
    #[default]
    Ch,
    Sh,
}

/// Kebab-case name, Chinese label and value of every variant, in form
/// order.
macro_rules! choice_table {
    ($ty:ident { $($variant:ident => $name:literal, $label:literal;)+ }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = OptionsError;

            /// Accepts the kebab-case name or the Chinese label.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == s || v.label() == s)
                    .ok_or_else(|| OptionsError::UnknownValue {
                        field: stringify!($ty),
                        value: s.to_string(),
                    })
            }
        }
    };
}

choice_table!(ToneNotation {
    Numeric => "numeric", "數字";
    Diacritic => "diacritic", "附標";
});

choice_table!(CheckedTonePolicy {
    AllRising => "all-rising", "皆派入上聲";
    AllLevel => "all-level", "皆派入陰平";
    AspirateFricativeNullDeparting => "aspirate-fricative-null-departing",
        "次清、擦音和零聲母字派入去聲，其餘派入陽平";
    AspirateNullDeparting => "aspirate-null-departing", "次清和零聲母字派入去聲，其餘派入陽平";
    Unmarked => "unmarked", "皆不標調";
    AllDeparting => "all-departing", "連同濁聲母，所有入聲字皆派入去聲";
});

choice_table!(ChangChuanInitial {
    Ch => "ch", "ch";
    Sh => "sh", "sh";
});

impl ChangChuanInitial {
    pub fn spelling(self) -> &'static str {
        self.name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    pub tone_notation: ToneNotation,
    /// Enables the two settings below; without it they are ignored.
    #[serde(alias = "extended-options")]
    pub extended: bool,
    pub checked_tone_policy: CheckedTonePolicy,
    pub chang_chuan_initial: ChangChuanInitial,
}

impl Options {
    /// The checked-tone policy that actually applies.
    pub fn effective_checked_tone_policy(&self) -> CheckedTonePolicy {
        if self.extended {
            self.checked_tone_policy
        } else {
            CheckedTonePolicy::default()
        }
    }

    /// The 常/船 override, if one applies.
    pub fn effective_chang_chuan_initial(&self) -> Option<ChangChuanInitial> {
        self.extended.then_some(self.chang_chuan_initial)
    }
}

pub fn parse_options_toml(toml_str: &str) -> Result<Options, OptionsError> {
    toml::from_str(toml_str).map_err(|e| OptionsError::Parse(e.to_string()))
}

/// Returns the embedded default options TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_OPTIONS_TOML
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// One form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Empty for boolean fields.
    pub choices: Vec<OptionChoice>,
    pub default: String,
    /// Only shown (and only consulted) when `extended` is on.
    pub extended_only: bool,
}

fn choices<T: Copy>(
    all: &[T],
    name: fn(T) -> &'static str,
    label: fn(T) -> &'static str,
) -> Vec<OptionChoice> {
    all.iter()
        .map(|&v| OptionChoice {
            value: name(v),
            label: label(v),
        })
        .collect()
}

/// Every option with its choices and default.
pub fn options_schema() -> Vec<OptionSpec> {
    let defaults = Options::default();
    vec![
        OptionSpec {
            key: "tone-notation",
            label: "標調方式",
            choices: choices(ToneNotation::ALL, ToneNotation::name, ToneNotation::label),
            default: defaults.tone_notation.to_string(),
            extended_only: false,
        },
        OptionSpec {
            key: "extended",
            label: "更多選項",
            choices: Vec::new(),
            default: defaults.extended.to_string(),
            extended_only: false,
        },
        OptionSpec {
            key: "checked-tone-policy",
            label: "清聲母入聲調分派層次",
            choices: choices(
                CheckedTonePolicy::ALL,
                CheckedTonePolicy::name,
                CheckedTonePolicy::label,
            ),
            default: defaults.checked_tone_policy.to_string(),
            extended_only: true,
        },
        OptionSpec {
            key: "chang-chuan-initial",
            label: "常母平聲陰聲韻聲母和船母平聲聲母",
            choices: choices(
                ChangChuanInitial::ALL,
                ChangChuanInitial::name,
                ChangChuanInitial::label,
            ),
            default: defaults.chang_chuan_initial.to_string(),
            extended_only: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match() {
        assert_eq!(parse_options_toml(DEFAULT_OPTIONS_TOML).unwrap(), Options::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(parse_options_toml("").unwrap(), Options::default());
    }

    #[test]
    fn chinese_aliases() {
        let toml = r#"
tone-notation = "附標"
extended-options = true
checked-tone-policy = "連同濁聲母，所有入聲字皆派入去聲"
chang-chuan-initial = "sh"
"#;
        let opts = parse_options_toml(toml).unwrap();
        assert_eq!(opts.tone_notation, ToneNotation::Diacritic);
        assert!(opts.extended);
        assert_eq!(opts.checked_tone_policy, CheckedTonePolicy::AllDeparting);
        assert_eq!(opts.chang_chuan_initial, ChangChuanInitial::Sh);
    }

    #[test]
    fn unknown_fields_and_values_rejected() {
        assert!(matches!(
            parse_options_toml("tone = \"numeric\""),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            parse_options_toml("checked-tone-policy = \"sometimes\""),
            Err(OptionsError::Parse(_))
        ));
    }

    #[test]
    fn from_str_accepts_name_or_label() {
        assert_eq!(
            "aspirate-null-departing".parse::<CheckedTonePolicy>().unwrap(),
            CheckedTonePolicy::AspirateNullDeparting
        );
        assert_eq!(
            "皆不標調".parse::<CheckedTonePolicy>().unwrap(),
            CheckedTonePolicy::Unmarked
        );
        let err = "dunno".parse::<ToneNotation>().unwrap_err();
        assert!(matches!(
            err,
            OptionsError::UnknownValue {
                field: "ToneNotation",
                ..
            }
        ));
    }

    #[test]
    fn names_match_serde() {
        for p in CheckedTonePolicy::ALL {
            let toml = format!("checked-tone-policy = \"{}\"", p.name());
            assert_eq!(parse_options_toml(&toml).unwrap().checked_tone_policy, *p);
        }
    }

    #[test]
    fn effective_values_need_extended() {
        let mut opts = Options {
            checked_tone_policy: CheckedTonePolicy::AllRising,
            chang_chuan_initial: ChangChuanInitial::Sh,
            ..Options::default()
        };
        assert_eq!(opts.effective_checked_tone_policy(), CheckedTonePolicy::AllLevel);
        assert_eq!(opts.effective_chang_chuan_initial(), None);
        opts.extended = true;
        assert_eq!(opts.effective_checked_tone_policy(), CheckedTonePolicy::AllRising);
        assert_eq!(opts.effective_chang_chuan_initial(), Some(ChangChuanInitial::Sh));
    }

    #[test]
    fn schema_lists_six_policies() {
        let schema = options_schema();
        assert_eq!(schema.len(), 4);
        let policy = schema.iter().find(|s| s.key == "checked-tone-policy").unwrap();
        assert_eq!(policy.choices.len(), 6);
        assert_eq!(policy.default, "all-level");
        assert!(policy.extended_only);
    }
}
