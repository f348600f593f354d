//! Option-driven overrides of the raw table output.

use serde::Serialize;

use crate::derive::RawTriple;
use crate::options::{CheckedTonePolicy, Options};
use crate::position::{Coda, Initial, Position, Tone, Voicing};

/// One change made to the raw triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VariantOverride {
    /// Level-tone 常母 (vocalic rhymes) and 船母.
    Initial { from: String, to: String },
    /// Checked-tone redistribution.
    Tone {
        policy: CheckedTonePolicy,
        from: Option<u8>,
        to: Option<u8>,
    },
}

/// Whether `pos` is a level-tone 常母 syllable with a vocalic rhyme or a
/// level-tone 船母 syllable.
fn is_chang_chuan_level(pos: &Position) -> bool {
    pos.tone() == Tone::Level
        && match pos.initial() {
            Initial::Chan => pos.rhyme().coda() == Coda::Vocalic,
            Initial::Chuan => true,
            _ => false,
        }
}

/// The modern tone of a checked syllable under `policy`, or `None` to keep
/// what the tone table says.
fn checked_tone(policy: CheckedTonePolicy, initial: Initial) -> Option<Option<u8>> {
    use CheckedTonePolicy::*;
    let voicing = initial.voicing();
    let tone = match policy {
        AllDeparting => 4,
        _ if !voicing.is_voiceless() => return None,
        AllRising => 3,
        AllLevel => 1,
        AspirateFricativeNullDeparting => {
            let fricative_or_null = matches!(
                initial,
                Initial::Xin | Initial::Sheng | Initial::Shu | Initial::Ying | Initial::Xiao
            );
            if fricative_or_null || voicing == Voicing::Aspirate {
                4
            } else {
                2
            }
        }
        AspirateNullDeparting => {
            if initial == Initial::Ying || voicing == Voicing::Aspirate {
                4
            } else {
                2
            }
        }
        Unmarked => return Some(None),
    };
    Some(Some(tone))
}

/// Apply the option-driven overrides to `raw` in place and report what
/// changed.
pub fn resolve(pos: &Position, options: &Options, raw: &mut RawTriple) -> Vec<VariantOverride> {
    let mut overrides = Vec::new();

    if let Some(alt) = options.effective_chang_chuan_initial() {
        if is_chang_chuan_level(pos) && raw.initial != alt.spelling() {
            let to = alt.spelling().to_string();
            overrides.push(VariantOverride::Initial {
                from: std::mem::replace(&mut raw.initial, to.clone()),
                to,
            });
        }
    }

    if pos.tone() == Tone::Checked {
        let policy = options.effective_checked_tone_policy();
        if let Some(tone) = checked_tone(policy, pos.initial()) {
            if tone != raw.tone {
                overrides.push(VariantOverride::Tone {
                    policy,
                    from: std::mem::replace(&mut raw.tone, tone),
                    to: tone,
                });
            }
        }
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ChangChuanInitial;

    fn raw(initial: &str, final_: &str, tone: Option<u8>) -> RawTriple {
        RawTriple {
            initial: initial.to_string(),
            final_: final_.to_string(),
            tone,
        }
    }

    fn pos(desc: &str) -> Position {
        Position::from_description(desc).unwrap()
    }

    fn extended(policy: CheckedTonePolicy) -> Options {
        Options {
            extended: true,
            checked_tone_policy: policy,
            ..Options::default()
        }
    }

    fn tone_under(policy: CheckedTonePolicy, desc: &str, table_tone: Option<u8>) -> Option<u8> {
        let mut triple = raw("", "i", table_tone);
        resolve(&pos(desc), &extended(policy), &mut triple);
        triple.tone
    }

    #[test]
    fn default_policy_without_extended() {
        let mut triple = raw("g", "ü", None);
        let overrides = resolve(&pos("見三屋入"), &Options::default(), &mut triple);
        assert_eq!(triple.tone, Some(1));
        assert_eq!(
            overrides,
            vec![VariantOverride::Tone {
                policy: CheckedTonePolicy::AllLevel,
                from: None,
                to: Some(1)
            }]
        );
    }

    #[test]
    fn voiced_checked_untouched() {
        use CheckedTonePolicy::*;
        let policies = [
            AllRising,
            AllLevel,
            AspirateFricativeNullDeparting,
            AspirateNullDeparting,
            Unmarked,
        ];
        for policy in policies {
            assert_eq!(tone_under(policy, "並三C凡入", Some(2)), Some(2));
            assert_eq!(tone_under(policy, "明三C凡入", Some(4)), Some(4));
        }
        assert_eq!(tone_under(AllDeparting, "並三C凡入", Some(2)), Some(4));
    }

    #[test]
    fn six_policies_on_voiceless() {
        use CheckedTonePolicy::*;
        // 見 (全清), 溪 (次清), 影 (全清, null), 心 (全清, fricative)
        let cases: [(CheckedTonePolicy, [u8; 4]); 5] = [
            (AllRising, [3, 3, 3, 3]),
            (AllLevel, [1, 1, 1, 1]),
            (AspirateFricativeNullDeparting, [2, 4, 4, 4]),
            (AspirateNullDeparting, [2, 4, 4, 2]),
            (AllDeparting, [4, 4, 4, 4]),
        ];
        for (policy, expected) in cases {
            let got = ["見開一唐入", "溪開一唐入", "影開一唐入", "心開一唐入"]
                .map(|d| tone_under(policy, d, None));
            assert_eq!(got, expected.map(Some), "{policy:?}");
        }
        assert_eq!(tone_under(Unmarked, "見開一唐入", None), None);
    }

    #[test]
    fn unchecked_tones_ignore_policy() {
        assert_eq!(
            tone_under(CheckedTonePolicy::AllDeparting, "見開一唐平", Some(1)),
            Some(1)
        );
    }

    #[test]
    fn chang_chuan_override() {
        let opts = Options {
            extended: true,
            chang_chuan_initial: ChangChuanInitial::Sh,
            ..Options::default()
        };
        let mut triple = raw("sh", "er", Some(2));
        assert!(resolve(&pos("常開三之平"), &opts, &mut triple).is_empty());

        let opts = Options {
            chang_chuan_initial: ChangChuanInitial::Ch,
            ..opts
        };
        let mut triple = raw("sh", "er", Some(2));
        let overrides = resolve(&pos("常開三之平"), &opts, &mut triple);
        assert_eq!(triple.initial, "ch");
        assert_eq!(
            overrides,
            vec![VariantOverride::Initial {
                from: "sh".into(),
                to: "ch".into()
            }]
        );

        // 陽聲韻 常母 and non-level tones are left alone.
        let mut triple = raw("ch", "ang", Some(2));
        let opts = Options {
            chang_chuan_initial: ChangChuanInitial::Sh,
            ..opts
        };
        assert!(resolve(&pos("常開三陽平"), &opts, &mut triple).is_empty());
        let mut triple = raw("sh", "en", Some(4));
        assert!(resolve(&pos("船合三真去"), &opts, &mut triple).is_empty());
    }

    #[test]
    fn chang_chuan_needs_extended() {
        let opts = Options {
            chang_chuan_initial: ChangChuanInitial::Ch,
            ..Options::default()
        };
        let mut triple = raw("sh", "en", Some(2));
        assert!(resolve(&pos("船合三真平"), &opts, &mut triple).is_empty());
        assert_eq!(triple.initial, "sh");
    }
}
