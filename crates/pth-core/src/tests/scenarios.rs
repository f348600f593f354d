use super::{derive_default, derive_with};
use crate::options::{ChangChuanInitial, CheckedTonePolicy, Options, ToneNotation};

fn extended(policy: CheckedTonePolicy) -> Options {
    Options {
        extended: true,
        checked_tone_policy: policy,
        ..Options::default()
    }
}

#[test]
fn labial_glide_after_b() {
    assert_eq!(derive_default("幫三東平"), "beng1");
}

#[test]
fn palatalized_velar() {
    assert_eq!(derive_default("見三東平"), "jiong1");
}

#[test]
fn sonorant_level_tone_is_yangping() {
    // 明 is 次濁, so the level tone comes out as 2.
    assert_eq!(derive_default("明三尤平"), "mou2");
}

#[test]
fn voiceless_checked_defaults_to_level() {
    assert_eq!(derive_default("見三屋入"), "ju1");
}

#[test]
fn all_departing_moves_voiced_too() {
    let opts = extended(CheckedTonePolicy::AllDeparting);
    assert_eq!(derive_with("見三屋入", &opts), "ju4");
    assert_eq!(derive_with("並三C屋入", &opts), "fu4");
    assert_eq!(derive_with("疑合三元入", &opts), "yue4");
    assert_eq!(derive_default("並三C屋入"), "fu2");
}

#[test]
fn common_readings() {
    let cases = [
        ("端一東平", "dong1"),
        ("見二江平", "jiang1"),
        ("知開三支平", "zhi1"),
        ("日開三支平", "er2"),
        ("疑三魚平", "yu2"),
        ("見開二麻平", "jia1"),
        ("曉合二麻平", "hua1"),
        ("疑合三元入", "yue4"),
        ("日開三真平", "ren2"),
        ("幫三C東平", "feng1"),
        ("明三C虞平", "wu2"),
        ("書合三脂上", "shui3"),
        ("生二江平", "shuang1"),
        ("日開三真入", "ri4"),
        ("來三屋入", "lu4"),
        ("匣二覺入", "xue2"),
        ("常開三陽平", "chang2"),
        ("常開三之平", "shi2"),
        ("定開一唐上", "dang4"),
    ];
    for (desc, expected) in cases {
        assert_eq!(derive_default(desc), expected, "{desc}");
    }
}

#[test]
fn chang_chuan_alternant() {
    let ch = Options {
        extended: true,
        chang_chuan_initial: ChangChuanInitial::Ch,
        ..Options::default()
    };
    let sh = Options {
        chang_chuan_initial: ChangChuanInitial::Sh,
        ..ch
    };
    assert_eq!(derive_with("船合三仙平", &ch), "chuan2");
    assert_eq!(derive_with("船合三仙平", &sh), "shuan2");
    assert_eq!(derive_with("常開三之平", &ch), "chi2");
    assert_eq!(derive_with("常開三之平", &sh), "shi2");
    // Without extended options the table spelling stands.
    assert_eq!(derive_default("船合三仙平"), "shuan2");
}

#[test]
fn checked_policies_on_voiceless() {
    use CheckedTonePolicy::*;
    // 溪開一唐入 (次清) and 見開一唐入 (全清)
    let cases = [
        (AllRising, "ke3", "ge3"),
        (AllLevel, "ke1", "ge1"),
        (AspirateFricativeNullDeparting, "ke4", "ge2"),
        (AspirateNullDeparting, "ke4", "ge2"),
        (Unmarked, "ke", "ge"),
        (AllDeparting, "ke4", "ge4"),
    ];
    for (policy, aspirate, tenuis) in cases {
        let opts = extended(policy);
        assert_eq!(derive_with("溪開一唐入", &opts), aspirate, "{policy:?}");
        assert_eq!(derive_with("見開一唐入", &opts), tenuis, "{policy:?}");
    }
}

#[test]
fn diacritic_notation() {
    let opts = Options {
        tone_notation: ToneNotation::Diacritic,
        ..Options::default()
    };
    assert_eq!(derive_with("曉開一豪上", &opts), "ha\u{30C}o");
    assert_eq!(derive_with("來三尤平", &opts), "liu\u{301}");
    assert_eq!(derive_with("見合一灰去", &opts), "gui\u{300}");
    let unmarked = Options {
        extended: true,
        checked_tone_policy: CheckedTonePolicy::Unmarked,
        ..opts
    };
    assert_eq!(derive_with("見三屋入", &unmarked), "ju");
}
