use std::fmt;

use super::attrs::{Class, Coda, Division, RhymeGroup};
use super::mask::{Mask, Member};

/// 韻: one of the 58 rhymes, named by its level-tone representative.
///
/// Rising, departing and checked syllables of a rhyme share the level-tone
/// name (舉平以賅上去入); the tone is a separate attribute of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rhyme(u8);

struct RhymeInfo {
    name: char,
    group: RhymeGroup,
    divisions: Mask<Division>,
    departing_only: bool,
}

const fn divisions(list: &[Division]) -> Mask<Division> {
    let mut bits = 0u64;
    let mut i = 0;
    while i < list.len() {
        bits |= 1 << list[i] as u32;
        i += 1;
    }
    Mask::from_bits(bits)
}

macro_rules! rhymes {
    (@departing departing) => { true };
    (@departing) => { false };
    ($( $name:literal $group:ident [$($div:ident),+] $($departing:ident)? ;)+) => {
        [$(
            RhymeInfo {
                name: $name,
                group: RhymeGroup::$group,
                divisions: divisions(&[$(Division::$div),+]),
                departing_only: rhymes!(@departing $($departing)?),
            },
        )+]
    };
}

static RHYMES: [RhymeInfo; 58] = rhymes! {
    '東' Tong [One, Three];
    '冬' Tong [One];
    '鍾' Tong [Three];
    '江' Jiang [Two];
    '支' Zhi [Three];
    '脂' Zhi [Three];
    '之' Zhi [Three];
    '微' Zhi [Three];
    '魚' Yu [Three];
    '虞' Yu [Three];
    '模' Yu [One];
    '齊' Xie [Four];
    '祭' Xie [Three] departing;
    '泰' Xie [One] departing;
    '佳' Xie [Two];
    '皆' Xie [Two];
    '夬' Xie [Two] departing;
    '灰' Xie [One];
    '咍' Xie [One];
    '廢' Xie [Three] departing;
    '真' Zhen [Three];
    '臻' Zhen [Three];
    '文' Zhen [Three];
    '殷' Zhen [Three];
    '元' Shan [Three];
    '魂' Zhen [One];
    '痕' Zhen [One];
    '寒' Shan [One];
    '刪' Shan [Two];
    '山' Shan [Two];
    '先' Shan [Four];
    '仙' Shan [Three];
    '蕭' Xiao [Four];
    '宵' Xiao [Three];
    '肴' Xiao [Two];
    '豪' Xiao [One];
    '歌' Guo [One, Three];
    '麻' Jia [Two, Three];
    '陽' Dang [Three];
    '唐' Dang [One];
    '庚' Geng [Two, Three];
    '耕' Geng [Two];
    '清' Geng [Three];
    '青' Geng [Four];
    '蒸' Zeng [Three];
    '登' Zeng [One];
    '尤' Liu [Three];
    '侯' Liu [One];
    '幽' Liu [Three];
    '侵' Shen [Three];
    '覃' Xian [One];
    '談' Xian [One];
    '鹽' Xian [Three];
    '添' Xian [Four];
    '咸' Xian [Two];
    '銜' Xian [Two];
    '嚴' Xian [Three];
    '凡' Xian [Three];
};

/// Names accepted in place of a canonical rhyme: rhymes merged into their
/// open or closed partner (諄桓戈) and the checked-tone rhyme names.
const ALIASES: &[(char, char)] = &[
    ('諄', '真'),
    ('桓', '寒'),
    ('戈', '歌'),
    ('屋', '東'),
    ('沃', '冬'),
    ('燭', '鍾'),
    ('覺', '江'),
    ('質', '真'),
    ('術', '真'),
    ('櫛', '臻'),
    ('物', '文'),
    ('迄', '殷'),
    ('月', '元'),
    ('沒', '魂'),
    ('曷', '寒'),
    ('末', '寒'),
    ('黠', '山'),
    ('鎋', '刪'),
    ('屑', '先'),
    ('薛', '仙'),
    ('藥', '陽'),
    ('鐸', '唐'),
    ('陌', '庚'),
    ('麥', '耕'),
    ('昔', '清'),
    ('錫', '青'),
    ('職', '蒸'),
    ('德', '登'),
    ('緝', '侵'),
    ('合', '覃'),
    ('盍', '談'),
    ('葉', '鹽'),
    ('怗', '添'),
    ('洽', '咸'),
    ('狎', '銜'),
    ('業', '嚴'),
    ('乏', '凡'),
];

/// 重紐 rhymes: their 脣牙喉 syllables split into classes A and B.
const SPLIT_RHYMES: &str = "支脂祭真仙宵侵鹽";

/// Division-three rhymes of class C.
const CLASS_C_RHYMES: &str = "東鍾之微魚虞廢殷文元歌陽尤嚴凡";

/// Rhymes with no labial syllables; their labials went to the closed
/// partner (脂虞文魂凡) or never existed.
const NO_LABIAL_RHYMES: &str = "之魚殷痕臻嚴";

impl Rhyme {
    pub const COUNT: usize = 58;

    pub fn all() -> impl Iterator<Item = Rhyme> {
        (0..Self::COUNT as u8).map(Rhyme)
    }

    /// Look up a rhyme by its canonical name.
    pub fn from_char(c: char) -> Option<Self> {
        RHYMES
            .iter()
            .position(|info| info.name == c)
            .map(|idx| Rhyme(idx as u8))
    }

    /// Look up a rhyme by its canonical name or an alias.
    pub fn from_alias(c: char) -> Option<Self> {
        Self::from_char(c).or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == c)
                .and_then(|(_, canonical)| Self::from_char(*canonical))
        })
    }

    fn info(self) -> &'static RhymeInfo {
        &RHYMES[self.0 as usize]
    }

    pub fn name(self) -> char {
        self.info().name
    }

    pub fn group(self) -> RhymeGroup {
        self.info().group
    }

    pub fn coda(self) -> Coda {
        self.group().coda()
    }

    pub fn divisions(self) -> Mask<Division> {
        self.info().divisions
    }

    /// The classes a division-three syllable of this rhyme may carry:
    /// A and B for 重紐 rhymes, C for the class-C rhymes, D for the rest.
    /// Empty for rhymes without division three.
    pub fn classes(self) -> Mask<Class> {
        let name = self.name();
        if !self.divisions().contains(Division::Three) {
            Mask::EMPTY
        } else if SPLIT_RHYMES.contains(name) {
            [Class::A, Class::B].into_iter().collect()
        } else if CLASS_C_RHYMES.contains(name) {
            [Class::C].into_iter().collect()
        } else {
            [Class::D].into_iter().collect()
        }
    }

    pub fn has_labials(self) -> bool {
        !NO_LABIAL_RHYMES.contains(self.name())
    }

    /// 祭泰夬廢 have no level, rising or checked syllables.
    pub fn is_departing_only(self) -> bool {
        self.info().departing_only
    }
}

impl Member for Rhyme {
    fn ordinal(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Rhyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
