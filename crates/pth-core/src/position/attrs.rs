//! Small closed attribute sets of a phonological position.
//!
//! Each value is named by the single character used for it in traditional
//! phonology and in category expressions (`平`, `三`, `開`, `C`, ...).

use std::fmt;

use super::mask::Member;

macro_rules! char_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $ch:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> char {
                match self {
                    $($name::$variant => $ch),+
                }
            }

            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $($ch => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Member for $name {
            fn ordinal(self) -> u32 {
                self as u32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

char_enum! {
    /// 聲調
    pub enum Tone {
        Level = '平',
        Rising = '上',
        Departing = '去',
        /// 入聲: syllables closed by a stop.
        Checked = '入',
    }
}

char_enum! {
    /// 等
    pub enum Division {
        One = '一',
        Two = '二',
        Three = '三',
        Four = '四',
    }
}

char_enum! {
    /// 呼
    pub enum Openness {
        /// 開口
        Open = '開',
        /// 合口
        Closed = '合',
    }
}

char_enum! {
    /// 類: environment marker of division-three syllables.
    pub enum Class {
        A = 'A',
        B = 'B',
        C = 'C',
        D = 'D',
    }
}

char_enum! {
    /// 清濁
    pub enum Voicing {
        /// 全清
        Tenuis = '全',
        /// 次清
        Aspirate = '次',
        /// 全濁
        Voiced = '濁',
        /// 次濁
        Sonorant = '響',
    }
}

impl Voicing {
    pub fn label(self) -> &'static str {
        match self {
            Voicing::Tenuis => "全清",
            Voicing::Aspirate => "次清",
            Voicing::Voiced => "全濁",
            Voicing::Sonorant => "次濁",
        }
    }

    /// 清音
    pub fn is_voiceless(self) -> bool {
        matches!(self, Voicing::Tenuis | Voicing::Aspirate)
    }
}

char_enum! {
    /// 音: place of articulation of an initial.
    pub enum Place {
        /// 脣音
        Labial = '脣',
        /// 舌音
        Lingual = '舌',
        /// 齒音
        Dental = '齒',
        /// 牙音
        Velar = '牙',
        /// 喉音
        Laryngeal = '喉',
    }
}

char_enum! {
    /// 組: the series an initial belongs to, named by its first member.
    pub enum Series {
        Bang = '幫',
        Duan = '端',
        Zhi = '知',
        Jing = '精',
        Zhuang = '莊',
        Zhang = '章',
        Jian = '見',
    }
}

char_enum! {
    /// 攝: the sixteen rhyme groups.
    pub enum RhymeGroup {
        Tong = '通',
        Jiang = '江',
        Zhi = '止',
        Yu = '遇',
        Xie = '蟹',
        Zhen = '臻',
        Shan = '山',
        Xiao = '效',
        Guo = '果',
        Jia = '假',
        Dang = '宕',
        Geng = '梗',
        Zeng = '曾',
        Liu = '流',
        Shen = '深',
        Xian = '咸',
    }
}

/// Coda class of a rhyme group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coda {
    /// 陽聲韻: nasal coda, with a stop-coda checked counterpart.
    Nasal,
    /// 陰聲韻: vowel or glide coda, no checked counterpart.
    Vocalic,
}

impl RhymeGroup {
    pub fn coda(self) -> Coda {
        match self {
            RhymeGroup::Tong
            | RhymeGroup::Jiang
            | RhymeGroup::Zhen
            | RhymeGroup::Shan
            | RhymeGroup::Dang
            | RhymeGroup::Geng
            | RhymeGroup::Zeng
            | RhymeGroup::Shen
            | RhymeGroup::Xian => Coda::Nasal,
            RhymeGroup::Zhi
            | RhymeGroup::Yu
            | RhymeGroup::Xie
            | RhymeGroup::Xiao
            | RhymeGroup::Guo
            | RhymeGroup::Jia
            | RhymeGroup::Liu => Coda::Vocalic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_round_trip() {
        for t in Tone::ALL {
            assert_eq!(Tone::from_char(t.name()), Some(*t));
        }
        for g in RhymeGroup::ALL {
            assert_eq!(RhymeGroup::from_char(g.name()), Some(*g));
        }
        assert_eq!(RhymeGroup::ALL.len(), 16);
        assert_eq!(Division::from_char('五'), None);
    }

    #[test]
    fn nasal_groups() {
        let nasal: String = RhymeGroup::ALL
            .iter()
            .filter(|g| g.coda() == Coda::Nasal)
            .map(|g| g.name())
            .collect();
        assert_eq!(nasal, "通江臻山宕梗曾深咸");
    }
}
