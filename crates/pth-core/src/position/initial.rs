use std::fmt;

use super::attrs::{Place, Series, Voicing};
use super::mask::Member;

/// 聲母: the 38 initials of the Qieyun system.
///
/// Variants are named after the Mandarin reading of the traditional name
/// character; 常 and 以 use their alternative names 禪 (`Chan`) and 余
/// (`Yu`) to stay distinct from 昌 and 疑.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Initial {
    Bang,
    Pang,
    Bing,
    Ming,
    Duan,
    Tou,
    Ding,
    Ni,
    Zhi,
    Che,
    Cheng,
    Niang,
    Jing,
    Qing,
    Cong,
    Xin,
    Xie,
    Zhuang,
    Chu,
    Chong,
    Sheng,
    Si,
    Zhang,
    Chang,
    Chan,
    Shu,
    Chuan,
    Jian,
    Xi,
    Qun,
    Yi,
    Ying,
    Xiao,
    Xia,
    Yun,
    Yu,
    Lai,
    Ri,
}

impl Initial {
    pub const ALL: [Initial; 38] = [
        Initial::Bang,
        Initial::Pang,
        Initial::Bing,
        Initial::Ming,
        Initial::Duan,
        Initial::Tou,
        Initial::Ding,
        Initial::Ni,
        Initial::Zhi,
        Initial::Che,
        Initial::Cheng,
        Initial::Niang,
        Initial::Jing,
        Initial::Qing,
        Initial::Cong,
        Initial::Xin,
        Initial::Xie,
        Initial::Zhuang,
        Initial::Chu,
        Initial::Chong,
        Initial::Sheng,
        Initial::Si,
        Initial::Zhang,
        Initial::Chang,
        Initial::Chan,
        Initial::Shu,
        Initial::Chuan,
        Initial::Jian,
        Initial::Xi,
        Initial::Qun,
        Initial::Yi,
        Initial::Ying,
        Initial::Xiao,
        Initial::Xia,
        Initial::Yun,
        Initial::Yu,
        Initial::Lai,
        Initial::Ri,
    ];

    /// Traditional name character, as used in `…母` categories.
    pub fn name(self) -> char {
        const NAMES: [char; 38] = [
            '幫', '滂', '並', '明', '端', '透', '定', '泥', '知', '徹', '澄', '孃', '精', '清', '從',
            '心', '邪', '莊', '初', '崇', '生', '俟', '章', '昌', '常', '書', '船', '見', '溪', '羣',
            '疑', '影', '曉', '匣', '云', '以', '來', '日',
        ];
        NAMES[self as usize]
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == c)
    }

    pub fn voicing(self) -> Voicing {
        use Initial::*;
        match self {
            Bang | Duan | Zhi | Jing | Xin | Zhuang | Sheng | Zhang | Shu | Jian | Ying | Xiao => {
                Voicing::Tenuis
            }
            Pang | Tou | Che | Qing | Chu | Chang | Xi => Voicing::Aspirate,
            Bing | Ding | Cheng | Cong | Xie | Chong | Si | Chan | Chuan | Qun | Xia => {
                Voicing::Voiced
            }
            Ming | Ni | Niang | Lai | Ri | Yi | Yun | Yu => Voicing::Sonorant,
        }
    }

    pub fn place(self) -> Place {
        use Initial::*;
        match self {
            Bang | Pang | Bing | Ming => Place::Labial,
            Duan | Tou | Ding | Ni | Zhi | Che | Cheng | Niang | Lai => Place::Lingual,
            Jing | Qing | Cong | Xin | Xie | Zhuang | Chu | Chong | Sheng | Si | Zhang | Chang
            | Chan | Shu | Chuan | Ri => Place::Dental,
            Jian | Xi | Qun | Yi => Place::Velar,
            Ying | Xiao | Xia | Yun | Yu => Place::Laryngeal,
        }
    }

    /// The series (組) of the initial; 來日 and the laryngeals belong to none.
    pub fn series(self) -> Option<Series> {
        use Initial::*;
        match self {
            Bang | Pang | Bing | Ming => Some(Series::Bang),
            Duan | Tou | Ding | Ni => Some(Series::Duan),
            Zhi | Che | Cheng | Niang => Some(Series::Zhi),
            Jing | Qing | Cong | Xin | Xie => Some(Series::Jing),
            Zhuang | Chu | Chong | Sheng | Si => Some(Series::Zhuang),
            Zhang | Chang | Chan | Shu | Chuan => Some(Series::Zhang),
            Jian | Xi | Qun | Yi => Some(Series::Jian),
            Ying | Xiao | Xia | Yun | Yu | Lai | Ri => None,
        }
    }

    pub fn is_labial(self) -> bool {
        self.place() == Place::Labial
    }
}

impl Member for Initial {
    fn ordinal(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Initial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
