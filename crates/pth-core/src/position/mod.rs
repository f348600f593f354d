//! Phonological positions (音韻地位) of Middle Chinese syllables.
//!
//! A `Position` is an immutable record of initial, openness, division,
//! class, rhyme and tone. `Position::new` rejects the combinations the
//! derivation tables are not written for; everything else about the
//! position is taken as given.

mod attrs;
mod initial;
mod mask;
mod rhyme;

use std::fmt;
use std::str::FromStr;

pub use attrs::{Class, Coda, Division, Openness, Place, RhymeGroup, Series, Tone, Voicing};
pub use initial::Initial;
pub use mask::{Mask, Member};
pub use rhyme::Rhyme;

use crate::category::Predicate;
use crate::error::{PositionError, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    initial: Initial,
    openness: Option<Openness>,
    division: Division,
    class: Option<Class>,
    rhyme: Rhyme,
    tone: Tone,
}

impl Position {
    pub fn new(
        initial: Initial,
        openness: Option<Openness>,
        division: Division,
        class: Option<Class>,
        rhyme: Rhyme,
        tone: Tone,
    ) -> Result<Self, PositionError> {
        if tone == Tone::Checked && rhyme.coda() != Coda::Nasal {
            return Err(PositionError::CheckedToneOnVocalicRhyme { rhyme: rhyme.name() });
        }
        if rhyme.is_departing_only() && tone != Tone::Departing {
            return Err(PositionError::DepartingOnly { rhyme: rhyme.name() });
        }
        if !rhyme.divisions().contains(division) {
            return Err(PositionError::Division {
                rhyme: rhyme.name(),
                division: division.name(),
            });
        }
        if initial.is_labial() {
            if openness.is_some() {
                return Err(PositionError::LabialOpenness {
                    initial: initial.name(),
                });
            }
            if !rhyme.has_labials() {
                return Err(PositionError::LabialRhyme {
                    rhyme: rhyme.name(),
                    initial: initial.name(),
                });
            }
        }
        if let Some(class) = class {
            if division != Division::Three {
                return Err(PositionError::ClassOutsideThird { class: class.name() });
            }
            if !rhyme.classes().contains(class) {
                return Err(PositionError::Class {
                    rhyme: rhyme.name(),
                    class: class.name(),
                });
            }
        }
        Ok(Self {
            initial,
            openness,
            division,
            class,
            rhyme,
            tone,
        })
    }

    /// Parse the compact notation `母 [呼] 等 [類] 韻 聲`, e.g. `見開三B支平`
    /// or `幫三凡入`. The rhyme may be given by a checked-tone or merged name.
    pub fn from_description(input: &str) -> Result<Self, PositionError> {
        let fail = |reason: &str| PositionError::Description {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let mut chars = input.trim().chars().peekable();

        let initial = chars
            .next()
            .and_then(Initial::from_char)
            .ok_or_else(|| fail("expected an initial"))?;
        let openness = chars.peek().copied().and_then(Openness::from_char);
        if openness.is_some() {
            chars.next();
        }
        let division = chars
            .next()
            .and_then(Division::from_char)
            .ok_or_else(|| fail("expected a division"))?;
        let class = chars.peek().copied().and_then(Class::from_char);
        if class.is_some() {
            chars.next();
        }
        let rhyme = chars
            .next()
            .and_then(Rhyme::from_alias)
            .ok_or_else(|| fail("expected a rhyme"))?;
        let tone = chars
            .next()
            .and_then(Tone::from_char)
            .ok_or_else(|| fail("expected a tone"))?;
        if chars.next().is_some() {
            return Err(fail("trailing characters"));
        }

        Self::new(initial, openness, division, class, rhyme, tone)
    }

    /// Every position `Position::new` accepts.
    pub fn all() -> impl Iterator<Item = Position> {
        Rhyme::all().flat_map(|rhyme| {
            Tone::ALL.iter().flat_map(move |&tone| {
                Division::ALL.iter().flat_map(move |&division| {
                    Initial::ALL.into_iter().flat_map(move |initial| {
                        [None, Some(Openness::Open), Some(Openness::Closed)]
                            .into_iter()
                            .flat_map(move |openness| {
                                std::iter::once(None)
                                    .chain(Class::ALL.iter().copied().map(Some))
                                    .filter_map(move |class| {
                                        Position::new(
                                            initial, openness, division, class, rhyme, tone,
                                        )
                                        .ok()
                                    })
                            })
                    })
                })
            })
        })
    }

    pub fn initial(&self) -> Initial {
        self.initial
    }

    pub fn openness(&self) -> Option<Openness> {
        self.openness
    }

    pub fn division(&self) -> Division {
        self.division
    }

    pub fn class(&self) -> Option<Class> {
        self.class
    }

    pub fn rhyme(&self) -> Rhyme {
        self.rhyme
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Ad hoc category test, e.g. `pos.is("幫組 或 A類")`.
    pub fn is(&self, expr: &str) -> Result<bool, TableError> {
        Ok(Predicate::parse(expr)?.matches(self))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.initial)?;
        if let Some(o) = self.openness {
            write!(f, "{o}")?;
        }
        write!(f, "{}", self.division)?;
        if let Some(c) = self.class {
            write!(f, "{c}")?;
        }
        write!(f, "{}{}", self.rhyme, self.tone)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_description() {
        let pos = Position::from_description("見開三B支平").unwrap();
        assert_eq!(pos.initial(), Initial::Jian);
        assert_eq!(pos.openness(), Some(Openness::Open));
        assert_eq!(pos.division(), Division::Three);
        assert_eq!(pos.class(), Some(Class::B));
        assert_eq!(pos.rhyme().name(), '支');
        assert_eq!(pos.tone(), Tone::Level);
        assert_eq!(pos.to_string(), "見開三B支平");
    }

    #[test]
    fn parse_checked_alias() {
        let pos: Position = "見三屋入".parse().unwrap();
        assert_eq!(pos.rhyme().name(), '東');
        assert_eq!(pos.tone(), Tone::Checked);
        assert_eq!(pos.to_string(), "見三東入");
    }

    #[test]
    fn closed_alias_after_division() {
        // 合 in rhyme position is the checked-tone name of 覃.
        let pos: Position = "見一合入".parse().unwrap();
        assert_eq!(pos.rhyme().name(), '覃');
        assert_eq!(pos.openness(), None);
    }

    #[test]
    fn description_errors() {
        for bad in ["", "x三東平", "見東平", "見三東", "見三東平平", "見三東X"] {
            let err = Position::from_description(bad).unwrap_err();
            assert!(
                matches!(err, PositionError::Description { .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn rejects_checked_vocalic_rhyme() {
        let err = Position::from_description("見開三之入").unwrap_err();
        assert_eq!(err, PositionError::CheckedToneOnVocalicRhyme { rhyme: '之' });
    }

    #[test]
    fn rejects_departing_only_in_other_tones() {
        let err = Position::from_description("端開一泰平").unwrap_err();
        assert_eq!(err, PositionError::DepartingOnly { rhyme: '泰' });
        assert!(Position::from_description("端開一泰去").is_ok());
    }

    #[test]
    fn rejects_foreign_division() {
        let err = Position::from_description("端開二東平").unwrap_err();
        assert_eq!(
            err,
            PositionError::Division {
                rhyme: '東',
                division: '二'
            }
        );
    }

    #[test]
    fn rejects_labial_openness_and_stray_class() {
        assert_eq!(
            Position::from_description("幫開三C陽平").unwrap_err(),
            PositionError::LabialOpenness { initial: '幫' }
        );
        assert_eq!(
            Position::from_description("端開一C寒平").unwrap_err(),
            PositionError::ClassOutsideThird { class: 'C' }
        );
    }

    #[test]
    fn rejects_class_foreign_to_rhyme() {
        assert_eq!(
            Position::from_description("並三C真平").unwrap_err(),
            PositionError::Class {
                rhyme: '真',
                class: 'C'
            }
        );
        assert_eq!(
            Position::from_description("見合三A陽平").unwrap_err(),
            PositionError::Class {
                rhyme: '陽',
                class: 'A'
            }
        );
        assert!(Position::from_description("並三A真平").is_ok());
        assert!(Position::from_description("並三C文平").is_ok());
        assert!(Position::from_description("見開三D庚平").is_ok());
    }

    #[test]
    fn rejects_labial_in_rhyme_without_labials() {
        assert_eq!(
            Position::from_description("幫三C殷平").unwrap_err(),
            PositionError::LabialRhyme {
                rhyme: '殷',
                initial: '幫'
            }
        );
        assert!(Position::from_description("見開三C殷平").is_ok());
    }

    #[test]
    fn all_positions_are_valid_and_distinct() {
        let all: Vec<Position> = Position::all().collect();
        assert!(all.len() > 10_000, "got {}", all.len());
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert!(all.iter().all(|p| p.tone() != Tone::Checked || p.rhyme().coda() == Coda::Nasal));
        assert!(all
            .iter()
            .all(|p| p.class().map_or(true, |c| p.rhyme().classes().contains(c))));
    }

    #[test]
    fn ad_hoc_category_query() {
        let pos = Position::from_description("幫三C東平").unwrap();
        assert!(pos.is("幫組 C類").unwrap());
        assert!(!pos.is("牙喉音").unwrap());
        assert!(pos.is("不存在").is_err());
    }
}
