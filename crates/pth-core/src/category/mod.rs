//! Category predicates over phonological positions.
//!
//! A `Category` is an atomic membership test resolved from a traditional
//! name (`幫滂母`, `三四等`, `牙喉音`, `陽聲韻`, ...). A `Predicate` combines
//! categories with juxtaposition (and), `或` (or), `非` (not) and
//! parentheses.

mod expr;

pub use expr::Predicate;

use crate::position::{
    Class, Coda, Division, Initial, Mask, Member, Openness, Place, Position, Rhyme, RhymeGroup,
    Series, Tone, Voicing,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Initial(Mask<Initial>),
    Rhyme(Mask<Rhyme>),
    Group(Mask<RhymeGroup>),
    Division(Mask<Division>),
    Openness(Openness),
    Class(Mask<Class>),
    Tone(Mask<Tone>),
    Voicing(Mask<Voicing>),
    Place(Mask<Place>),
    Series(Mask<Series>),
    Coda(Coda),
}

impl Category {
    /// Resolve a category name. Returns `None` for names outside the
    /// vocabulary.
    pub fn parse(name: &str) -> Option<Category> {
        if let Some(fixed) = Self::fixed(name) {
            return Some(fixed);
        }

        let mut chars = name.chars();
        let suffix = chars.next_back()?;
        let stem = chars.as_str();
        match suffix {
            '母' => mask_of(stem, Initial::from_char).map(Category::Initial),
            '韻' => mask_of(stem, Rhyme::from_char).map(Category::Rhyme),
            '攝' => mask_of(stem, RhymeGroup::from_char).map(Category::Group),
            '等' => mask_of(stem, Division::from_char).map(Category::Division),
            '類' => mask_of(stem, Class::from_char).map(Category::Class),
            '聲' => mask_of(stem, Tone::from_char).map(Category::Tone),
            '組' => mask_of(stem, Series::from_char).map(Category::Series),
            _ => None,
        }
    }

    fn fixed(name: &str) -> Option<Category> {
        use Voicing::*;
        let category = match name {
            "開口" => Category::Openness(Openness::Open),
            "合口" => Category::Openness(Openness::Closed),
            "舒聲" => Category::Tone(mask([Tone::Level, Tone::Rising, Tone::Departing])),
            "清音" => Category::Voicing(mask([Tenuis, Aspirate])),
            "濁音" => Category::Voicing(mask([Voiced, Sonorant])),
            "全清" => Category::Voicing(mask([Tenuis])),
            "次清" => Category::Voicing(mask([Aspirate])),
            "全濁" => Category::Voicing(mask([Voiced])),
            "次濁" => Category::Voicing(mask([Sonorant])),
            "脣音" => Category::Place(mask([Place::Labial])),
            "舌音" => Category::Place(mask([Place::Lingual])),
            "齒音" => Category::Place(mask([Place::Dental])),
            "牙音" => Category::Place(mask([Place::Velar])),
            "喉音" => Category::Place(mask([Place::Laryngeal])),
            "牙喉音" => Category::Place(mask([Place::Velar, Place::Laryngeal])),
            "陽聲韻" => Category::Coda(Coda::Nasal),
            "陰聲韻" => Category::Coda(Coda::Vocalic),
            _ => return None,
        };
        Some(category)
    }

    pub fn matches(&self, pos: &Position) -> bool {
        match self {
            Category::Initial(m) => m.contains(pos.initial()),
            Category::Rhyme(m) => m.contains(pos.rhyme()),
            Category::Group(m) => m.contains(pos.rhyme().group()),
            Category::Division(m) => m.contains(pos.division()),
            Category::Openness(o) => pos.openness() == Some(*o),
            Category::Class(m) => pos.class().is_some_and(|c| m.contains(c)),
            Category::Tone(m) => m.contains(pos.tone()),
            Category::Voicing(m) => m.contains(pos.initial().voicing()),
            Category::Place(m) => m.contains(pos.initial().place()),
            Category::Series(m) => pos.initial().series().is_some_and(|s| m.contains(s)),
            Category::Coda(c) => pos.rhyme().coda() == *c,
        }
    }
}

fn mask<T: Member, const N: usize>(values: [T; N]) -> Mask<T> {
    values.into_iter().collect()
}

/// Every character of `stem` must name a member; an empty stem is no
/// category at all.
fn mask_of<T: Member>(stem: &str, lookup: impl Fn(char) -> Option<T>) -> Option<Mask<T>> {
    if stem.is_empty() {
        return None;
    }
    stem.chars().map(lookup).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(desc: &str) -> Position {
        Position::from_description(desc).unwrap()
    }

    #[test]
    fn initial_sets() {
        let c = Category::parse("幫滂並母").unwrap();
        assert!(c.matches(&pos("並三C凡上")));
        assert!(!c.matches(&pos("明三C凡上")));
        assert_eq!(Category::parse("母"), None);
        assert_eq!(Category::parse("幫x母"), None);
    }

    #[test]
    fn rhyme_and_group() {
        let p = pos("見三東平");
        assert!(Category::parse("東尤韻").unwrap().matches(&p));
        assert!(Category::parse("通攝").unwrap().matches(&p));
        assert!(!Category::parse("止攝").unwrap().matches(&p));
        // Checked-tone names are not rhyme categories.
        assert_eq!(Category::parse("屋韻"), None);
    }

    #[test]
    fn fixed_names_take_precedence() {
        // 陽 is a rhyme and 清 an initial, but these are class names.
        assert_eq!(Category::parse("陽聲韻"), Some(Category::Coda(Coda::Nasal)));
        assert!(matches!(Category::parse("清音"), Some(Category::Voicing(_))));
        assert!(matches!(Category::parse("陽韻"), Some(Category::Rhyme(_))));
        assert!(matches!(Category::parse("清母"), Some(Category::Initial(_))));
    }

    #[test]
    fn multi_division_and_tone() {
        let c = Category::parse("三四等").unwrap();
        assert!(c.matches(&pos("章開三麻平")));
        assert!(!c.matches(&pos("見開二麻平")));
        let shu = Category::parse("舒聲").unwrap();
        assert!(shu.matches(&pos("見開二麻上")));
        assert!(!shu.matches(&pos("見開二山入")));
        assert!(Category::parse("平上聲").unwrap().matches(&pos("見開二麻上")));
    }

    #[test]
    fn optional_attributes_never_match_when_absent() {
        let p = pos("幫三東平");
        assert!(!Category::parse("開口").unwrap().matches(&p));
        assert!(!Category::parse("合口").unwrap().matches(&p));
        assert!(!Category::parse("ABCD類").unwrap().matches(&p));
        assert!(!Category::parse("見組").unwrap().matches(&pos("影開三陽平")));
    }

    #[test]
    fn voicing_and_place() {
        let p = pos("曉開四先平");
        assert!(Category::parse("清音").unwrap().matches(&p));
        assert!(Category::parse("全清").unwrap().matches(&p));
        assert!(Category::parse("牙喉音").unwrap().matches(&p));
        assert!(!Category::parse("牙音").unwrap().matches(&p));
        assert!(Category::parse("次濁").unwrap().matches(&pos("日開三真平")));
    }
}
