//! Strongly-typed wrappers for board concepts
//!
//! Newtypes and small enums that keep hero identities, sides and rows from
//! being mixed up with bare strings and integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Hero identity (e.g. "reinhardt", "hanzo")
///
/// Identities are open: a hero missing from the built-in roster is still a
/// valid card, it simply gets neutral heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(String);

impl HeroId {
    pub fn new(s: impl Into<String>) -> Self {
        HeroId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HeroId {
    fn from(s: String) -> Self {
        HeroId(s)
    }
}

impl From<&str> for HeroId {
    fn from(s: &str) -> Self {
        HeroId(s.to_string())
    }
}

/// Which side of the table a board belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ai,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Ai => Side::Enemy,
            Side::Enemy => Side::Ai,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Ai => write!(f, "ai"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// One of the three horizontal lanes
///
/// Declaration order (front, middle, back) is the final tie-break order used
/// by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowName {
    Front,
    Middle,
    Back,
}

impl RowName {
    pub const ALL: [RowName; 3] = [RowName::Front, RowName::Middle, RowName::Back];

    pub fn index(self) -> usize {
        match self {
            RowName::Front => 0,
            RowName::Middle => 1,
            RowName::Back => 2,
        }
    }

    /// Rows closer to the front than this one
    pub fn ahead(self) -> &'static [RowName] {
        match self {
            RowName::Front => &[],
            RowName::Middle => &[RowName::Front],
            RowName::Back => &[RowName::Front, RowName::Middle],
        }
    }

    /// Rows further from the front
    pub fn behind(self) -> &'static [RowName] {
        match self {
            RowName::Front => &[RowName::Middle, RowName::Back],
            RowName::Middle => &[RowName::Back],
            RowName::Back => &[],
        }
    }
}

impl fmt::Display for RowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowName::Front => write!(f, "front"),
            RowName::Middle => write!(f, "middle"),
            RowName::Back => write!(f, "back"),
        }
    }
}

impl std::str::FromStr for RowName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" | "f" => Ok(RowName::Front),
            "middle" | "m" => Ok(RowName::Middle),
            "back" | "b" => Ok(RowName::Back),
            _ => Err(format!("invalid row '{s}' (expected: front, middle, back)")),
        }
    }
}

/// A value per row, e.g. a card's power or synergy gain in each lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerRow<T> {
    #[serde(alias = "f")]
    pub front: T,
    #[serde(alias = "m")]
    pub middle: T,
    #[serde(alias = "b")]
    pub back: T,
}

impl<T: Copy> PerRow<T> {
    pub fn new(front: T, middle: T, back: T) -> Self {
        PerRow {
            front,
            middle,
            back,
        }
    }

    pub fn uniform(value: T) -> Self {
        PerRow::new(value, value, value)
    }

    pub fn get(&self, row: RowName) -> T {
        self[row]
    }
}

impl PerRow<u32> {
    pub fn total(&self) -> u32 {
        self.front.saturating_add(self.middle).saturating_add(self.back)
    }

    pub fn max(&self) -> u32 {
        self.front.max(self.middle).max(self.back)
    }
}

impl<T> Index<RowName> for PerRow<T> {
    type Output = T;

    fn index(&self, row: RowName) -> &T {
        match row {
            RowName::Front => &self.front,
            RowName::Middle => &self.middle,
            RowName::Back => &self.back,
        }
    }
}

impl<T> IndexMut<RowName> for PerRow<T> {
    fn index_mut(&mut self, row: RowName) -> &mut T {
        match row {
            RowName::Front => &mut self.front,
            RowName::Middle => &mut self.middle,
            RowName::Back => &mut self.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_id() {
        let hero = HeroId::new("hanzo");
        assert_eq!(hero.as_str(), "hanzo");
        assert_eq!(hero.to_string(), "hanzo");
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Ai.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Ai);
    }

    #[test]
    fn test_row_parse_and_order() {
        assert_eq!("Middle".parse::<RowName>().unwrap(), RowName::Middle);
        assert!("side".parse::<RowName>().is_err());
        assert!(RowName::Front < RowName::Back);
        assert_eq!(RowName::Back.ahead(), &[RowName::Front, RowName::Middle]);
    }

    #[test]
    fn test_per_row_short_keys() {
        let power: PerRow<u32> = serde_json::from_str(r#"{"f":5,"m":3,"b":1}"#).unwrap();
        assert_eq!(power.get(RowName::Front), 5);
        assert_eq!(power.total(), 9);
        assert_eq!(power.max(), 5);
    }
}
