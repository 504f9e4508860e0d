//! Closed card tag enumerations: kind, family, class and cost.
//!
//! Tags parse from both English and French names (case-insensitive, plural
//! accepted) because catalog descriptor text names classes in French, e.g.
//! "pour les Guerriers".

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top-level card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Creature,
    Weapon,
    Demon,
}

/// Family tag. `Weapon` and `Demon` are reserved for their card kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    Beast,
    Undead,
    Elemental,
    Dragon,
    Swarm,
    Weapon,
    Demon,
}

impl Family {
    pub const ALL: [Family; 7] = [
        Family::Beast,
        Family::Undead,
        Family::Elemental,
        Family::Dragon,
        Family::Swarm,
        Family::Weapon,
        Family::Demon,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Family::Beast => "Beast",
            Family::Undead => "Undead",
            Family::Elemental => "Elemental",
            Family::Dragon => "Dragon",
            Family::Swarm => "Swarm",
            Family::Weapon => "Weapon",
            Family::Demon => "Demon",
        }
    }
}

/// Class tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardClass {
    Warrior,
    Mage,
    Archer,
    Guardian,
    Berserker,
    /// Summon-by-count class: its creatures have no fixed cost.
    Invocation,
}

impl CardClass {
    pub const ALL: [CardClass; 6] = [
        CardClass::Warrior,
        CardClass::Mage,
        CardClass::Archer,
        CardClass::Guardian,
        CardClass::Berserker,
        CardClass::Invocation,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardClass::Warrior => "Warrior",
            CardClass::Mage => "Mage",
            CardClass::Archer => "Archer",
            CardClass::Guardian => "Guardian",
            CardClass::Berserker => "Berserker",
            CardClass::Invocation => "Invocation",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for CardClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase, strip French accents and a trailing plural "s"/"x".
fn normalize(raw: &str) -> String {
    let folded: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'É' | 'È' | 'Ê' => 'e',
            'â' | 'à' => 'a',
            'î' | 'ï' => 'i',
            'ô' => 'o',
            'û' | 'ù' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    match folded.strip_suffix('s').or_else(|| folded.strip_suffix('x')) {
        Some(stem) if stem.len() > 2 => stem.to_string(),
        _ => folded,
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family = match normalize(s).as_str() {
            "beast" | "bete" => Family::Beast,
            "undead" | "mort-vivant" | "morts-vivant" => Family::Undead,
            "elemental" | "elementaire" => Family::Elemental,
            "dragon" => Family::Dragon,
            "swarm" | "essaim" => Family::Swarm,
            "weapon" | "arme" => Family::Weapon,
            "demon" => Family::Demon,
            _ => return Err(s.to_string()),
        };
        Ok(family)
    }
}

impl FromStr for CardClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match normalize(s).as_str() {
            "warrior" | "guerrier" => CardClass::Warrior,
            "mage" => CardClass::Mage,
            "archer" => CardClass::Archer,
            "guardian" | "gardien" => CardClass::Guardian,
            "berserker" => CardClass::Berserker,
            "invocation" | "invocateur" => CardClass::Invocation,
            _ => return Err(s.to_string()),
        };
        Ok(class)
    }
}

/// Purchase cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cost {
    /// Fixed price (1-5 for creatures).
    Fixed(u8),
    /// "X": priced at the market's current cost tier.
    Variable,
}

impl Cost {
    /// Price when bought while the market is at `cost_tier`.
    #[must_use]
    pub fn resolve(self, cost_tier: u8) -> u32 {
        match self {
            Cost::Fixed(n) => u32::from(n),
            Cost::Variable => u32::from(cost_tier),
        }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cost::Fixed(n) => write!(f, "{n}"),
            Cost::Variable => f.write_str("X"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_french_plural() {
        assert_eq!("Guerriers".parse::<CardClass>(), Ok(CardClass::Warrior));
        assert_eq!("gardiens".parse::<CardClass>(), Ok(CardClass::Guardian));
        assert_eq!("Archers".parse::<CardClass>(), Ok(CardClass::Archer));
        assert_eq!("Mages".parse::<CardClass>(), Ok(CardClass::Mage));
        assert_eq!("Invocations".parse::<CardClass>(), Ok(CardClass::Invocation));
        assert!("Paladin".parse::<CardClass>().is_err());
    }

    #[test]
    fn test_family_from_either_language() {
        assert_eq!("Bête".parse::<Family>(), Ok(Family::Beast));
        assert_eq!("Élémentaire".parse::<Family>(), Ok(Family::Elemental));
        assert_eq!("Swarm".parse::<Family>(), Ok(Family::Swarm));
        assert_eq!("Démon".parse::<Family>(), Ok(Family::Demon));
        assert_eq!("Dragons".parse::<Family>(), Ok(Family::Dragon));
    }

    #[test]
    fn test_cost_resolution() {
        assert_eq!(Cost::Fixed(3).resolve(5), 3);
        assert_eq!(Cost::Variable.resolve(4), 4);
        assert_eq!(Cost::Variable.to_string(), "X");
    }
}
