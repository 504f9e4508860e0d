//! Raw card descriptors as a catalog collaborator supplies them.
//!
//! A `CardBlueprint` carries tags as names and abilities as text. Converting
//! it into a `CardDefinition` resolves the tags and parses every ability once;
//! nothing downstream ever sees the text again except as a dedupe key.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use super::tags::{CardClass, CardKind, Cost, Family};
use crate::core::error::{CatalogError, ParseError};
use crate::effects::{parse_ability, parse_bonus, parse_tier, AbilitySet, BonusEffect};

fn first_tier() -> u8 {
    1
}

/// Scaling ability text unlocked at a tag count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierText {
    pub threshold: u32,
    pub effect: String,
}

/// Serializable card description with unparsed abilities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBlueprint {
    pub name: String,
    pub kind: CardKind,
    /// Absent for "X" cost.
    #[serde(default)]
    pub cost: Option<u8>,
    #[serde(default = "first_tier")]
    pub tier: u8,
    pub family: String,
    #[serde(default)]
    pub class: Option<String>,
    pub attack: i32,
    pub health: i32,
    #[serde(default)]
    pub imblocable: i32,
    #[serde(default)]
    pub family_tiers: Vec<TierText>,
    #[serde(default)]
    pub class_tiers: Vec<TierText>,
    #[serde(default)]
    pub conditional: Vec<String>,
    #[serde(default)]
    pub passive: Vec<String>,
    #[serde(default)]
    pub bonus: Option<String>,
}

impl CardBlueprint {
    fn new(name: &str, kind: CardKind, family: Family, attack: i32, health: i32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            cost: None,
            tier: 1,
            family: family.name().to_string(),
            class: None,
            attack,
            health,
            imblocable: 0,
            family_tiers: Vec::new(),
            class_tiers: Vec::new(),
            conditional: Vec::new(),
            passive: Vec::new(),
            bonus: None,
        }
    }

    #[must_use]
    pub fn creature(name: &str, cost: u8, family: Family, class: CardClass, attack: i32, health: i32) -> Self {
        Self {
            cost: Some(cost),
            class: Some(class.name().to_string()),
            ..Self::new(name, CardKind::Creature, family, attack, health)
        }
    }

    #[must_use]
    pub fn invocation(name: &str, family: Family, attack: i32, health: i32) -> Self {
        Self {
            class: Some(CardClass::Invocation.name().to_string()),
            ..Self::new(name, CardKind::Creature, family, attack, health)
        }
    }

    #[must_use]
    pub fn weapon(name: &str, attack: i32, health: i32) -> Self {
        Self::new(name, CardKind::Weapon, Family::Weapon, attack, health)
    }

    #[must_use]
    pub fn demon(name: &str, class: CardClass, attack: i32, health: i32) -> Self {
        Self {
            class: Some(class.name().to_string()),
            ..Self::new(name, CardKind::Demon, Family::Demon, attack, health)
        }
    }

    #[must_use]
    pub fn tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub fn imblocable(mut self, amount: i32) -> Self {
        self.imblocable = amount;
        self
    }

    #[must_use]
    pub fn family_tier(mut self, threshold: u32, effect: &str) -> Self {
        self.family_tiers.push(TierText {
            threshold,
            effect: effect.to_string(),
        });
        self
    }

    #[must_use]
    pub fn class_tier(mut self, threshold: u32, effect: &str) -> Self {
        self.class_tiers.push(TierText {
            threshold,
            effect: effect.to_string(),
        });
        self
    }

    #[must_use]
    pub fn conditional(mut self, effect: &str) -> Self {
        self.conditional.push(effect.to_string());
        self
    }

    #[must_use]
    pub fn passive(mut self, effect: &str) -> Self {
        self.passive.push(effect.to_string());
        self
    }

    #[must_use]
    pub fn bonus(mut self, text: &str) -> Self {
        self.bonus = Some(text.to_string());
        self
    }

    /// Resolve tags and parse abilities.
    ///
    /// The returned definition has a placeholder id until registered.
    pub fn into_definition(self) -> Result<CardDefinition, CatalogError> {
        let name = self.name;
        let ability_err = |source: ParseError| CatalogError::Ability {
            name: name.clone(),
            source,
        };

        let family: Family = self.family.parse().map_err(|value| CatalogError::UnknownTag {
            name: name.clone(),
            field: "family",
            value,
        })?;
        let class = self
            .class
            .map(|raw| raw.parse::<CardClass>())
            .transpose()
            .map_err(|value| CatalogError::UnknownTag {
                name: name.clone(),
                field: "class",
                value,
            })?;

        let mut abilities = AbilitySet::default();
        for tier in &self.family_tiers {
            abilities.family.push(parse_tier(tier.threshold, &tier.effect).map_err(ability_err)?);
        }
        for tier in &self.class_tiers {
            abilities.class.push(parse_tier(tier.threshold, &tier.effect).map_err(ability_err)?);
        }
        for text in &self.conditional {
            abilities.conditional.push(parse_ability(text).map_err(ability_err)?);
        }
        for text in &self.passive {
            abilities.passive.push(parse_ability(text).map_err(ability_err)?);
        }

        let mut per_turn_self_damage = 0;
        if let Some(text) = &self.bonus {
            match parse_bonus(text) {
                BonusEffect::PerTurnSelfDamage(amount) => per_turn_self_damage = amount,
                BonusEffect::Passive(ability) => abilities.passive.push(ability),
                BonusEffect::Text => {}
            }
        }

        Ok(CardDefinition {
            id: CardId::default(),
            name,
            kind: self.kind,
            cost: self.cost.map_or(Cost::Variable, Cost::Fixed),
            tier: self.tier,
            family,
            class,
            attack: self.attack,
            health: self.health,
            imblocable: self.imblocable,
            abilities,
            bonus_text: self.bonus,
            per_turn_self_damage,
        })
    }
}
