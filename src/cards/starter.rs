//! Built-in card pool.
//!
//! Covers every cost from 1 to 5, every creature family and class, a few
//! tier-2 evolutions, weapons and demons. Used by tests, benches and
//! balance runs that do not bring their own catalog.

use super::blueprint::CardBlueprint;
use super::registry::CardRegistry;
use super::tags::{CardClass, Family};
use crate::core::error::CatalogError;

/// Raw blueprints of the starter pool.
#[must_use]
pub fn starter_blueprints() -> Vec<CardBlueprint> {
    use CardClass::*;
    use Family::*;

    vec![
        // Cost 1
        CardBlueprint::creature("Loup", 1, Beast, Warrior, 3, 2)
            .family_tier(2, "+1 ATQ pour les Guerriers")
            .family_tier(4, "+3 ATQ pour les Guerriers"),
        CardBlueprint::creature("Squelette", 1, Undead, Guardian, 1, 4)
            .class_tier(2, "+2 PV pour tous les monstres"),
        CardBlueprint::creature("Fourmi", 1, Swarm, Archer, 1, 1)
            .family_tier(3, "+1 ATQ pour tous les monstres"),
        CardBlueprint::invocation("Nuée", Swarm, 2, 2)
            .class_tier(3, "+2 ATQ pour les Invocations"),
        // Cost 2
        CardBlueprint::creature("Étincelle", 2, Elemental, Mage, 2, 2)
            .imblocable(1)
            .class_tier(2, "2 dgt imblocables")
            .class_tier(3, "4 dgt imblocables"),
        CardBlueprint::creature("Ours", 2, Beast, Guardian, 2, 5),
        CardBlueprint::creature("Goule", 2, Undead, Berserker, 5, 2)
            .class_tier(1, "+3 ATQ et -2 PV"),
        // Cost 3
        CardBlueprint::creature("Archer Spectral", 3, Undead, Archer, 4, 3)
            .class_tier(2, "+2 dgt pour les Archers"),
        CardBlueprint::creature("Golem", 3, Elemental, Guardian, 2, 8)
            .conditional("si plateau >= 5 : +6 PV"),
        // Cost 4
        CardBlueprint::creature("Dragonnet", 4, Dragon, Mage, 5, 5)
            .family_tier(2, "+4 ATQ")
            .conditional("si PV <= 200 : +5 ATQ"),
        CardBlueprint::creature("Essaim Vorace", 4, Swarm, Berserker, 6, 3).bonus("-5 PV par tour"),
        // Cost 5
        CardBlueprint::creature("Wyrm Ancien", 5, Dragon, Warrior, 9, 8)
            .conditional("si plateau >= 5 : +10 PV"),
        CardBlueprint::creature("Titan de Pierre", 5, Elemental, Warrior, 7, 12)
            .bonus("+2 ATQ pour les Guerriers"),
        // Evolutions
        CardBlueprint::creature("Loup", 1, Beast, Warrior, 7, 5)
            .tier(2)
            .family_tier(2, "+2 ATQ pour les Guerriers")
            .family_tier(4, "+5 ATQ pour les Guerriers"),
        CardBlueprint::creature("Squelette", 1, Undead, Guardian, 3, 9)
            .tier(2)
            .class_tier(2, "+4 PV pour tous les monstres"),
        CardBlueprint::creature("Fourmi", 1, Swarm, Archer, 3, 3)
            .tier(2)
            .family_tier(3, "+2 ATQ pour tous les monstres"),
        CardBlueprint::creature("Étincelle", 2, Elemental, Mage, 5, 4)
            .tier(2)
            .imblocable(2)
            .class_tier(2, "4 dgt imblocables")
            .class_tier(3, "7 dgt imblocables"),
        CardBlueprint::creature("Goule", 2, Undead, Berserker, 10, 4)
            .tier(2)
            .class_tier(1, "+6 ATQ et -3 PV"),
        CardBlueprint::creature("Dragonnet", 4, Dragon, Mage, 11, 10)
            .tier(2)
            .family_tier(2, "+8 ATQ")
            .conditional("si PV <= 200 : +10 ATQ"),
        // Weapons
        CardBlueprint::weapon("Épée Runique", 4, 0),
        CardBlueprint::weapon("Bouclier de Chêne", 0, 6),
        CardBlueprint::weapon("Arc Long", 2, 0).imblocable(2),
        // Demons
        CardBlueprint::demon("Diablotin", Berserker, 8, 4).bonus("-3 PV par tour"),
        CardBlueprint::demon("Seigneur Démon", Mage, 14, 10)
            .imblocable(2)
            .bonus("Le porteur perd 6 PV par tour"),
    ]
}

/// The starter pool, loaded and validated.
pub fn starter_registry() -> Result<CardRegistry, CatalogError> {
    CardRegistry::load(starter_blueprints())
}
