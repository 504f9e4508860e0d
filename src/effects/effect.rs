//! Structured ability effects.
//!
//! Card ability text is parsed once, when the catalog is loaded, into the
//! small closed set of variants below. Resolution only ever walks these
//! values; it never looks at text again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardClass;

/// An atomic stat effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Extra attack ("+N ATQ", "+N dgt").
    AttackBonus(i32),
    /// Extra health ("+N PV").
    HealthBonus(i32),
    /// Health lost by the owner during combat ("-N PV").
    SelfDamage(i32),
    /// Extra imblocable damage ("N dgt imblocable").
    Imblocable(i32),
    /// Effect applied only while the trigger holds.
    Conditional { trigger: Trigger, effect: Box<Effect> },
}

/// Board or player condition gating a conditional effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// At least N cards on the owner's board.
    BoardAtLeast(u32),
    /// Owner's health at or below N.
    HealthAtMost(i32),
}

/// Facts a trigger is checked against.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriggerContext {
    pub board_size: u32,
    pub health: i32,
}

impl Trigger {
    #[must_use]
    pub fn holds(self, ctx: &TriggerContext) -> bool {
        match self {
            Trigger::BoardAtLeast(n) => ctx.board_size >= n,
            Trigger::HealthAtMost(n) => ctx.health <= n,
        }
    }
}

/// Who an ability's effects are counted for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// Applies once.
    #[default]
    SelfOnly,
    /// Applies once per board card of the class ("pour les X").
    Class(CardClass),
    /// Applies once per board card ("pour tous les monstres").
    AllMonsters,
}

/// Bonuses accumulated over a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    pub attack: i32,
    pub health: i32,
    pub self_damage: i32,
    pub imblocable: i32,
    pub per_turn_self_damage: i32,
}

impl Effect {
    /// Add this effect, scaled by `multiplier`, into `bonus`.
    pub fn apply(&self, multiplier: i32, ctx: &TriggerContext, bonus: &mut AbilityBonus) {
        match self {
            Effect::AttackBonus(n) => bonus.attack += n * multiplier,
            Effect::HealthBonus(n) => bonus.health += n * multiplier,
            Effect::SelfDamage(n) => bonus.self_damage += n * multiplier,
            Effect::Imblocable(n) => bonus.imblocable += n * multiplier,
            Effect::Conditional { trigger, effect } => {
                if trigger.holds(ctx) {
                    effect.apply(multiplier, ctx, bonus);
                }
            }
        }
    }
}

/// One parsed descriptor: its effects, their target and the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub effects: SmallVec<[Effect; 2]>,
    pub target: EffectTarget,
    /// Original descriptor text; part of the dedupe key.
    pub source: String,
}

impl Ability {
    /// Accumulate every effect with the given multiplier.
    pub fn apply(&self, multiplier: i32, ctx: &TriggerContext, bonus: &mut AbilityBonus) {
        for effect in &self.effects {
            effect.apply(multiplier, ctx, bonus);
        }
    }
}

/// A scaling ability unlocked once the tag count reaches `threshold`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingTier {
    pub threshold: u32,
    pub ability: Ability,
}

/// All abilities of a card definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    /// Scale with the number of board cards sharing the card's family.
    pub family: Vec<ScalingTier>,
    /// Scale with the number of board cards sharing the card's class.
    pub class: Vec<ScalingTier>,
    /// Applied while their trigger holds.
    pub conditional: Vec<Ability>,
    /// Applied once per copy on the board.
    pub passive: Vec<Ability>,
}

impl AbilitySet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.class.is_empty()
            && self.conditional.is_empty()
            && self.passive.is_empty()
    }
}

/// The single strongest tier whose threshold `count` meets.
///
/// Tiers are not cumulative: with thresholds 2 and 4 and a count of 5, only
/// the threshold-4 tier applies.
#[must_use]
pub fn highest_met(tiers: &[ScalingTier], count: u32) -> Option<&ScalingTier> {
    tiers
        .iter()
        .filter(|tier| tier.threshold <= count)
        .max_by_key(|tier| tier.threshold)
}
