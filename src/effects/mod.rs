//! Ability system: structured effects, descriptor parsing, resolution.
//!
//! - `Effect`, `Ability`, `AbilitySet`: closed set of stat effects with a
//!   target qualifier, attached to card definitions
//! - `parser`: turns descriptor text into abilities at catalog load
//! - `AbilityResolver`: derives a player's bonuses from board composition

mod effect;
pub mod parser;
mod resolver;

pub use effect::{
    highest_met, Ability, AbilityBonus, AbilitySet, Effect, EffectTarget, ScalingTier, Trigger,
    TriggerContext,
};
pub use parser::{parse_ability, parse_bonus, parse_per_turn_self_damage, parse_tier, BonusEffect};
pub use resolver::{AbilityResolver, BoardCounts, BoardTotals};
