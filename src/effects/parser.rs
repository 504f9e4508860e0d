//! Ability descriptor parsing.
//!
//! Descriptors are short French phrases printed on cards. The grammar is
//! matched case-insensitively:
//!
//! ```text
//! ability   := condition? clause (sep clause)* target? "."?
//! condition := "si" ("plateau" ">=" N | "pv" "<=" N) ":"
//! clause    := "+"? N "dgt" "imblocable(s)"
//!            | ("+" | "-") N ("atq" | "dgt" | "pv")
//! sep       := "," | "et"
//! target    := "pour tous les monstres" | "pour les" CLASS
//! ```
//!
//! ```
//! use arena_sim::effects::{parse_ability, Effect, EffectTarget};
//! use arena_sim::cards::CardClass;
//!
//! let ability = parse_ability("+3 ATQ pour les Guerriers").unwrap();
//! assert_eq!(ability.effects[0], Effect::AttackBonus(3));
//! assert_eq!(ability.target, EffectTarget::Class(CardClass::Warrior));
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, map_opt, map_res, opt, value},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use smallvec::SmallVec;

use super::effect::{Ability, Effect, EffectTarget, ScalingTier, Trigger};
use crate::cards::CardClass;
use crate::core::error::ParseError;

type Res<'a, T> = IResult<&'a str, T>;

#[derive(Clone, Copy)]
enum Subject {
    Board,
    Health,
}

#[derive(Clone, Copy)]
enum Comparison {
    AtLeast,
    AtMost,
}

fn number(input: &str) -> Res<'_, i32> {
    map_res(digit1, |digits: &str| digits.parse::<i32>())(input)
}

fn imblocable(input: &str) -> Res<'_, Effect> {
    map(
        tuple((
            opt(char('+')),
            number,
            multispace1,
            tag("dgt"),
            multispace1,
            tag("imblocable"),
            opt(char('s')),
        )),
        |(_, amount, ..)| Effect::Imblocable(amount),
    )(input)
}

fn stat(input: &str) -> Res<'_, Effect> {
    let (input, sign) = alt((value(1, char('+')), value(-1, char('-'))))(input)?;
    let (input, amount) = number(input)?;
    let (input, _) = multispace0(input)?;
    let (input, unit) = alt((tag("atq"), tag("dgt"), tag("pv")))(input)?;

    let effect = match unit {
        "pv" if sign < 0 => Effect::SelfDamage(amount),
        "pv" => Effect::HealthBonus(amount),
        _ => Effect::AttackBonus(sign * amount),
    };
    Ok((input, effect))
}

fn clause(input: &str) -> Res<'_, Effect> {
    alt((imblocable, stat))(input)
}

fn separator(input: &str) -> Res<'_, &str> {
    delimited(multispace0, alt((tag(","), tag("et"))), multispace0)(input)
}

fn class_name(input: &str) -> Res<'_, CardClass> {
    map_res(
        take_while1(|c: char| c.is_alphabetic() || c == '-'),
        |word: &str| word.parse::<CardClass>(),
    )(input)
}

fn target(input: &str) -> Res<'_, EffectTarget> {
    preceded(
        multispace1,
        alt((
            value(EffectTarget::AllMonsters, tag("pour tous les monstres")),
            map(
                preceded(pair(tag("pour les"), multispace1), class_name),
                EffectTarget::Class,
            ),
        )),
    )(input)
}

fn condition(input: &str) -> Res<'_, Trigger> {
    let subject = alt((
        value(Subject::Board, tag("plateau")),
        value(Subject::Health, tag("pv")),
    ));
    let comparison = alt((
        value(Comparison::AtLeast, alt((tag(">="), tag("≥")))),
        value(Comparison::AtMost, alt((tag("<="), tag("≤")))),
    ));

    map_opt(
        tuple((
            tag("si"),
            multispace1,
            subject,
            multispace0,
            comparison,
            multispace0,
            number,
            multispace0,
            char(':'),
            multispace0,
        )),
        |(_, _, subject, _, comparison, _, n, ..)| match (subject, comparison) {
            (Subject::Board, Comparison::AtLeast) => u32::try_from(n).ok().map(Trigger::BoardAtLeast),
            (Subject::Health, Comparison::AtMost) => Some(Trigger::HealthAtMost(n)),
            _ => None,
        },
    )(input)
}

type Body = (Option<Trigger>, Vec<Effect>, Option<EffectTarget>);

fn body(input: &str) -> Res<'_, Body> {
    terminated(
        tuple((opt(condition), separated_list1(separator, clause), opt(target))),
        pair(multispace0, opt(char('.'))),
    )(input)
}

/// Parse one ability descriptor.
pub fn parse_ability(text: &str) -> Result<Ability, ParseError> {
    let lowered = text.trim().to_lowercase();

    let (trigger, effects, target) = match all_consuming(body)(&lowered) {
        Ok((_, parsed)) => parsed,
        Err(err) => return Err(ParseError::new(text, err.to_string())),
    };

    let effects: SmallVec<[Effect; 2]> = match trigger {
        Some(trigger) => effects
            .into_iter()
            .map(|effect| Effect::Conditional {
                trigger,
                effect: Box::new(effect),
            })
            .collect(),
        None => SmallVec::from_vec(effects),
    };

    Ok(Ability {
        effects,
        target: target.unwrap_or_default(),
        source: text.trim().to_string(),
    })
}

/// Parse a scaling tier descriptor.
pub fn parse_tier(threshold: u32, text: &str) -> Result<ScalingTier, ParseError> {
    if threshold == 0 {
        return Err(ParseError::new(text, "threshold must be at least 1"));
    }
    Ok(ScalingTier {
        threshold,
        ability: parse_ability(text)?,
    })
}

fn per_turn(input: &str) -> Res<'_, i32> {
    terminated(
        alt((
            preceded(char('-'), number),
            preceded(pair(tag("perd"), multispace1), number),
        )),
        tuple((multispace0, tag("pv"), multispace1, tag("par tour"))),
    )(input)
}

/// Health lost every turn, from phrases like "-5 PV par tour" or
/// "perd 5 PV par tour" anywhere in the text.
#[must_use]
pub fn parse_per_turn_self_damage(text: &str) -> Option<i32> {
    let lowered = text.to_lowercase();
    if !lowered.contains("par tour") {
        return None;
    }
    lowered
        .char_indices()
        .find_map(|(at, _)| per_turn(&lowered[at..]).ok().map(|(_, amount)| amount))
}

/// How a card's free-text bonus contributes to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BonusEffect {
    /// Health lost by the owner at every END phase.
    PerTurnSelfDamage(i32),
    /// A regular ability, applied like a passive.
    Passive(Ability),
    /// Flavor only.
    Text,
}

/// Classify a bonus text. Per-turn self-damage takes precedence, so a text
/// never contributes both per-turn and combat self-damage.
#[must_use]
pub fn parse_bonus(text: &str) -> BonusEffect {
    if let Some(amount) = parse_per_turn_self_damage(text) {
        return BonusEffect::PerTurnSelfDamage(amount);
    }
    match parse_ability(text) {
        Ok(ability) => BonusEffect::Passive(ability),
        Err(_) => BonusEffect::Text,
    }
}
