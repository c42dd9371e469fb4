//! Pure damage math. Given the two sides and the rolls, produces an outcome
//! without touching state; the engine applies it and narrates.

use crate::battle::state::BattleSide;
use crate::battle::stats;
use crate::data::get_species_data;
use crate::errors::{GameError, GameResult};
use crate::errors::BattleStateError;
use crate::rng::GameRng;
use schema::MoveData;

pub const STAB_MULTIPLIER: f64 = 1.5;
pub const CRIT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: f32,
}

/// Computes one damaging hit. Draws the spread and crit rolls in that order.
///
/// The pipeline: level/stat base formula, then STAB, type effectiveness,
/// spread, and crit, with a single floor at the end. A connecting hit deals
/// at least 1 damage unless the defender is outright immune.
pub fn calculate_damage(
    attacker_side: &BattleSide,
    defender_side: &BattleSide,
    data: &MoveData,
    rng: &mut GameRng,
) -> GameResult<DamageOutcome> {
    let attacker = attacker_side
        .active()
        .ok_or(GameError::BattleState(BattleStateError::NoActiveObjectmon))?;
    let defender = defender_side
        .active()
        .ok_or(GameError::BattleState(BattleStateError::NoActiveObjectmon))?;

    let attacker_types = &get_species_data(attacker.species)?.types;
    let defender_types = &get_species_data(defender.species)?.types;
    let effectiveness = stats::type_effectiveness(data.move_type, defender_types);

    let attack = stats::effective_attack(attacker_side, data.category) as f64;
    let defense = stats::effective_defense(defender_side, data.category).max(1) as f64;
    let level = attacker.level as f64;
    let power = data.power as f64;

    let base = (((2.0 * level / 5.0 + 2.0) * attack * power / defense) / 50.0).floor() + 2.0;

    let mut modifier = 1.0;
    if attacker_types.contains(&data.move_type) {
        modifier *= STAB_MULTIPLIER;
    }
    modifier *= effectiveness as f64;
    modifier *= rng.spread("damage spread") as f64 / 100.0;
    let critical = rng.crit_roll("critical hit check") == 1;
    if critical {
        modifier *= CRIT_MULTIPLIER;
    }

    let raw = (base * modifier).floor();
    let damage = if effectiveness == 0.0 {
        0
    } else {
        (raw as u32).clamp(1, u16::MAX as u32) as u16
    };

    Ok(DamageOutcome {
        damage,
        critical,
        effectiveness,
    })
}
