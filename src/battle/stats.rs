//! Effective in-battle stat math: stage multipliers and type matchups.

use crate::battle::state::BattleSide;
use schema::{MoveCategory, MoveData, ObjectmonType, Stat};

/// Stage multiplier table: +n is (2+n)/2, -n is 2/(2+n).
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-6, 6);
    if stage >= 0 {
        (2 + stage as i32) as f64 / 2.0
    } else {
        2.0 / (2 - stage as i32) as f64
    }
}

fn effective_stat(side: &BattleSide, stat: Stat) -> u16 {
    let base = side.active().map_or(0, |inst| inst.stat(stat));
    let scaled = (base as f64 * stage_multiplier(side.stat_stage(stat))).floor();
    (scaled as u32).min(u16::MAX as u32) as u16
}

/// Attacking stat for a move: ATK for physical, SPATK for special.
pub fn effective_attack(side: &BattleSide, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => effective_stat(side, Stat::Atk),
        MoveCategory::Special => effective_stat(side, Stat::SpAtk),
        MoveCategory::Status => 0,
    }
}

pub fn effective_defense(side: &BattleSide, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => effective_stat(side, Stat::Def),
        MoveCategory::Special => effective_stat(side, Stat::SpDef),
        MoveCategory::Status => 0,
    }
}

pub fn effective_speed(side: &BattleSide) -> u16 {
    effective_stat(side, Stat::Spd)
}

/// Combined matchup multiplier against every type the defender carries.
pub fn type_effectiveness(attacking: ObjectmonType, defender_types: &[ObjectmonType]) -> f32 {
    defender_types
        .iter()
        .map(|defending| ObjectmonType::effectiveness(attacking, *defending))
        .product()
}

/// Single accuracy roll against the move's accuracy percentage.
pub fn move_hits(data: &MoveData, roll: u8) -> bool {
    roll <= data.accuracy
}
