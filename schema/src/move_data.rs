use crate::objectmon_types::ObjectmonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Target shape declared by the move itself. Only `Single` and `User` are
/// exercised by the 1v1 battle format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    Single,
    User,
    All,
    Ally,
}

/// Who a secondary effect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    User,
    Opponent,
    All,
}

/// A stat in the canonical HP/ATK/DEF/SPATK/SPDEF/SPD order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    SpAtk,
    SpDef,
    Spd,
}

impl Stat {
    /// Index into a `[_; 6]` stat block.
    pub fn index(&self) -> usize {
        match self {
            Stat::Hp => 0,
            Stat::Atk => 1,
            Stat::Def => 2,
            Stat::SpAtk => 3,
            Stat::SpDef => 4,
            Stat::Spd => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::SpAtk => "Sp. Atk",
            Stat::SpDef => "Sp. Def",
            Stat::Spd => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Non-volatile status a creature can carry. Only one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum StatusCondition {
    Burn,
    Freeze,
    Paralyze,
    Poison,
    Sleep,
    Rust,
    ShortCircuit,
}

impl StatusCondition {
    pub fn applied_text(&self) -> &'static str {
        match self {
            StatusCondition::Burn => "was burned!",
            StatusCondition::Freeze => "was frozen solid!",
            StatusCondition::Paralyze => "is paralyzed!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::Sleep => "fell asleep!",
            StatusCondition::Rust => "started rusting!",
            StatusCondition::ShortCircuit => "short-circuited!",
        }
    }
}

/// Secondary effect carried by a move. A closed set: resolution matches
/// exhaustively on these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    /// Flat bonus damage on top of the main damage roll.
    Damage {
        amount: u16,
        chance: u8,
        target: EffectTarget,
    },
    /// Apply a status condition; refused if the target already has one.
    InflictStatus {
        status: StatusCondition,
        chance: u8,
        target: EffectTarget,
    },
    /// Shift a stat stage by `stages` (clamped to -6..=6 on application).
    StatChange {
        stat: Stat,
        stages: i8,
        chance: u8,
        target: EffectTarget,
    },
    /// Restore `percent` of the target's max HP.
    Heal {
        percent: u8,
        chance: u8,
        target: EffectTarget,
    },
}

impl MoveEffect {
    pub fn chance(&self) -> u8 {
        match self {
            MoveEffect::Damage { chance, .. }
            | MoveEffect::InflictStatus { chance, .. }
            | MoveEffect::StatChange { chance, .. }
            | MoveEffect::Heal { chance, .. } => *chance,
        }
    }

    pub fn target(&self) -> EffectTarget {
        match self {
            MoveEffect::Damage { target, .. }
            | MoveEffect::InflictStatus { target, .. }
            | MoveEffect::StatChange { target, .. }
            | MoveEffect::Heal { target, .. } => *target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: ObjectmonType,
    pub category: MoveCategory,
    /// Base power; 0 for pure-status moves.
    pub power: u16,
    /// Accuracy percentage, 0-100.
    pub accuracy: u8,
    pub max_pp: u8,
    pub effect: Option<MoveEffect>,
    /// Higher tiers act first, before speed is consulted.
    pub priority: i8,
    pub target: MoveTarget,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status)
    }
}
