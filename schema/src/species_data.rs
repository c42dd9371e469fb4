use crate::{Move, ObjectmonType, Species};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub sp_atk: u8,
    pub sp_def: u8,
    pub spd: u8,
}

impl BaseStats {
    /// Canonical HP/ATK/DEF/SPATK/SPDEF/SPD ordering.
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.atk,
            self.def,
            self.sp_atk,
            self.sp_def,
            self.spd,
        ]
    }
}

/// Population gender policy for a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderRatio {
    MaleOnly,
    FemaleOnly,
    /// 50% male, 50% female.
    Male50,
    /// 75% male, 25% female.
    Male75,
    Genderless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    Level(u8),
    Item(u16),
    Trade,
    Fusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionData {
    pub method: EvolutionMethod,
    pub evolves_into: Species,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub dex_number: u16,
    pub name: String,
    /// Category label shown in the objectdex ("Appliance", "Utensil", ...).
    pub kind: String,
    /// One or two elemental types.
    pub types: Vec<ObjectmonType>,
    pub base_stats: BaseStats,
    pub abilities: Vec<String>,
    /// Minimum level -> move learned at that level.
    pub learnset: HashMap<u8, Move>,
    pub evolution: Option<EvolutionData>,
    pub catch_rate: u8,
    pub base_exp: u16,
    pub gender_ratio: GenderRatio,
}

impl SpeciesData {
    pub fn has_type(&self, type_: ObjectmonType) -> bool {
        self.types.contains(&type_)
    }

    /// Moves learnable at or below `level`, ordered by level requirement.
    pub fn moves_known_at(&self, level: u8) -> Vec<Move> {
        let mut entries: Vec<(u8, Move)> = self
            .learnset
            .iter()
            .filter(|(req, _)| **req <= level)
            .map(|(req, move_)| (*req, *move_))
            .collect();
        entries.sort_by_key(|(req, _)| *req);
        entries.into_iter().map(|(_, move_)| move_).collect()
    }
}
