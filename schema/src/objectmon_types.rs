use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ObjectmonType {
    Metal,
    Electric,
    Ceramic,
    Liquid,
    Plastic,
    Glass,
    Fabric,
    Wood,
    Fire,
    Water,
    Ground,
    Air,
}

impl fmt::Display for ObjectmonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ObjectmonType {
    /// Calculate type effectiveness multiplier for attacking type vs defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect.
    ///
    /// The match is total: every (attacking, defending) pair resolves, and any
    /// pair without a dedicated arm is neutral by construction.
    pub fn effectiveness(attacking: ObjectmonType, defending: ObjectmonType) -> f32 {
        use ObjectmonType::*;

        match (attacking, defending) {
            // Metal
            (Metal, Liquid) | (Metal, Fire) | (Metal, Glass) => 2.0,
            (Metal, Ceramic) | (Metal, Electric) | (Metal, Metal) => 0.5,
            (Metal, _) => 1.0,

            // Electric
            (Electric, Liquid) | (Electric, Metal) | (Electric, Water) | (Electric, Air) => 2.0,
            (Electric, Ceramic) | (Electric, Plastic) | (Electric, Electric) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, _) => 1.0,

            // Fire
            (Fire, Fabric) | (Fire, Wood) | (Fire, Plastic) => 2.0,
            (Fire, Metal) | (Fire, Ceramic) | (Fire, Water) | (Fire, Liquid) | (Fire, Fire) => 0.5,
            (Fire, _) => 1.0,

            // Water
            (Water, Fire) | (Water, Ground) => 2.0,
            (Water, Electric) | (Water, Liquid) | (Water, Water) => 0.5,
            (Water, _) => 1.0,

            // The household types have no exploitable matchups of their own.
            (Ceramic, _) | (Liquid, _) | (Plastic, _) | (Glass, _) | (Fabric, _) | (Wood, _)
            | (Ground, _) | (Air, _) => 1.0,
        }
    }

    pub fn is_immune(attacking: ObjectmonType, defending: ObjectmonType) -> bool {
        Self::effectiveness(attacking, defending) == 0.0
    }
}
