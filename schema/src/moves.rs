use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed catalog of known moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub enum Move {
    Toast,
    HeatUp,
    CrumbShot,
    Splash,
    Steep,
    SteamBurst,
    Flash,
    Ember,
    LightBeam,
}

impl Move {
    pub const ALL: [Move; 9] = [
        Move::Toast,
        Move::HeatUp,
        Move::CrumbShot,
        Move::Splash,
        Move::Steep,
        Move::SteamBurst,
        Move::Flash,
        Move::Ember,
        Move::LightBeam,
    ];

    pub fn id(&self) -> u16 {
        match self {
            Move::Toast => 1,
            Move::HeatUp => 2,
            Move::CrumbShot => 3,
            Move::Splash => 4,
            Move::Steep => 5,
            Move::SteamBurst => 6,
            Move::Flash => 7,
            Move::Ember => 8,
            Move::LightBeam => 9,
        }
    }

    pub fn from_id(id: u16) -> Option<Move> {
        Self::ALL.iter().copied().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Move::Toast => "Toast",
            Move::HeatUp => "Heat Up",
            Move::CrumbShot => "Crumb Shot",
            Move::Splash => "Splash",
            Move::Steep => "Steep",
            Move::SteamBurst => "Steam Burst",
            Move::Flash => "Flash",
            Move::Ember => "Ember",
            Move::LightBeam => "Light Beam",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
