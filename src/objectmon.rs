use crate::data::{get_move_max_pp, get_species_data};
use crate::errors::{SpeciesDataError, SpeciesDataResult};
use crate::rng::GameRng;
use schema::{GenderRatio, Move, Species, SpeciesData, Stat};
use schema::StatusCondition;
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    None,
}

/// The trainer a creature was first minted for. Creatures minted outside a
/// session (tests, tools) get the placeholder until a session stamps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRecord {
    pub trainer_name: String,
    pub trainer_id: u16,
}

impl Default for OriginRecord {
    fn default() -> Self {
        OriginRecord {
            trainer_name: "Unknown".to_string(),
            trainer_id: 0,
        }
    }
}

/// A learned move with its remaining PP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
}

impl MoveInstance {
    pub fn new(move_: Move) -> Self {
        MoveInstance {
            move_,
            pp: get_move_max_pp(move_),
        }
    }

    pub fn max_pp(&self) -> u8 {
        get_move_max_pp(self.move_)
    }

    /// Spends one PP. Returns false (and spends nothing) if the tank is dry.
    pub fn use_move(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.max_pp();
    }
}

/// A concrete creature instance, as opposed to the static [`SpeciesData`]
/// it was minted from. Everything mutable in battle lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectmonInst {
    pub species: Species,
    pub nickname: String,
    pub level: u8,
    pub gender: Gender,
    pub ability: String,
    pub is_shiny: bool,
    pub exp: u32,
    /// HP/ATK/DEF/SPATK/SPDEF/SPD, each 0..=31. Fixed at creation.
    pub ivs: [u8; 6],
    pub evs: [u16; 6],
    /// Computed stats in the same ordering. Slot 0 is max HP.
    pub stats: [u16; 6],
    curr_hp: u16,
    pub moves: [Option<MoveInstance>; MAX_MOVES],
    pub status: Option<StatusCondition>,
    /// Species ids of fusion contributors; empty outside the fusion lab.
    pub fusion_lineage: Vec<u16>,
    pub origin: OriginRecord,
}

impl ObjectmonInst {
    /// Mints a creature from catalog data. IVs and the moveset can be pinned
    /// for tests; when absent, IVs are rolled (six draws, HP first) and the
    /// moveset is the last four learnset entries at or below `level`.
    pub fn new(
        species: Species,
        data: &SpeciesData,
        level: u8,
        ivs: Option<[u8; 6]>,
        moves: Option<Vec<Move>>,
        nickname: Option<String>,
        rng: &mut GameRng,
    ) -> Self {
        let ivs = ivs.unwrap_or_else(|| {
            let mut rolled = [0u8; 6];
            for slot in rolled.iter_mut() {
                *slot = rng.iv("iv roll");
            }
            rolled
        });
        let evs = [0u16; 6];
        let stats = calculate_stats(&data.base_stats.as_array(), level, &ivs, &evs);

        let learned = moves.unwrap_or_else(|| data.moves_known_at(level));
        let mut move_slots: [Option<MoveInstance>; MAX_MOVES] = [const { None }; MAX_MOVES];
        let window = learned.len().saturating_sub(MAX_MOVES);
        for (slot, move_) in move_slots.iter_mut().zip(learned[window..].iter()) {
            *slot = Some(MoveInstance::new(*move_));
        }

        let gender = match data.gender_ratio {
            GenderRatio::MaleOnly => Gender::Male,
            GenderRatio::FemaleOnly => Gender::Female,
            GenderRatio::Genderless => Gender::None,
            GenderRatio::Male50 => {
                if rng.percent("gender roll") <= 50 {
                    Gender::Male
                } else {
                    Gender::Female
                }
            }
            GenderRatio::Male75 => {
                if rng.percent("gender roll") <= 75 {
                    Gender::Male
                } else {
                    Gender::Female
                }
            }
        };

        ObjectmonInst {
            species,
            nickname: nickname.unwrap_or_else(|| data.name.clone()),
            level,
            gender,
            ability: data.abilities.first().cloned().unwrap_or_default(),
            is_shiny: rng.shiny("shiny roll"),
            exp: 0,
            ivs,
            evs,
            curr_hp: stats[0],
            stats,
            moves: move_slots,
            status: None,
            fusion_lineage: Vec::new(),
            origin: OriginRecord::default(),
        }
    }

    /// Mints a creature from a dex number, the factory entry point for
    /// callers holding raw ids.
    pub fn from_species_id(
        id: u16,
        level: u8,
        nickname: Option<String>,
        rng: &mut GameRng,
    ) -> SpeciesDataResult<Self> {
        let species = Species::from_id(id).ok_or(SpeciesDataError::SpeciesNotFound(id))?;
        let data = get_species_data(species)?;
        Ok(Self::new(species, data, level, None, None, nickname, rng))
    }

    pub fn name(&self) -> &str {
        &self.nickname
    }

    pub fn max_hp(&self) -> u16 {
        self.stats[0]
    }

    pub fn current_hp(&self) -> u16 {
        self.curr_hp
    }

    pub fn stat(&self, stat: Stat) -> u16 {
        self.stats[stat.index()]
    }

    pub fn is_fainted(&self) -> bool {
        self.curr_hp == 0
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.curr_hp = hp.min(self.max_hp());
    }

    /// Applies damage, clamping at zero. Returns true if this faints the
    /// creature.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        self.curr_hp = self.curr_hp.saturating_sub(damage);
        self.is_fainted()
    }

    /// Restores HP, clamping at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.curr_hp;
        self.curr_hp = (self.curr_hp + amount).min(self.max_hp());
        self.curr_hp - before
    }

    /// A fraction of current over max HP, used by the catch formula.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp() == 0 {
            return 0.0;
        }
        self.curr_hp as f32 / self.max_hp() as f32
    }
}

/// The stat formula. Non-HP stats get `+5`; HP gets `+level+10` instead and
/// a fainted creature is the one whose current HP ran out, not a stat of 0.
pub fn calculate_stat(base: u8, iv: u8, ev: u16, level: u8, stat: Stat) -> u16 {
    let core = (2 * base as u32 + iv as u32 + ev as u32 / 4) * level as u32 / 100;
    let value = if stat == Stat::Hp {
        core + level as u32 + 10
    } else {
        core + 5
    };
    value.min(u16::MAX as u32) as u16
}

pub fn calculate_stats(base: &[u8; 6], level: u8, ivs: &[u8; 6], evs: &[u16; 6]) -> [u16; 6] {
    let order = [
        Stat::Hp,
        Stat::Atk,
        Stat::Def,
        Stat::SpAtk,
        Stat::SpDef,
        Stat::Spd,
    ];
    let mut stats = [0u16; 6];
    for (i, stat) in order.into_iter().enumerate() {
        stats[i] = calculate_stat(base[i], ivs[i], evs[i], level, stat);
    }
    stats
}
