//! Shared builders for battle tests.
//!
//! Scripted RNG cheat sheet, per resolution, in draw order:
//!   - speed tie only: 1 coin flip (odd = player first)
//!   - each executed move: 1 accuracy roll
//!   - each damaging hit: 1 spread roll (85..=100), 1 crit roll (1 = crit)
//!   - each secondary effect with chance < 100: 1 percent roll
//!   - each capsule throw: 1 catch roll
//! Misses, immune hits, guaranteed effects, and skipped actions draw
//! nothing further.

use crate::battle::engine;
use crate::battle::state::BattleState;
use crate::data::get_species_data;
use crate::objectmon::ObjectmonInst;
use crate::rng::GameRng;
use schema::{Move, Species};

pub struct TestObjectmonBuilder {
    species: Species,
    level: u8,
    ivs: [u8; 6],
    moves: Vec<Move>,
    hp: Option<u16>,
    nickname: Option<String>,
}

impl TestObjectmonBuilder {
    /// Flat-zero IVs and an explicit moveset keep every stat reproducible
    /// on paper.
    pub fn new(species: Species, level: u8) -> Self {
        TestObjectmonBuilder {
            species,
            level,
            ivs: [0; 6],
            moves: Vec::new(),
            hp: None,
            nickname: None,
        }
    }

    pub fn with_ivs(mut self, ivs: [u8; 6]) -> Self {
        self.ivs = ivs;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn build(self) -> ObjectmonInst {
        let data = get_species_data(self.species).expect("test species exists");
        let mut rng = GameRng::scripted(vec![10; 8]);
        let moves = if self.moves.is_empty() {
            None
        } else {
            Some(self.moves)
        };
        let mut inst = ObjectmonInst::new(
            self.species,
            data,
            self.level,
            Some(self.ivs),
            moves,
            self.nickname,
            &mut rng,
        );
        if let Some(hp) = self.hp {
            inst.set_hp(hp);
        }
        inst
    }
}

pub fn create_test_battle(party: Vec<ObjectmonInst>, wild: ObjectmonInst) -> BattleState {
    engine::start_battle("Tester", party, wild).expect("test battle starts")
}
