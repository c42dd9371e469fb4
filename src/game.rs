//! The session facade. One [`GameSession`] owns the player, the world
//! state, the RNG, and at most one battle, and is the only surface a UI
//! needs to drive the whole game.

use crate::battle::ai::{OpponentPolicy, RandomPolicy};
use crate::battle::engine;
use crate::battle::state::{
    BattleOutcome, BattlePhase, BattleState, PlayerAction, Weather, OPPONENT_SIDE, PLAYER_SIDE,
};
use crate::errors::{BattleStateError, GameResult, PersistenceResult, SpeciesDataResult};
use crate::objectmon::{ObjectmonInst, OriginRecord};
use crate::persistence::{self, SaveStore};
use crate::player::{Player, ITEM_CAPSULE};
use crate::rng::GameRng;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Title,
    Overworld,
    Battle,
    Menu,
    FusionLab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldTime {
    pub hour: u8,
    pub minute: u8,
    pub day: u16,
    pub weather: Weather,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            hour: 10,
            minute: 0,
            day: 1,
            weather: Weather::Sunny,
        }
    }
}

/// Read-only snapshot of the session for rendering.
pub struct GameView<'a> {
    pub screen: Screen,
    pub player: Option<&'a Player>,
    pub current_map: &'a str,
    pub flags: &'a HashMap<String, bool>,
    pub in_battle: bool,
    pub time: &'a WorldTime,
    pub rng_seed: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GameSession {
    screen: Screen,
    pub player: Option<Player>,
    pub current_map: String,
    pub flags: HashMap<String, bool>,
    pub time: WorldTime,
    rng_seed: u64,
    /// Not persisted: a loaded session restarts the stream from its seed.
    #[serde(skip)]
    rng: GameRng,
    /// Not persisted: battles do not survive a save.
    #[serde(skip)]
    battle: Option<BattleState>,
}

impl GameSession {
    pub fn new_game(seed: u64) -> Self {
        GameSession {
            screen: Screen::Title,
            player: None,
            current_map: "StarterTown".to_string(),
            flags: HashMap::new(),
            time: WorldTime::default(),
            rng_seed: seed,
            rng: GameRng::seeded(seed),
            battle: None,
        }
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Creates the player with the starting kit and moves to the overworld.
    pub fn create_player(&mut self, name: &str) -> &Player {
        let id = self.rng.trainer_id();
        self.player = Some(Player::new(name, id));
        self.screen = Screen::Overworld;
        info!("created player {} (id {})", name, id);
        self.player.as_ref().expect("player was just created")
    }

    /// Mints a creature from the session's RNG stream, stamped with the
    /// current player as its original trainer.
    pub fn mint_objectmon(
        &mut self,
        species_id: u16,
        level: u8,
        nickname: Option<String>,
    ) -> SpeciesDataResult<ObjectmonInst> {
        let mut inst = ObjectmonInst::from_species_id(species_id, level, nickname, &mut self.rng)?;
        if let Some(player) = self.player.as_ref() {
            inst.origin = OriginRecord {
                trainer_name: player.name.clone(),
                trainer_id: player.id,
            };
        }
        Ok(inst)
    }

    /// Mints a wild encounter, named the way battle text refers to it.
    pub fn spawn_wild(&mut self, species_id: u16, level: u8) -> SpeciesDataResult<ObjectmonInst> {
        let mut inst = self.mint_objectmon(species_id, level, None)?;
        inst.nickname = format!("Wild {}", inst.nickname);
        Ok(inst)
    }

    pub fn battle_state(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn game_view(&self) -> GameView<'_> {
        GameView {
            screen: self.screen,
            player: self.player.as_ref(),
            current_map: &self.current_map,
            flags: &self.flags,
            in_battle: self.battle.is_some(),
            time: &self.time,
            rng_seed: self.rng_seed,
        }
    }

    /// Opens a battle against a wild creature. The battle works on a copy
    /// of the party; survivors are written back when it ends.
    pub fn start_battle(&mut self, wild: ObjectmonInst) -> GameResult<()> {
        let player = self.player.as_mut().ok_or(BattleStateError::NoPlayer)?;
        player.objectdex.mark_seen(wild.species.id());
        let battle = engine::start_battle(&player.name, player.party.clone(), wild)?;
        info!(
            "battle started: {} vs {}",
            battle.player().name,
            battle.opponent().name
        );
        self.battle = Some(battle);
        self.screen = Screen::Battle;
        Ok(())
    }

    /// Feeds one player action through the engine, pairing it with the
    /// opponent's choice, and returns the narrated lines of the exchange.
    pub fn submit_player_action(&mut self, action: PlayerAction) -> GameResult<Vec<String>> {
        let battle = self.battle.as_mut().ok_or(BattleStateError::NotInBattle)?;
        engine::validate_action(battle, PLAYER_SIDE, &action)?;

        // The capsule leaves the bag the moment it is thrown, caught or not.
        if action == PlayerAction::ThrowCapsule {
            let player = self.player.as_mut().ok_or(BattleStateError::NoPlayer)?;
            if !player.bag.use_capsule(ITEM_CAPSULE) {
                return Err(crate::errors::ActionError::NoCapsules.into());
            }
        }

        let opponent_action = if battle.phase == BattlePhase::WaitingForReplacement {
            None
        } else {
            Some(RandomPolicy.choose_action(battle, OPPONENT_SIDE, &mut self.rng))
        };

        let bus = engine::resolve_turn(battle, action, opponent_action, &mut self.rng)?;
        let messages = bus.messages();
        let outcome = battle.outcome();
        if let Some(outcome) = outcome {
            self.finish_battle(outcome);
        }
        Ok(messages)
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) {
        let Some(mut battle) = self.battle.take() else {
            return;
        };
        if outcome == BattleOutcome::Caught {
            let opponent = &mut battle.sides[OPPONENT_SIDE];
            let caught = opponent.party[opponent.active_index].take();
            if let (Some(mut caught), Some(player)) = (caught, self.player.as_mut()) {
                // Drop the encounter prefix when it joins the roster.
                if let Some(stripped) = caught.nickname.strip_prefix("Wild ") {
                    caught.nickname = stripped.to_string();
                }
                player.add_objectmon(caught);
            }
        }
        if let Some(player) = self.player.as_mut() {
            let side = &mut battle.sides[PLAYER_SIDE];
            for (slot, member) in side.party.iter_mut().zip(player.party.iter_mut()) {
                if let Some(updated) = slot.take() {
                    *member = updated;
                }
            }
        }
        self.screen = Screen::Overworld;
        info!("battle ended: {:?}", outcome);
    }

    pub fn save_game(&self, slot: u8, store: &mut dyn SaveStore) -> PersistenceResult<()> {
        persistence::save(self, slot, store)
    }

    /// Replaces this session with the saved one. On any error the current
    /// session is left untouched.
    pub fn load_game(&mut self, slot: u8, store: &dyn SaveStore) -> PersistenceResult<()> {
        let loaded = persistence::load(slot, store)?;
        *self = loaded;
        self.rng = GameRng::seeded(self.rng_seed);
        self.battle = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ActionError, GameError};
    use crate::persistence::MemorySaveStore;
    use pretty_assertions::assert_eq;

    fn session_with_starter() -> GameSession {
        let mut session = GameSession::new_game(1234);
        session.create_player("Casey");
        let starter = session.mint_objectmon(1, 5, Some("Toasty".to_string())).unwrap();
        session.player.as_mut().unwrap().party.push(starter);
        session
    }

    #[test]
    fn new_game_starts_on_the_title_screen() {
        let session = GameSession::new_game(0);
        assert_eq!(session.screen(), Screen::Title);
        assert!(session.player.is_none());
        assert!(session.battle_state().is_none());
    }

    #[test]
    fn creating_a_player_moves_to_the_overworld() {
        let mut session = GameSession::new_game(0);
        session.create_player("Casey");
        assert_eq!(session.screen(), Screen::Overworld);
        assert_eq!(session.game_view().player.unwrap().name, "Casey");
    }

    #[test]
    fn same_seed_same_trainer_id() {
        let mut a = GameSession::new_game(42);
        let mut b = GameSession::new_game(42);
        assert_eq!(a.create_player("A").id, b.create_player("B").id);
    }

    #[test]
    fn minted_creatures_record_their_trainer() {
        let mut session = session_with_starter();
        let inst = session.mint_objectmon(2, 5, None).unwrap();
        let player = session.player.as_ref().unwrap();
        assert_eq!(inst.origin.trainer_name, player.name);
        assert_eq!(inst.origin.trainer_id, player.id);
        assert!(inst.fusion_lineage.is_empty());
    }

    #[test]
    fn starting_a_battle_marks_the_species_seen() {
        let mut session = session_with_starter();
        let wild = session.spawn_wild(2, 4).unwrap();
        assert_eq!(wild.name(), "Wild Mug");
        session.start_battle(wild).unwrap();
        assert_eq!(session.screen(), Screen::Battle);
        let player = session.player.as_ref().unwrap();
        assert!(player.objectdex.has_seen(2));
        assert!(!player.objectdex.has_caught(2));
    }

    #[test]
    fn battle_without_a_party_is_rejected() {
        let mut session = GameSession::new_game(5);
        session.create_player("Casey");
        let wild = session.spawn_wild(2, 4).unwrap();
        let result = session.start_battle(wild);
        assert!(matches!(
            result,
            Err(GameError::Action(ActionError::EmptyParty))
        ));
        assert!(session.battle_state().is_none());
    }

    #[test]
    fn actions_outside_battle_are_rejected() {
        let mut session = session_with_starter();
        let result = session.submit_player_action(PlayerAction::Run);
        assert!(matches!(
            result,
            Err(GameError::BattleState(BattleStateError::NotInBattle))
        ));
    }

    #[test]
    fn running_ends_the_battle_and_returns_to_the_overworld() {
        let mut session = session_with_starter();
        let wild = session.spawn_wild(2, 4).unwrap();
        session.start_battle(wild).unwrap();
        let messages = session.submit_player_action(PlayerAction::Run).unwrap();
        assert!(messages.iter().any(|line| line == "Got away safely!"));
        assert!(session.battle_state().is_none());
        assert_eq!(session.screen(), Screen::Overworld);
    }

    #[test]
    fn capsule_throws_spend_capsules_win_or_lose() {
        let mut session = session_with_starter();
        let wild = session.spawn_wild(2, 4).unwrap();
        session.start_battle(wild).unwrap();
        let before = session
            .player
            .as_ref()
            .unwrap()
            .bag
            .capsule_count(ITEM_CAPSULE);
        session
            .submit_player_action(PlayerAction::ThrowCapsule)
            .unwrap();
        let after = session
            .player
            .as_ref()
            .unwrap()
            .bag
            .capsule_count(ITEM_CAPSULE);
        assert_eq!(after, before - 1);
    }

    #[test]
    fn battles_drain_the_roster_copy_back() {
        let mut session = session_with_starter();
        let wild = session.spawn_wild(3, 3).unwrap();
        session.start_battle(wild).unwrap();
        let full = session.player.as_ref().unwrap().party[0].max_hp();
        // Trade blows until someone drops or the battle otherwise ends.
        for _ in 0..60 {
            if session.battle_state().is_none() {
                break;
            }
            let action = match session.battle_state().unwrap().phase {
                BattlePhase::WaitingForReplacement => break,
                _ => PlayerAction::UseMove { move_index: 0 },
            };
            if session.submit_player_action(action).is_err() {
                break;
            }
        }
        let hp = session.player.as_ref().unwrap().party[0].current_hp();
        assert!(hp <= full);
    }

    #[test]
    fn save_and_load_round_trip_the_session() {
        let mut session = session_with_starter();
        session.set_flag("met_rival", true);
        {
            let player = session.player.as_mut().unwrap();
            player.bag.grant_key_item(7);
            player.bag.add_fusion_parts(2, 3);
            player.objectdex.mark_caught(1);
        }
        let mut store = MemorySaveStore::new();
        session.save_game(1, &mut store).unwrap();

        let mut restored = GameSession::new_game(0);
        restored.load_game(1, &store).unwrap();
        assert_eq!(restored.rng_seed(), 1234);
        assert!(restored.flag("met_rival"));
        let original = session.player.as_ref().unwrap();
        let loaded = restored.player.as_ref().unwrap();
        assert_eq!(loaded.party, original.party);
        assert_eq!(loaded.party[0].name(), "Toasty");
        assert_eq!(loaded.bag, original.bag);
        assert_eq!(loaded.objectdex, original.objectdex);
        assert!(restored.battle_state().is_none());
    }

    #[test]
    fn failed_load_leaves_the_session_alone() {
        let mut session = session_with_starter();
        let store = MemorySaveStore::new();
        assert!(session.load_game(9, &store).is_err());
        assert_eq!(session.player.as_ref().unwrap().name, "Casey");
        assert_eq!(session.rng_seed(), 1234);
    }
}
