//! Opponent decision-making. The engine takes both actions as input, so the
//! policy is a seam: the session plugs one in for wild battles and tests can
//! substitute their own.

use crate::battle::state::{BattleState, PlayerAction};
use crate::rng::GameRng;

pub trait OpponentPolicy {
    fn choose_action(
        &self,
        state: &BattleState,
        side_index: usize,
        rng: &mut GameRng,
    ) -> PlayerAction;
}

/// Picks uniformly among the active creature's moves that still have PP.
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose_action(
        &self,
        state: &BattleState,
        side_index: usize,
        rng: &mut GameRng,
    ) -> PlayerAction {
        let side = &state.sides[side_index];
        let usable: Vec<usize> = side
            .active()
            .map(|inst| {
                inst.moves
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.as_ref().is_some_and(|s| s.pp > 0))
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_default();
        if usable.is_empty() {
            // Every tank is dry; the engine skips the unusable move.
            return PlayerAction::UseMove { move_index: 0 };
        }
        let choice = rng.pick(usable.len(), "opponent move choice");
        PlayerAction::UseMove {
            move_index: usable[choice],
        }
    }
}
