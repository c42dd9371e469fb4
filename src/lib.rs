pub mod battle;
pub mod data;
pub mod errors;
pub mod game;
pub mod objectmon;
pub mod persistence;
pub mod player;
pub mod rng;

pub use battle::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus, PlayerAction,
};
pub use errors::{GameError, GameResult};
pub use game::{GameSession, Screen};
pub use objectmon::ObjectmonInst;
pub use player::Player;
pub use rng::GameRng;
