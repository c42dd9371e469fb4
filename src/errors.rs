use schema::{Move, Species};
use std::error::Error;
use std::fmt;

/// Errors raised while looking up species catalog data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesDataError {
    /// No species carries this dex number.
    SpeciesNotFound(u16),
    /// A known species has no catalog entry. Indicates a broken data file.
    MissingCatalogEntry(Species),
}

impl fmt::Display for SpeciesDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesDataError::SpeciesNotFound(id) => {
                write!(f, "no species with dex number {}", id)
            }
            SpeciesDataError::MissingCatalogEntry(species) => {
                write!(f, "species {} has no catalog entry", species)
            }
        }
    }
}

impl Error for SpeciesDataError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveDataError {
    MoveNotFound(Move),
}

impl fmt::Display for MoveDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDataError::MoveNotFound(move_) => {
                write!(f, "move {} has no catalog entry", move_)
            }
        }
    }
}

impl Error for MoveDataError {}

/// Errors about the battle session itself, as opposed to a single action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    NotInBattle,
    NoPlayer,
    BattleAlreadyOver,
    /// The active creature fainted; only a switch is accepted.
    ReplacementRequired,
    NoActiveObjectmon,
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::NotInBattle => write!(f, "no battle is in progress"),
            BattleStateError::NoPlayer => write!(f, "no player has been created"),
            BattleStateError::BattleAlreadyOver => write!(f, "the battle has already ended"),
            BattleStateError::ReplacementRequired => {
                write!(f, "a replacement must be sent out before anything else")
            }
            BattleStateError::NoActiveObjectmon => {
                write!(f, "side has no active objectmon")
            }
        }
    }
}

impl Error for BattleStateError {}

/// A player action rejected before resolution. Rejected actions never
/// mutate battle state, spend PP, or consume items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    OutOfPP(Move),
    InvalidMoveIndex(usize),
    InvalidSwitchTarget(usize),
    EmptyParty,
    NoCapsules,
    NotAWildBattle,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfPP(move_) => write!(f, "{} has no PP left", move_),
            ActionError::InvalidMoveIndex(index) => {
                write!(f, "no move in slot {}", index)
            }
            ActionError::InvalidSwitchTarget(index) => {
                write!(f, "party slot {} cannot be switched in", index)
            }
            ActionError::EmptyParty => write!(f, "party has no usable objectmon"),
            ActionError::NoCapsules => write!(f, "no capture capsules in the bag"),
            ActionError::NotAWildBattle => {
                write!(f, "that only works against wild objectmon")
            }
        }
    }
}

impl Error for ActionError {}

#[derive(Debug)]
pub enum PersistenceError {
    /// Nothing has been saved in this slot.
    MissingSlot(u8),
    /// The slot exists but its contents do not parse.
    Corrupt(String),
    Io(std::io::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::MissingSlot(slot) => write!(f, "save slot {} is empty", slot),
            PersistenceError::Corrupt(detail) => {
                write!(f, "save data is corrupt: {}", detail)
            }
            PersistenceError::Io(err) => write!(f, "save storage error: {}", err),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

/// Top-level error for the game facade.
#[derive(Debug)]
pub enum GameError {
    SpeciesData(SpeciesDataError),
    MoveData(MoveDataError),
    BattleState(BattleStateError),
    Action(ActionError),
    Persistence(PersistenceError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::SpeciesData(err) => write!(f, "{}", err),
            GameError::MoveData(err) => write!(f, "{}", err),
            GameError::BattleState(err) => write!(f, "{}", err),
            GameError::Action(err) => write!(f, "{}", err),
            GameError::Persistence(err) => write!(f, "{}", err),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::SpeciesData(err) => Some(err),
            GameError::MoveData(err) => Some(err),
            GameError::BattleState(err) => Some(err),
            GameError::Action(err) => Some(err),
            GameError::Persistence(err) => Some(err),
        }
    }
}

impl From<SpeciesDataError> for GameError {
    fn from(err: SpeciesDataError) -> Self {
        GameError::SpeciesData(err)
    }
}

impl From<MoveDataError> for GameError {
    fn from(err: MoveDataError) -> Self {
        GameError::MoveData(err)
    }
}

impl From<BattleStateError> for GameError {
    fn from(err: BattleStateError) -> Self {
        GameError::BattleState(err)
    }
}

impl From<ActionError> for GameError {
    fn from(err: ActionError) -> Self {
        GameError::Action(err)
    }
}

impl From<PersistenceError> for GameError {
    fn from(err: PersistenceError) -> Self {
        GameError::Persistence(err)
    }
}

pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
pub type MoveDataResult<T> = Result<T, MoveDataError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
pub type GameResult<T> = Result<T, GameError>;
