use crate::objectmon::ObjectmonInst;
use schema::{Move, Stat, StatusCondition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PLAYER_SIDE: usize = 0;
pub const OPPONENT_SIDE: usize = 1;
pub const PARTY_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win,
    Lose,
    Caught,
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    WaitingForPlayerAction,
    TurnInProgress,
    /// The player's active creature fainted with backups remaining; only a
    /// switch is accepted, and the opponent does not act on it.
    WaitingForReplacement,
    Ended(BattleOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    UseMove { move_index: usize },
    SwitchObjectmon { party_index: usize },
    ThrowCapsule,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rain,
    Night,
}

/// One combatant's half of the field: a party, which slot is active, and
/// the in-battle stat stages (reset on switch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSide {
    pub name: String,
    pub party: [Option<ObjectmonInst>; PARTY_SIZE],
    pub active_index: usize,
    pub stat_stages: HashMap<Stat, i8>,
    pub is_wild: bool,
}

impl BattleSide {
    pub fn new(name: impl Into<String>, members: Vec<ObjectmonInst>, is_wild: bool) -> Self {
        let mut party: [Option<ObjectmonInst>; PARTY_SIZE] = Default::default();
        for (slot, member) in party.iter_mut().zip(members.into_iter()) {
            *slot = Some(member);
        }
        BattleSide {
            name: name.into(),
            party,
            active_index: 0,
            stat_stages: HashMap::new(),
            is_wild,
        }
    }

    pub fn active(&self) -> Option<&ObjectmonInst> {
        self.party.get(self.active_index).and_then(|slot| slot.as_ref())
    }

    pub fn active_mut(&mut self) -> Option<&mut ObjectmonInst> {
        self.party.get_mut(self.active_index).and_then(|slot| slot.as_mut())
    }

    pub fn active_fainted(&self) -> bool {
        self.active().map_or(true, |inst| inst.is_fainted())
    }

    pub fn all_fainted(&self) -> bool {
        self.party
            .iter()
            .flatten()
            .all(|inst| inst.is_fainted())
    }

    /// Party slots that could legally be switched in right now.
    pub fn usable_backups(&self) -> Vec<usize> {
        self.party
            .iter()
            .enumerate()
            .filter(|(index, slot)| {
                *index != self.active_index
                    && slot.as_ref().is_some_and(|inst| !inst.is_fainted())
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub fn stat_stage(&self, stat: Stat) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Shifts a stage, clamped to -6..=6. Returns (old, new).
    pub fn modify_stat_stage(&mut self, stat: Stat, delta: i8) -> (i8, i8) {
        let old = self.stat_stage(stat);
        let new = (old + delta).clamp(-6, 6);
        self.stat_stages.insert(stat, new);
        (old, new)
    }

    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }

    /// Makes `party_index` the active slot and resets stages. The caller
    /// has already validated the target.
    pub fn switch_to(&mut self, party_index: usize) {
        self.active_index = party_index;
        self.clear_stat_stages();
    }
}

/// The full state of a battle in progress. Owned by the session; mutated
/// only by the turn engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub sides: [BattleSide; 2],
    pub phase: BattlePhase,
    pub turns_elapsed: u32,
    pub weather: Option<Weather>,
    pub message_log: Vec<String>,
}

impl BattleState {
    pub fn new(player: BattleSide, opponent: BattleSide) -> Self {
        BattleState {
            sides: [player, opponent],
            phase: BattlePhase::WaitingForPlayerAction,
            turns_elapsed: 0,
            weather: None,
            message_log: Vec::new(),
        }
    }

    pub fn player(&self) -> &BattleSide {
        &self.sides[PLAYER_SIDE]
    }

    pub fn opponent(&self) -> &BattleSide {
        &self.sides[OPPONENT_SIDE]
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended(_))
    }
}

/// Everything notable that happened during resolution, in order. Formatting
/// is separate so a UI can pace or restyle the log without re-running the
/// turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    TurnStarted { turn_number: u32 },
    MoveUsed { attacker: String, move_used: Move },
    MoveMissed { attacker: String },
    DamageDealt { target: String, damage: u16, remaining_hp: u16 },
    CriticalHit,
    TypeEffectiveness { multiplier: f32 },
    StatusApplied { target: String, status: StatusCondition },
    StatStageChanged { target: String, stat: Stat, old_stage: i8, new_stage: i8 },
    Healed { target: String, amount: u16 },
    Fainted { name: String },
    Switched { side_name: String, withdrawn: String, sent_out: String },
    /// The actor was fainted when its action came up; nothing happened and
    /// no PP was spent.
    ActionSkipped { name: String },
    CapsuleThrown { target: String },
    CaptureSucceeded { target: String },
    CaptureFailed { target: String },
    RanAway,
    BattleEnded { outcome: BattleOutcome },
}

impl BattleEvent {
    /// Player-facing text for this event, or `None` for events that are
    /// structural rather than narratable.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::MoveUsed { attacker, move_used } => {
                Some(format!("{} used {}!", attacker, move_used))
            }
            BattleEvent::MoveMissed { attacker } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::TypeEffectiveness { multiplier } => {
                if *multiplier == 0.0 {
                    Some("It had no effect!".to_string())
                } else if *multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else if *multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }
            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} {}", target, status.applied_text()))
            }
            BattleEvent::StatStageChanged { target, stat, old_stage, new_stage } => {
                if new_stage > old_stage {
                    Some(format!("{}'s {} rose!", target, stat))
                } else if new_stage < old_stage {
                    Some(format!("{}'s {} fell!", target, stat))
                } else {
                    None
                }
            }
            BattleEvent::Healed { target, amount } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::Fainted { name } => Some(format!("{} fainted!", name)),
            BattleEvent::Switched { side_name, withdrawn, sent_out } => Some(format!(
                "{} withdrew {} and sent out {}!",
                side_name, withdrawn, sent_out
            )),
            BattleEvent::ActionSkipped { .. } => None,
            BattleEvent::CapsuleThrown { target } => {
                Some(format!("A capsule was thrown at {}!", target))
            }
            BattleEvent::CaptureSucceeded { target } => {
                Some(format!("Gotcha! {} was caught!", target))
            }
            BattleEvent::CaptureFailed { target } => {
                Some(format!("Oh no! {} broke free!", target))
            }
            BattleEvent::RanAway => Some("Got away safely!".to_string()),
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Win => Some("You won the battle!".to_string()),
                BattleOutcome::Lose => Some("You lost the battle...".to_string()),
                // Capture and flee events already told the story.
                BattleOutcome::Caught | BattleOutcome::Fled => None,
            },
        }
    }
}

/// Ordered collection of the events one resolution produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The narratable lines, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().filter_map(|event| event.format()).collect()
    }
}

impl<'a> IntoIterator for &'a EventBus {
    type Item = &'a BattleEvent;
    type IntoIter = std::slice::Iter<'a, BattleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
