//! The turn engine. `resolve_turn` is the only mutation path for a battle:
//! it takes both chosen actions, orders them, resolves each, and returns the
//! ordered events of everything that happened.

use crate::battle::calculators;
use crate::battle::catch;
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleSide, BattleState, EventBus, PlayerAction,
    OPPONENT_SIDE, PLAYER_SIDE,
};
use crate::battle::stats;
use crate::data::{get_move_data, get_species_data};
use crate::errors::{ActionError, BattleStateError, GameResult};
use crate::objectmon::ObjectmonInst;
use crate::rng::GameRng;
use log::debug;
use schema::{EffectTarget, MoveEffect};
use std::cmp::Ordering;

/// Opens a wild battle. The player leads with their first healthy member.
pub fn start_battle(
    player_name: &str,
    party: Vec<ObjectmonInst>,
    wild: ObjectmonInst,
) -> Result<BattleState, ActionError> {
    if !party.iter().any(|inst| !inst.is_fainted()) {
        return Err(ActionError::EmptyParty);
    }
    let mut player = BattleSide::new(player_name, party, false);
    if player.active_fainted() {
        if let Some(first) = player.usable_backups().first() {
            player.active_index = *first;
        }
    }
    let opponent_name = wild.name().to_string();
    let opponent = BattleSide::new(opponent_name, vec![wild], true);
    Ok(BattleState::new(player, opponent))
}

/// Checks an action against the current state without mutating anything. A
/// rejected action spends no PP and consumes no items.
pub fn validate_action(
    state: &BattleState,
    side_index: usize,
    action: &PlayerAction,
) -> GameResult<()> {
    match state.phase {
        BattlePhase::Ended(_) => return Err(BattleStateError::BattleAlreadyOver.into()),
        BattlePhase::WaitingForReplacement if side_index == PLAYER_SIDE => {
            let PlayerAction::SwitchObjectmon { party_index } = action else {
                return Err(BattleStateError::ReplacementRequired.into());
            };
            return validate_switch(&state.sides[side_index], *party_index);
        }
        _ => {}
    }
    match action {
        PlayerAction::UseMove { move_index } => {
            let side = &state.sides[side_index];
            let active = side
                .active()
                .ok_or(BattleStateError::NoActiveObjectmon)?;
            let slot = active
                .moves
                .get(*move_index)
                .copied()
                .flatten()
                .ok_or(ActionError::InvalidMoveIndex(*move_index))?;
            if slot.pp == 0 {
                return Err(ActionError::OutOfPP(slot.move_).into());
            }
            Ok(())
        }
        PlayerAction::SwitchObjectmon { party_index } => {
            validate_switch(&state.sides[side_index], *party_index)
        }
        PlayerAction::ThrowCapsule | PlayerAction::Run => {
            if state.opponent().is_wild {
                Ok(())
            } else {
                Err(ActionError::NotAWildBattle.into())
            }
        }
    }
}

fn validate_switch(side: &BattleSide, party_index: usize) -> GameResult<()> {
    let valid = party_index != side.active_index
        && side
            .party
            .get(party_index)
            .and_then(|slot| slot.as_ref())
            .is_some_and(|inst| !inst.is_fainted());
    if valid {
        Ok(())
    } else {
        Err(ActionError::InvalidSwitchTarget(party_index).into())
    }
}

/// Resolves one full exchange. `opponent_action` is `None` only when there
/// is nothing on the other side to act (replacement turns pass no action).
pub fn resolve_turn(
    state: &mut BattleState,
    player_action: PlayerAction,
    opponent_action: Option<PlayerAction>,
    rng: &mut GameRng,
) -> GameResult<EventBus> {
    validate_action(state, PLAYER_SIDE, &player_action)?;
    let mut bus = EventBus::new();

    // A replacement turn is just the switch; the opponent does not act.
    if state.phase == BattlePhase::WaitingForReplacement {
        if let PlayerAction::SwitchObjectmon { party_index } = player_action {
            execute_switch(state, PLAYER_SIDE, party_index, &mut bus);
            state.phase = BattlePhase::WaitingForPlayerAction;
        }
        state.message_log.extend(bus.messages());
        return Ok(bus);
    }

    state.phase = BattlePhase::TurnInProgress;
    state.turns_elapsed += 1;
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turns_elapsed,
    });

    // Running from a wild battle always works, and pre-empts the opponent.
    if player_action == PlayerAction::Run {
        bus.push(BattleEvent::RanAway);
        finish(state, BattleOutcome::Fled, &mut bus);
        state.message_log.extend(bus.messages());
        return Ok(bus);
    }

    let mut queue = vec![(PLAYER_SIDE, player_action)];
    if let Some(action) = opponent_action {
        queue.push((OPPONENT_SIDE, action));
    }
    if queue.len() == 2 {
        let player_priority = action_priority(state, PLAYER_SIDE, &queue[0].1);
        let opponent_priority = action_priority(state, OPPONENT_SIDE, &queue[1].1);
        let player_first = match player_priority.cmp(&opponent_priority) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => rng.coin_flip("speed tie"),
        };
        if !player_first {
            queue.swap(0, 1);
        }
    }

    for (side_index, action) in queue {
        if state.is_terminal() {
            break;
        }
        execute_action(state, side_index, &action, &mut bus, rng)?;
        evaluate_battle_end(state, &mut bus);
    }

    if state.phase == BattlePhase::TurnInProgress {
        state.phase = BattlePhase::WaitingForPlayerAction;
    }
    state.message_log.extend(bus.messages());
    Ok(bus)
}

/// Ordering key for an exchange: action class first (fleeing beats capsules
/// beats switches beats moves), then move priority tier, then speed. Full
/// ties fall through to a coin flip in `resolve_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ActionPriority {
    class: i8,
    move_priority: i8,
    speed: u16,
}

fn action_priority(state: &BattleState, side_index: usize, action: &PlayerAction) -> ActionPriority {
    match action {
        PlayerAction::Run => ActionPriority {
            class: 10,
            move_priority: 0,
            speed: 0,
        },
        PlayerAction::ThrowCapsule => ActionPriority {
            class: 8,
            move_priority: 0,
            speed: 0,
        },
        PlayerAction::SwitchObjectmon { .. } => ActionPriority {
            class: 6,
            move_priority: 0,
            speed: 0,
        },
        PlayerAction::UseMove { move_index } => {
            let side = &state.sides[side_index];
            let move_priority = side
                .active()
                .and_then(|inst| inst.moves.get(*move_index).copied().flatten())
                .and_then(|slot| get_move_data(slot.move_).ok())
                .map(|data| data.priority)
                .unwrap_or(0);
            ActionPriority {
                class: 0,
                move_priority,
                speed: stats::effective_speed(side),
            }
        }
    }
}

fn execute_action(
    state: &mut BattleState,
    side_index: usize,
    action: &PlayerAction,
    bus: &mut EventBus,
    rng: &mut GameRng,
) -> GameResult<()> {
    match action {
        PlayerAction::UseMove { move_index } => {
            execute_move(state, side_index, *move_index, bus, rng)
        }
        PlayerAction::SwitchObjectmon { party_index } => {
            if state.sides[side_index].active_fainted() {
                push_skip(state, side_index, bus);
            } else {
                execute_switch(state, side_index, *party_index, bus);
            }
            Ok(())
        }
        PlayerAction::ThrowCapsule => execute_capsule_throw(state, bus, rng),
        PlayerAction::Run => {
            bus.push(BattleEvent::RanAway);
            finish(state, BattleOutcome::Fled, bus);
            Ok(())
        }
    }
}

fn push_skip(state: &BattleState, side_index: usize, bus: &mut EventBus) {
    let name = state.sides[side_index]
        .active()
        .map(|inst| inst.name().to_string())
        .unwrap_or_else(|| state.sides[side_index].name.clone());
    bus.push(BattleEvent::ActionSkipped { name });
}

fn execute_move(
    state: &mut BattleState,
    attacker_index: usize,
    move_index: usize,
    bus: &mut EventBus,
    rng: &mut GameRng,
) -> GameResult<()> {
    let defender_index = 1 - attacker_index;

    // A fainted actor's turn evaporates. No PP is spent.
    if state.sides[attacker_index].active_fainted() {
        push_skip(state, attacker_index, bus);
        return Ok(());
    }

    // Upstream validation catches the player's bad slots and dry tanks; a
    // wild creature in either situation just loses the turn.
    let drawn = {
        let side = &mut state.sides[attacker_index];
        let active = side
            .active_mut()
            .ok_or(BattleStateError::NoActiveObjectmon)?;
        let name = active.name().to_string();
        match active.moves.get_mut(move_index).and_then(|s| s.as_mut()) {
            Some(slot) => {
                let move_ = slot.move_;
                if slot.use_move() {
                    Some((name, move_))
                } else {
                    debug!("{} tried {} with no PP", name, move_);
                    None
                }
            }
            None => {
                debug!("{} has no move in slot {}", name, move_index);
                None
            }
        }
    };
    let Some((attacker_name, move_)) = drawn else {
        push_skip(state, attacker_index, bus);
        return Ok(());
    };

    let data = get_move_data(move_)?;
    bus.push(BattleEvent::MoveUsed {
        attacker: attacker_name.clone(),
        move_used: move_,
    });

    let accuracy_roll = rng.percent("accuracy check");
    if !stats::move_hits(data, accuracy_roll) {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_name,
        });
        return Ok(());
    }

    if data.is_damaging() {
        // Immunity short-circuits before any damage rolls are drawn, and
        // suppresses the secondary effect too.
        let defender = state.sides[defender_index]
            .active()
            .ok_or(BattleStateError::NoActiveObjectmon)?;
        let defender_types = &get_species_data(defender.species)?.types;
        if stats::type_effectiveness(data.move_type, defender_types) == 0.0 {
            bus.push(BattleEvent::TypeEffectiveness { multiplier: 0.0 });
            return Ok(());
        }

        let outcome = calculators::calculate_damage(
            &state.sides[attacker_index],
            &state.sides[defender_index],
            data,
            rng,
        )?;
        if outcome.critical {
            bus.push(BattleEvent::CriticalHit);
        }
        if outcome.effectiveness != 1.0 {
            bus.push(BattleEvent::TypeEffectiveness {
                multiplier: outcome.effectiveness,
            });
        }
        apply_damage(state, defender_index, outcome.damage, bus);
    }

    if let Some(effect) = &data.effect {
        apply_effect(state, attacker_index, defender_index, effect, bus, rng);
    }
    Ok(())
}

fn apply_damage(state: &mut BattleState, side_index: usize, damage: u16, bus: &mut EventBus) {
    if let Some(inst) = state.sides[side_index].active_mut() {
        if inst.is_fainted() {
            return;
        }
        let fainted = inst.take_damage(damage);
        bus.push(BattleEvent::DamageDealt {
            target: inst.name().to_string(),
            damage,
            remaining_hp: inst.current_hp(),
        });
        if fainted {
            bus.push(BattleEvent::Fainted {
                name: inst.name().to_string(),
            });
        }
    }
}

fn apply_effect(
    state: &mut BattleState,
    attacker_index: usize,
    defender_index: usize,
    effect: &MoveEffect,
    bus: &mut EventBus,
    rng: &mut GameRng,
) {
    let target_index = match effect.target() {
        EffectTarget::User => attacker_index,
        EffectTarget::Opponent | EffectTarget::All => defender_index,
    };
    // Nothing lands on a creature the hit just took down.
    if state.sides[target_index].active_fainted() {
        return;
    }
    // Guaranteed effects skip the roll entirely.
    if effect.chance() < 100 && rng.percent("effect chance") > effect.chance() {
        return;
    }

    match effect {
        MoveEffect::Damage { amount, .. } => {
            apply_damage(state, target_index, *amount, bus);
        }
        MoveEffect::InflictStatus { status, .. } => {
            if let Some(inst) = state.sides[target_index].active_mut() {
                // One status at a time; a second is silently refused.
                if inst.status.is_none() {
                    inst.status = Some(*status);
                    bus.push(BattleEvent::StatusApplied {
                        target: inst.name().to_string(),
                        status: *status,
                    });
                }
            }
        }
        MoveEffect::StatChange { stat, stages, .. } => {
            let target_name = state.sides[target_index]
                .active()
                .map(|inst| inst.name().to_string())
                .unwrap_or_default();
            let (old_stage, new_stage) =
                state.sides[target_index].modify_stat_stage(*stat, *stages);
            if old_stage != new_stage {
                bus.push(BattleEvent::StatStageChanged {
                    target: target_name,
                    stat: *stat,
                    old_stage,
                    new_stage,
                });
            }
        }
        MoveEffect::Heal { percent, .. } => {
            if let Some(inst) = state.sides[target_index].active_mut() {
                let amount = (inst.max_hp() as u32 * *percent as u32 / 100) as u16;
                let healed = inst.heal(amount);
                if healed > 0 {
                    bus.push(BattleEvent::Healed {
                        target: inst.name().to_string(),
                        amount: healed,
                    });
                }
            }
        }
    }
}

fn execute_switch(
    state: &mut BattleState,
    side_index: usize,
    party_index: usize,
    bus: &mut EventBus,
) {
    let side = &mut state.sides[side_index];
    let withdrawn = side
        .active()
        .map(|inst| inst.name().to_string())
        .unwrap_or_default();
    side.switch_to(party_index);
    let sent_out = side
        .active()
        .map(|inst| inst.name().to_string())
        .unwrap_or_default();
    bus.push(BattleEvent::Switched {
        side_name: side.name.clone(),
        withdrawn,
        sent_out,
    });
}

fn execute_capsule_throw(
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut GameRng,
) -> GameResult<()> {
    let (target_name, rate) = {
        let target = state
            .opponent()
            .active()
            .ok_or(BattleStateError::NoActiveObjectmon)?;
        let rate = catch::calculate_catch_rate(target, 1.0)?;
        (target.name().to_string(), rate)
    };
    bus.push(BattleEvent::CapsuleThrown {
        target: target_name.clone(),
    });
    let roll = rng.percent("catch roll") as f32;
    if roll <= rate {
        bus.push(BattleEvent::CaptureSucceeded {
            target: target_name,
        });
        finish(state, BattleOutcome::Caught, bus);
    } else {
        bus.push(BattleEvent::CaptureFailed {
            target: target_name,
        });
    }
    Ok(())
}

fn evaluate_battle_end(state: &mut BattleState, bus: &mut EventBus) {
    if state.is_terminal() {
        return;
    }
    if state.opponent().all_fainted() {
        finish(state, BattleOutcome::Win, bus);
    } else if state.player().all_fainted() {
        finish(state, BattleOutcome::Lose, bus);
    } else if state.player().active_fainted() {
        state.phase = BattlePhase::WaitingForReplacement;
    }
}

fn finish(state: &mut BattleState, outcome: BattleOutcome, bus: &mut EventBus) {
    state.phase = BattlePhase::Ended(outcome);
    bus.push(BattleEvent::BattleEnded { outcome });
}
