use crate::battle::engine::resolve_turn;
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, PlayerAction};
use crate::battle::tests::common::{create_test_battle, TestObjectmonBuilder};
use crate::rng::GameRng;
use pretty_assertions::assert_eq;
use schema::{Move, Species};

#[test]
fn running_from_a_wild_battle_always_works() {
    let toaster = TestObjectmonBuilder::new(Species::Toaster, 5)
        .with_moves(vec![Move::Toast])
        .build();
    let lamp = TestObjectmonBuilder::new(Species::Lamp, 50)
        .with_moves(vec![Move::LightBeam])
        .build();
    let mut state = create_test_battle(vec![toaster], lamp);

    // No rolls at all: fleeing pre-empts even a much faster opponent.
    let mut rng = GameRng::scripted(vec![]);
    let bus = resolve_turn(
        &mut state,
        PlayerAction::Run,
        Some(PlayerAction::UseMove { move_index: 0 }),
        &mut rng,
    )
    .unwrap();

    assert_eq!(state.phase, BattlePhase::Ended(BattleOutcome::Fled));
    assert!(bus
        .events()
        .iter()
        .any(|event| *event == BattleEvent::RanAway));
    assert!(!bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::MoveUsed { .. })));
    assert!(state.message_log.iter().any(|line| line == "Got away safely!"));
    // The would-be victim is untouched.
    let toaster = state.player().active().unwrap();
    assert_eq!(toaster.current_hp(), toaster.max_hp());
}

#[test]
fn a_successful_throw_ends_the_battle_as_caught() {
    let toaster = TestObjectmonBuilder::new(Species::Toaster, 5)
        .with_moves(vec![Move::Toast])
        .build();
    let mug = TestObjectmonBuilder::new(Species::Mug, 4)
        .with_moves(vec![Move::Splash])
        .build();
    let mut state = create_test_battle(vec![toaster], mug);

    // Full-health Mug: 255 * (1/3) / 3 comes to about 28%. A 10 lands it,
    // and the Mug never gets to act.
    let mut rng = GameRng::scripted(vec![10]);
    let bus = resolve_turn(
        &mut state,
        PlayerAction::ThrowCapsule,
        Some(PlayerAction::UseMove { move_index: 0 }),
        &mut rng,
    )
    .unwrap();

    assert_eq!(state.phase, BattlePhase::Ended(BattleOutcome::Caught));
    let events = bus.events();
    assert!(matches!(events[1], BattleEvent::CapsuleThrown { .. }));
    assert!(matches!(events[2], BattleEvent::CaptureSucceeded { .. }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, BattleEvent::MoveUsed { .. })));
    assert!(state
        .message_log
        .iter()
        .any(|line| line == "Gotcha! Mug was caught!"));
}

#[test]
fn a_failed_throw_gives_the_opponent_its_turn() {
    let toaster = TestObjectmonBuilder::new(Species::Toaster, 5)
        .with_moves(vec![Move::Toast])
        .build();
    let mug = TestObjectmonBuilder::new(Species::Mug, 4)
        .with_moves(vec![Move::Splash])
        .build();
    let mut state = create_test_battle(vec![toaster], mug);

    // A 90 sails past the ~28% rate; the Mug answers with Splash.
    let mut rng = GameRng::scripted(vec![90, 50]);
    let bus = resolve_turn(
        &mut state,
        PlayerAction::ThrowCapsule,
        Some(PlayerAction::UseMove { move_index: 0 }),
        &mut rng,
    )
    .unwrap();

    assert_eq!(state.phase, BattlePhase::WaitingForPlayerAction);
    let events = bus.events();
    assert!(matches!(events[2], BattleEvent::CaptureFailed { .. }));
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::MoveUsed { attacker, .. } if attacker == "Mug"
    )));
    assert!(state
        .message_log
        .iter()
        .any(|line| line == "Oh no! Mug broke free!"));
}

#[test]
fn hurting_the_target_first_raises_the_odds() {
    let toaster = TestObjectmonBuilder::new(Species::Toaster, 5)
        .with_moves(vec![Move::Toast])
        .build();
    // One HP left: the rate climbs toward 255/3 = 85%.
    let mug = TestObjectmonBuilder::new(Species::Mug, 4)
        .with_moves(vec![Move::Splash])
        .with_hp(1)
        .build();
    let mut state = create_test_battle(vec![toaster], mug);

    // An 80 would have failed against the full-health rate of ~28%.
    let mut rng = GameRng::scripted(vec![80]);
    resolve_turn(
        &mut state,
        PlayerAction::ThrowCapsule,
        Some(PlayerAction::UseMove { move_index: 0 }),
        &mut rng,
    )
    .unwrap();

    assert_eq!(state.phase, BattlePhase::Ended(BattleOutcome::Caught));
}
