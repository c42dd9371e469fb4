//! Scripted demo run: mint a starter, pick a fight with a wild Mug, and
//! print the battle log turn by turn.

use objectmon::battle::state::BattlePhase;
use objectmon::{GameSession, PlayerAction};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut session = GameSession::new_game(seed);
    session.create_player("Casey");
    let starter = session.mint_objectmon(1, 5, Some("Toasty".to_string()))?;
    if let Some(player) = session.player.as_mut() {
        player.party.push(starter);
    }

    let wild = session.spawn_wild(2, 4)?;
    println!("A {} appeared!", wild.name());
    session.start_battle(wild)?;

    for _ in 0..50 {
        let Some(battle) = session.battle_state() else {
            break;
        };
        let action = match battle.phase {
            BattlePhase::WaitingForReplacement => {
                // Single-member party: nothing to send out, so this run is
                // over anyway.
                break;
            }
            _ => PlayerAction::UseMove { move_index: 0 },
        };
        let messages = match session.submit_player_action(action) {
            Ok(messages) => messages,
            Err(err) => {
                println!("({})", err);
                break;
            }
        };
        for line in messages {
            println!("{}", line);
        }
    }

    if let Some(player) = session.player.as_ref() {
        println!(
            "{} heads back to town with {} objectmon seen.",
            player.name,
            player.objectdex.seen_count()
        );
    }
    Ok(())
}
