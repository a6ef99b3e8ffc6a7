//! Integration tests driving whole games through the scripted interface.

use mazecrawl::{
    CrawlError, CrawlResult, Command, Dice, Direction, DirectionInput, Entity, GameCompletionState,
    GameState, GenerationConfig, MonsterKind, Position, ScriptedInput, ScriptedInterface,
    TurnState, World,
};

fn corridor() -> World {
    World::from_layout(&[
        "#.###", //
        "#.#.#", //
        "#.#.#", //
        "#...#", //
        "#####",
    ])
    .expect("layout is rectangular")
}

#[test]
fn test_new_game_starts_at_the_entry() -> CrawlResult<()> {
    let game = GameState::new_game(&GenerationConfig::new(12345))?;

    assert_eq!(game.turn_state, TurnState::Command);
    assert_eq!(game.completion_state, GameCompletionState::Playing);
    assert_eq!(game.player_position(), game.world.start_position());
    assert_eq!(game.player.health(), 10);
    assert_eq!(game.player.held_count(), 0);

    // The entry and its neighbours are already in view
    let tile = game.world.get_tile(game.player_position()).expect("entry is on the map");
    assert!(tile.visible && tile.seen);
    Ok(())
}

#[test]
fn test_version_then_quit() -> CrawlResult<()> {
    let mut game = GameState::new_game(&GenerationConfig::for_testing(7))?;
    let mut ui = ScriptedInterface::new([
        ScriptedInput::Command(Command::Version),
        ScriptedInput::Command(Command::Quit),
        ScriptedInput::Confirm(false),
        ScriptedInput::Command(Command::Quit),
        ScriptedInput::Confirm(true),
    ]);

    let outcome = game.run(&mut ui)?;

    assert_eq!(outcome, GameCompletionState::Quit);
    assert_eq!(ui.remaining(), 0);
    assert_eq!(game.statistics.turns, 3);
    let banner = GameState::version_banner();
    assert_eq!(ui.messages.iter().filter(|m| **m == banner).count(), 2);
    assert!(ui.said("Are you sure you want to quit? (y/n)"));
    assert!(ui.redraws > 0);
    Ok(())
}

#[test]
fn test_bad_key_alerts_and_recovers() -> CrawlResult<()> {
    let mut game = GameState::new(corridor(), Dice::seeded(1));
    let mut ui = ScriptedInterface::new([
        ScriptedInput::Command(Command::Unrecognized),
        ScriptedInput::Command(Command::Fight),
        ScriptedInput::Direction(DirectionInput::Cancelled),
        ScriptedInput::Command(Command::Quit),
        ScriptedInput::Confirm(true),
    ]);

    game.run(&mut ui)?;

    assert_eq!(ui.alerts, 1);
    assert!(ui.said("Unrecognized input."));
    assert!(ui.said("fight in which direction?"));
    Ok(())
}

#[test]
fn test_run_down_the_corridor_and_slay_the_dragon() -> CrawlResult<()> {
    let mut world = corridor();
    let lair = Position::from_row_col(2, 3);
    world.insert_entity(lair, Entity::monster("the", "dragon", MonsterKind::Dragon, 1, 6, 6));

    // The dragon attacks for 6 into a defence of 10; the player attacks for 10 into 6
    let mut game = GameState::new(world, Dice::loaded([0, 0, 5, 5, 5, 5, 0, 0]));
    let mut ui = ScriptedInterface::new([
        ScriptedInput::Command(Command::Run(Direction::South)),
        ScriptedInput::Command(Command::Move(Direction::East)),
        ScriptedInput::Command(Command::FightToDeath),
        ScriptedInput::Direction(DirectionInput::Direction(Direction::Northeast)),
        ScriptedInput::Continue,
    ]);

    let outcome = game.run(&mut ui)?;

    assert_eq!(outcome, GameCompletionState::Won);
    assert!(ui.said("You kill the dragon."));
    assert!(ui.said("You have won!"));
    assert!(ui.said("--press space to continue--"));
    assert_eq!(game.player_position(), lair);
    assert_eq!(game.player.health(), 10);
    assert_eq!(game.statistics.monsters_killed, 1);
    assert_eq!(game.statistics.steps_taken, 5);
    assert!(game.world.entity_at(lair).is_none());
    Ok(())
}

#[test]
fn test_script_running_dry_is_an_error() {
    let mut game = GameState::new(corridor(), Dice::seeded(1));
    let mut ui = ScriptedInterface::new([ScriptedInput::Command(Command::Move(Direction::South))]);

    let result = game.run(&mut ui);

    assert!(matches!(result, Err(CrawlError::InvalidState(_))));
    assert_eq!(game.player_position(), Position::from_row_col(1, 1));
}
