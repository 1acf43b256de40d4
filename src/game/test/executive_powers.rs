//! Executive powers tests (Fascist powers)

use super::super::executive_power::ExecutivePower;
use super::super::membership::Party;
use super::super::{Game, GameOptions, Phase, VoteQuorum, WinCondition};
use super::test_utils::*;
use crate::error::GameError;

/// A seat that is neither the president nor next in the rotation, and is not Hitler.
fn bystander(game: &Game) -> usize {
    let president = president(game);
    let next = game.next_player(president);
    (0..game.num_players())
        .find(|&i| i != president && i != next && game.players[i].alive && !game.players[i].is_hitler())
        .unwrap()
}

#[test]
fn test_power_tracks() {
    let (game, _) = create_test_game(5, 1);
    assert_eq!(game.board.power_track[2], Some(ExecutivePower::PolicyPeek));
    assert_eq!(game.board.power_track[3], Some(ExecutivePower::Execution));

    let (game, _) = create_test_game(7, 1);
    assert_eq!(game.board.power_track[1], Some(ExecutivePower::InvestigateLoyalty));
    assert_eq!(game.board.power_track[2], Some(ExecutivePower::SpecialElection));

    let (game, _) = create_test_game(9, 1);
    assert_eq!(game.board.power_track[0], Some(ExecutivePower::InvestigateLoyalty));
}

#[test]
fn test_investigate_player() {
    let (mut game, sink) = create_test_game(7, 5);
    game.board.fascist_cards = 1;
    play_round(&mut game, Party::Fascist);
    assert_eq!(game.phase(), Phase::PresidentInvestigatePlayer);

    let investigator = president(&game);
    let suspect = bystander(&game);
    let party = game.players[suspect].party().unwrap();
    game.investigate_player(&president_id(&game), &id_of(&game, suspect)).unwrap();

    let told = private_messages(&game, &sink, investigator);
    assert_eq!(
        told.last().unwrap(),
        &format!("{} is a member of the {} party.", game.players[suspect].name, party)
    );
    assert_eq!(game.investigated, vec![suspect]);
    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert_eq!(president(&game), game.next_player(investigator));

    // A player can only be investigated once per game
    game.set_phase(Phase::PresidentInvestigatePlayer);
    assert_eq!(
        game.investigate_player(&president_id(&game), &id_of(&game, suspect)),
        Err(GameError::AlreadyInvestigated(game.players[suspect].name.clone()))
    );
}

#[test]
fn test_investigate_errors() {
    let (mut game, _) = create_test_game(7, 5);
    let president = president_id(&game);
    let suspect = id_of(&game, bystander(&game));
    assert_eq!(game.investigate_player(&president, &suspect), Err(GameError::InvalidAction));

    game.board.fascist_cards = 1;
    play_round(&mut game, Party::Fascist);
    let president = president_id(&game);

    assert_eq!(game.investigate_player(&suspect, &president), Err(GameError::NotYourTurn));
    assert_eq!(game.investigate_player(&president, &president), Err(GameError::CannotTargetSelf));
    assert_eq!(
        game.investigate_player(&president, "nobody"),
        Err(GameError::PlayerNotFound("nobody".to_string()))
    );

    let dead = bystander(&game);
    game.players[dead].alive = false;
    assert_eq!(
        game.investigate_player(&president, &id_of(&game, dead)),
        Err(GameError::DeadPlayer(game.players[dead].name.clone()))
    );
    assert!(game.investigated.is_empty());
    assert_eq!(game.phase(), Phase::PresidentInvestigatePlayer);
}

#[test]
fn test_special_election() {
    let (mut game, sink) = create_test_game(7, 9);
    game.board.fascist_cards = 2;
    play_round(&mut game, Party::Fascist);
    assert_eq!(game.phase(), Phase::SpeciallyElectPresident);

    let caller = president(&game);
    let chosen = bystander(&game);
    game.specially_elect_president(&president_id(&game), &id_of(&game, chosen)).unwrap();

    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert_eq!(president(&game), chosen);
    assert_eq!(game.previous_government.unwrap().president, caller);
    assert!(table_text(&sink).contains("has called a special election"));

    // Once the special president's term ends the rotation resumes after the caller
    reject_government(&mut game);
    assert_eq!(president(&game), game.next_player(caller));
}

#[test]
fn test_special_election_errors() {
    let (mut game, _) = create_test_game(7, 9);
    game.board.fascist_cards = 2;
    play_round(&mut game, Party::Fascist);
    let president = president_id(&game);

    assert_eq!(game.specially_elect_president(&president, &president), Err(GameError::CannotTargetSelf));

    let dead = bystander(&game);
    game.players[dead].alive = false;
    assert_eq!(
        game.specially_elect_president(&president, &id_of(&game, dead)),
        Err(GameError::DeadPlayer(game.players[dead].name.clone()))
    );
    assert_eq!(game.phase(), Phase::SpeciallyElectPresident);
}

#[test]
fn test_execution() {
    let opts = GameOptions { vote_quorum: VoteQuorum::Living, ..GameOptions::default() };
    let (mut game, sink) = create_test_game_with(opts, 5, 3);
    game.board.fascist_cards = 3;
    play_round(&mut game, Party::Fascist);
    assert_eq!(game.phase(), Phase::PresidentShootPlayer);

    let executioner = president(&game);
    let next = game.next_player(executioner);
    let victim = if game.players[next].is_hitler() { bystander(&game) } else { next };
    game.shoot_player(&president_id(&game), &id_of(&game, victim)).unwrap();

    assert!(!game.players[victim].alive);
    assert!(game.players[victim].not_hitler);
    assert_eq!(game.num_players_alive(), 4);
    assert!(table_text(&sink).contains(&format!("{} was not Hitler.", game.players[victim].name)));
    assert_eq!(game.phase(), Phase::NominateChancellor);
    // The dead player's turn as president is skipped
    assert_ne!(president(&game), victim);
    assert_eq!(president(&game), game.next_player(executioner));

    // The dead cannot act
    let dead = id_of(&game, victim);
    let nominee = id_of(&game, pick_nominee(&game));
    game.nominate_chancellor(&president_id(&game), &nominee).unwrap();
    assert_eq!(
        game.vote_on_nomination(&dead, "ja"),
        Err(GameError::DeadPlayer(game.players[victim].name.clone()))
    );
}

#[test]
fn test_execution_errors() {
    let (mut game, _) = create_test_game(5, 3);
    game.board.fascist_cards = 3;
    play_round(&mut game, Party::Fascist);
    let president = president_id(&game);

    assert_eq!(game.shoot_player(&president, &president), Err(GameError::CannotTargetSelf));

    let dead = bystander(&game);
    game.players[dead].alive = false;
    assert_eq!(
        game.shoot_player(&president, &id_of(&game, dead)),
        Err(GameError::DeadPlayer(game.players[dead].name.clone()))
    );
    assert_eq!(game.phase(), Phase::PresidentShootPlayer);
}

#[test]
fn test_executing_hitler_ends_the_game() {
    let (mut game, sink) = create_standard_5_player_game();
    let hitler = game.hitler().unwrap();
    if president(&game) == hitler {
        game.president = Some(game.next_player(hitler));
    }
    game.board.fascist_cards = 3;
    play_round(&mut game, Party::Fascist);
    assert_eq!(game.phase(), Phase::PresidentShootPlayer);

    game.shoot_player(&president_id(&game), &id_of(&game, hitler)).unwrap();

    assert_eq!(game.outcome(), Some(WinCondition::HitlerExecuted));
    assert_eq!(game.phase(), Phase::Finished);
    assert!(!game.is_running());
    let table = table_text(&sink);
    assert!(table.contains("The liberals win!"));
    assert!(!table.contains("was not Hitler"));
}
