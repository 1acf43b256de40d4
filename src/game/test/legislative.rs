//! Tests for the legislative session: drawing, discarding, enacting and vetoing policies.

use super::super::government::Government;
use super::super::membership::Party;
use super::super::{Game, GameOptions, Phase};
use super::test_utils::*;
use crate::error::GameError;

#[test]
fn test_legislative_session() {
    let (mut game, sink) = create_standard_5_player_game();
    reject_government(&mut game);
    assert_eq!(game.board.election_tracker, 1);

    let chancellor = pick_nominee(&game);
    elect(&mut game, chancellor);
    game.deck.arrange_top(&[Party::Fascist, Party::Liberal, Party::Liberal]);

    let president_seat = president(&game);
    let president = president_id(&game);
    game.draw_policies(&president).unwrap();
    assert_eq!(game.phase(), Phase::PresidentDiscardPolicy);
    assert_eq!(game.drawn_policies, vec![Party::Fascist, Party::Liberal, Party::Liberal]);
    assert_eq!(game.deck.count(), 15);
    let hand = private_messages(&game, &sink, president_seat).join("\n");
    assert!(hand.contains("1: Fascist\n2: Liberal\n3: Liberal"));

    game.discard_policy(&president, "1").unwrap();
    assert_eq!(game.phase(), Phase::ChancellorDiscardPolicy);
    assert_eq!(game.drawn_policies, vec![Party::Liberal, Party::Liberal]);
    assert!(game.players[chancellor].pending_discard);
    let passed = private_messages(&game, &sink, chancellor).join("\n");
    assert!(passed.contains("Policies from the president"));

    game.discard_policy(&chancellor_id(&game), "1").unwrap();
    assert_eq!(game.board.liberal_cards, 1);
    assert_eq!(game.board.fascist_cards, 0);
    assert_eq!(game.board.election_tracker, 0);
    assert_eq!(game.deck.discard_count(), 2);
    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert!(table_text(&sink).contains("A Liberal policy has been enacted"));
}

#[test]
fn test_policy_cards_are_conserved() {
    let (mut game, _) = create_standard_5_player_game();
    let chancellor = pick_nominee(&game);
    elect(&mut game, chancellor);
    assert_eq!(total_policies(&game), 18);

    let president = president_id(&game);
    game.draw_policies(&president).unwrap();
    assert_eq!(total_policies(&game), 18);
    game.discard_policy(&president, "2").unwrap();
    assert_eq!(total_policies(&game), 18);
    game.discard_policy(&chancellor_id(&game), "2").unwrap();
    assert_eq!(total_policies(&game), 18);

    for _ in 0..3 {
        play_round(&mut game, Party::Liberal);
        assert_eq!(total_policies(&game), 18);
    }
}

#[test]
fn test_draw_errors() {
    let (mut game, _) = create_standard_5_player_game();
    let president = president_id(&game);
    assert_eq!(game.draw_policies(&president), Err(GameError::InvalidAction));

    let chancellor = pick_nominee(&game);
    elect(&mut game, chancellor);
    assert_eq!(game.draw_policies(&chancellor_id(&game)), Err(GameError::NotYourTurn));
    assert_eq!(game.deck.count(), 18);

    game.draw_policies(&president).unwrap();
    assert_eq!(game.draw_policies(&president), Err(GameError::InvalidAction));
    assert_eq!(game.deck.count(), 15);
}

#[test]
fn test_discard_errors() {
    let (mut game, _) = create_standard_5_player_game();
    let president = president_id(&game);
    assert_eq!(game.discard_policy(&president, "1"), Err(GameError::InvalidAction));

    let chancellor = pick_nominee(&game);
    elect(&mut game, chancellor);
    let chancellor = chancellor_id(&game);
    game.draw_policies(&president).unwrap();

    assert_eq!(game.discard_policy(&chancellor, "1"), Err(GameError::NotYourTurn));
    for choice in ["0", "4", "one", ""] {
        assert_eq!(game.discard_policy(&president, choice), Err(GameError::InvalidCard(3)));
    }
    assert_eq!(game.drawn_policies.len(), 3);

    game.discard_policy(&president, " 3 ").unwrap();
    assert_eq!(game.discard_policy(&president, "1"), Err(GameError::NotYourTurn));
    assert_eq!(game.discard_policy(&chancellor, "3"), Err(GameError::InvalidCard(2)));
    assert_eq!(game.drawn_policies.len(), 2);
}

#[test]
fn test_discards_shuffled_back_when_deck_runs_low() {
    let (mut game, sink) = create_standard_5_player_game();
    for _ in 0..16 {
        let card = game.deck.draw_one().unwrap();
        game.deck.discard(card);
    }
    assert_eq!(game.deck.count(), 2);

    let chancellor = pick_nominee(&game);
    elect(&mut game, chancellor);
    game.draw_policies(&president_id(&game)).unwrap();

    assert!(table_text(&sink).contains("The discard pile has been shuffled back into the deck."));
    assert_eq!(game.deck.count(), 15);
    assert_eq!(game.deck.discard_count(), 0);
    assert_eq!(total_policies(&game), 18);
}

/// Elects a government and plays up to the chancellor's discard.
fn to_chancellor_discard(game: &mut Game) {
    let chancellor = pick_nominee(game);
    elect(game, chancellor);
    let president = president_id(game);
    game.draw_policies(&president).unwrap();
    game.discard_policy(&president, "1").unwrap();
    assert_eq!(game.phase(), Phase::ChancellorDiscardPolicy);
}

#[test]
fn test_veto_accepted() {
    let (mut game, sink) = create_standard_5_player_game();
    let first_president = president(&game);
    to_chancellor_discard(&mut game);
    let chancellor = chancellor_id(&game);

    game.veto_policies(&chancellor).unwrap();
    assert_eq!(game.phase(), Phase::ChancellorVetoRequested);
    assert!(game.veto_requested);
    assert!(private_messages(&game, &sink, first_president)
        .last()
        .unwrap()
        .contains("wants to veto"));

    game.consent_veto_request(&president_id(&game), "ja").unwrap();
    assert!(!game.veto_requested);
    assert!(game.drawn_policies.is_empty());
    assert_eq!(game.deck.discard_count(), 3);
    assert_eq!(game.board.election_tracker, 1);
    assert_eq!(game.board.liberal_cards + game.board.fascist_cards, 0);
    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert_eq!(president(&game), (first_president + 1) % 5);
    assert_eq!(total_policies(&game), 18);
}

#[test]
fn test_veto_refused() {
    let (mut game, _) = create_standard_5_player_game();
    to_chancellor_discard(&mut game);
    let chancellor = chancellor_id(&game);
    let president = president_id(&game);

    game.veto_policies(&chancellor).unwrap();
    game.consent_veto_request(&president, "nein").unwrap();
    assert!(!game.veto_requested);
    assert_eq!(game.phase(), Phase::ChancellorDiscardPolicy);
    assert_eq!(game.drawn_policies.len(), 2);

    // Only one veto may be proposed per agenda
    assert_eq!(game.veto_policies(&chancellor), Err(GameError::VetoUnavailable));

    game.discard_policy(&chancellor, "1").unwrap();
    assert_eq!(game.board.liberal_cards + game.board.fascist_cards, 1);
}

#[test]
fn test_veto_errors() {
    let (mut game, _) = create_standard_5_player_game();
    let president = president_id(&game);
    assert_eq!(game.veto_policies(&president), Err(GameError::InvalidAction));

    to_chancellor_discard(&mut game);
    let chancellor = chancellor_id(&game);
    assert_eq!(game.veto_policies(&president), Err(GameError::NotYourTurn));
    assert_eq!(game.consent_veto_request(&president, "ja"), Err(GameError::InvalidAction));

    game.veto_policies(&chancellor).unwrap();
    assert_eq!(game.consent_veto_request(&chancellor, "ja"), Err(GameError::NotYourTurn));
    assert_eq!(game.consent_veto_request(&president, "perhaps"), Err(GameError::UnrecognizedChoice));
    assert_eq!(game.discard_policy(&chancellor, "1"), Err(GameError::InvalidAction));
    assert_eq!(game.phase(), Phase::ChancellorVetoRequested);
}

#[test]
fn test_veto_locked_until_five_fascist_policies() {
    let opts = GameOptions { veto_requires_unlock: true, ..GameOptions::default() };
    let (mut game, _) = create_test_game_with(opts, 5, 42);
    to_chancellor_discard(&mut game);
    assert_eq!(game.veto_policies(&chancellor_id(&game)), Err(GameError::VetoUnavailable));

    let (mut game, _) = create_test_game_with(opts, 5, 42);
    game.board.fascist_cards = 5;
    to_chancellor_discard(&mut game);
    game.veto_policies(&chancellor_id(&game)).unwrap();
    assert_eq!(game.phase(), Phase::ChancellorVetoRequested);
}

#[test]
fn test_veto_can_cause_chaos() {
    let (mut game, sink) = create_standard_5_player_game();
    to_chancellor_discard(&mut game);
    game.board.election_tracker = 2;
    let president_seat = president(&game);
    let chancellor_seat = game.chancellor.unwrap();

    game.veto_policies(&chancellor_id(&game)).unwrap();
    game.consent_veto_request(&president_id(&game), "ja").unwrap();

    assert!(table_text(&sink).contains("The country is thrown into chaos"));
    assert_eq!(game.board.election_tracker, 0);
    assert_eq!(game.board.liberal_cards + game.board.fascist_cards, 1);
    assert_eq!(
        game.previous_government,
        Some(Government { president: president_seat, chancellor: Some(chancellor_seat) })
    );
    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert_eq!(total_policies(&game), 18);
}

#[test]
fn test_policy_peek() {
    let (mut game, sink) = create_standard_5_player_game();
    let first_president = president(&game);
    game.board.fascist_cards = 2;

    play_round(&mut game, Party::Fascist);

    assert_eq!(game.board.fascist_cards, 3);
    let peeked = game.deck.peek_three();
    let told = private_messages(&game, &sink, first_president).join("\n");
    let expected = format!("1: {}\n2: {}\n3: {}", peeked[0], peeked[1], peeked[2]);
    assert!(told.contains("The top three policies"));
    assert!(told.contains(&expected));
    assert!(table_text(&sink).contains("has looked at the top three policies"));

    // The peek resolves on its own and the presidency moves on
    assert_eq!(game.phase(), Phase::NominateChancellor);
    assert_ne!(president(&game), first_president);
    assert_eq!(game.deck.count(), 15);
}
