//! Round ledger and round commit tests.

#![allow(clippy::float_cmp)]

use bjledger::{
    ActionError, Hand, Outcome, Player, PlayerId, RoundLedger, Session, commit_round,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEALER: PlayerId = PlayerId(100);
const ANN: PlayerId = PlayerId(1);
const BO: PlayerId = PlayerId(2);

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Ann and Bo seated with Dee dealing.
fn table_session() -> Session {
    let mut session = Session::new("20241005-1", 0, 1.0);
    session.add_player(DEALER, "Dee", None).unwrap();
    session.add_player(ANN, "Ann", None).unwrap();
    session.add_player(BO, "Bo", None).unwrap();
    session
}

fn ledger_for(session: &Session) -> RoundLedger {
    RoundLedger::initialize(&session.players, session.dealer_id, 20.0)
}

fn balance(players: &[Player], id: PlayerId) -> f64 {
    players.iter().find(|p| p.id == id).unwrap().balance
}

#[test]
fn initialize_seeds_one_losing_hand_per_non_dealer() {
    let mut session = table_session();
    session.players[2].last_bet = Some(35.0);

    let ledger = ledger_for(&session);
    assert_eq!(ledger.len(), 2);
    assert!(ledger.hands(DEALER).is_none());

    let ann = ledger.hands(ANN).unwrap();
    assert_eq!(ann.len(), 1);
    assert_eq!(ann[0].bet(), 20.0);
    assert_eq!(ann[0].outcome(), Outcome::Lose);
    assert_eq!(ann[0].original_bet(), None);

    assert_eq!(ledger.hands(BO).unwrap()[0].bet(), 35.0);
}

#[test]
fn initialize_skips_seeds_that_are_not_valid_bets() {
    let mut session = table_session();
    session.players[2].last_bet = Some(f64::NAN);

    let ledger = RoundLedger::initialize(&session.players, session.dealer_id, -20.0);
    assert_eq!(ledger.hands(ANN).unwrap()[0].bet(), 20.0);
    assert_eq!(ledger.hands(BO).unwrap()[0].bet(), 20.0);

    session.players[1].last_bet = Some(-5.0);
    session.players[2].last_bet = Some(0.0);
    let ledger = RoundLedger::initialize(&session.players, session.dealer_id, 15.0);
    assert_eq!(ledger.hands(ANN).unwrap()[0].bet(), 15.0);
    assert_eq!(ledger.hands(BO).unwrap()[0].bet(), 15.0);

    let players = commit_round(&session, &ledger, 0).players;
    assert_eq!(balance(&players, ANN), -15.0);
    assert_eq!(balance(&players, DEALER), 30.0);
}

#[test]
fn covers_tracks_the_non_dealer_roster() {
    let mut session = table_session();
    let ledger = ledger_for(&session);
    assert!(ledger.covers(&session.players, session.dealer_id));

    session.add_player(PlayerId(3), "Cy", None).unwrap();
    assert!(!ledger.covers(&session.players, session.dealer_id));

    let session = table_session();
    assert!(!ledger.covers(&session.players, Some(ANN)));
}

#[test]
fn payout_table_for_single_hand() {
    let cases = [
        (Outcome::Win, 20.0),
        (Outcome::Lose, -20.0),
        (Outcome::Push, 0.0),
        (Outcome::Blackjack, 30.0),
    ];

    for (outcome, expected) in cases {
        let session = table_session();
        let mut ledger = ledger_for(&session);
        ledger.set_outcome(ANN, 0, outcome).unwrap();
        ledger.set_outcome(BO, 0, Outcome::Push).unwrap();

        let commit = commit_round(&session, &ledger, 0);
        assert_eq!(balance(&commit.players, ANN), expected, "{outcome}");
        assert_eq!(balance(&commit.players, DEALER), -expected, "{outcome}");
    }
}

#[test]
fn set_bet_cancels_double_and_rejects_bad_amounts() {
    let session = table_session();
    let mut ledger = ledger_for(&session);

    assert!(ledger.toggle_double(ANN, 0).unwrap());
    assert_eq!(ledger.hands(ANN).unwrap()[0].bet(), 40.0);

    ledger.set_bet(ANN, 0, 15.0).unwrap();
    let hand = ledger.hands(ANN).unwrap()[0];
    assert_eq!(hand.bet(), 15.0);
    assert!(!hand.is_doubled());

    assert_eq!(ledger.set_bet(ANN, 0, 0.0), Err(ActionError::InvalidBet));
    assert_eq!(ledger.set_bet(ANN, 0, -5.0), Err(ActionError::InvalidBet));
    assert_eq!(ledger.set_bet(ANN, 0, f64::NAN), Err(ActionError::InvalidBet));
    assert_eq!(ledger.hands(ANN).unwrap()[0].bet(), 15.0);
}

#[test]
fn double_toggle_is_an_involution() {
    let mut hand = Hand::new(12.5);
    hand.set_outcome(Outcome::Win).unwrap();
    let before = hand;

    assert!(hand.toggle_double().unwrap());
    assert_eq!(hand.bet(), 25.0);
    assert_eq!(hand.original_bet(), Some(12.5));

    assert!(!hand.toggle_double().unwrap());
    assert_eq!(hand, before);
}

#[test]
fn blackjack_and_double_are_exclusive() {
    let mut hand = Hand::new(20.0);
    hand.set_outcome(Outcome::Blackjack).unwrap();
    assert_eq!(hand.toggle_double(), Err(ActionError::DoubleOnBlackjack));
    assert_eq!(hand.bet(), 20.0);

    let mut doubled = Hand::new(20.0);
    doubled.toggle_double().unwrap();
    assert_eq!(
        doubled.set_outcome(Outcome::Blackjack),
        Err(ActionError::DoubleOnBlackjack)
    );
    assert_eq!(doubled.outcome(), Outcome::Lose);

    // Undoing a double stays possible whatever the outcome.
    doubled.set_outcome(Outcome::Win).unwrap();
    assert!(!doubled.toggle_double().unwrap());
}

#[test]
fn split_copies_the_hand_once() {
    let session = table_session();
    let mut ledger = ledger_for(&session);
    ledger.set_bet(ANN, 0, 30.0).unwrap();
    ledger.toggle_double(ANN, 0).unwrap();

    ledger.split(ANN).unwrap();
    let hands = ledger.hands(ANN).unwrap();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0], hands[1]);
    assert_eq!(hands[1].original_bet(), Some(30.0));

    assert_eq!(ledger.split(ANN), Err(ActionError::AlreadySplit));
    assert_eq!(ledger.hands(ANN).unwrap().len(), 2);

    ledger.set_outcome(ANN, 1, Outcome::Push).unwrap();
    let hands = ledger.hands(ANN).unwrap();
    assert_eq!(hands[0].outcome(), Outcome::Lose);
    assert_eq!(hands[1].outcome(), Outcome::Push);
}

#[test]
fn actions_on_missing_entries_fail() {
    let session = table_session();
    let mut ledger = ledger_for(&session);

    assert_eq!(ledger.split(DEALER), Err(ActionError::PlayerNotFound));
    assert_eq!(ledger.toggle_double(ANN, 1), Err(ActionError::HandNotFound));
    assert_eq!(
        ledger.set_outcome(PlayerId(9), 0, Outcome::Win),
        Err(ActionError::PlayerNotFound)
    );
}

#[test]
fn split_with_one_win_and_one_loss_nets_zero() {
    let session = table_session();
    let mut ledger = ledger_for(&session);
    ledger.split(ANN).unwrap();
    ledger.set_outcome(ANN, 0, Outcome::Win).unwrap();
    ledger.set_outcome(ANN, 1, Outcome::Lose).unwrap();
    ledger.set_outcome(BO, 0, Outcome::Push).unwrap();

    let commit = commit_round(&session, &ledger, 0);
    assert_eq!(balance(&commit.players, ANN), 0.0);
    assert_eq!(balance(&commit.players, DEALER), 0.0);
}

#[test]
fn last_bet_uses_first_hand_before_double() {
    let session = table_session();
    let mut ledger = ledger_for(&session);
    ledger.set_bet(ANN, 0, 25.0).unwrap();
    ledger.toggle_double(ANN, 0).unwrap();
    ledger.set_outcome(ANN, 0, Outcome::Win).unwrap();

    ledger.set_bet(BO, 0, 10.0).unwrap();
    ledger.split(BO).unwrap();
    ledger.set_bet(BO, 1, 80.0).unwrap();
    ledger.set_outcome(BO, 1, Outcome::Blackjack).unwrap();

    let commit = commit_round(&session, &ledger, 0);
    let ann = commit.players.iter().find(|p| p.id == ANN).unwrap();
    let bo = commit.players.iter().find(|p| p.id == BO).unwrap();
    assert_eq!(ann.balance, 50.0);
    assert_eq!(ann.last_bet, Some(25.0));
    assert_eq!(bo.balance, -10.0 + 120.0);
    assert_eq!(bo.last_bet, Some(10.0));

    let dealer = commit.players.iter().find(|p| p.id == DEALER).unwrap();
    assert_eq!(dealer.last_bet, None);

    let next = RoundLedger::initialize(&commit.players, session.dealer_id, 20.0);
    assert_eq!(next.hands(ANN).unwrap()[0].bet(), 25.0);
    assert_eq!(next.hands(BO).unwrap().len(), 1);
}

#[test]
fn balances_accumulate_across_rounds() {
    let mut session = table_session();
    for _ in 0..3 {
        let mut ledger = ledger_for(&session);
        ledger.set_outcome(ANN, 0, Outcome::Win).unwrap();
        session.players = commit_round(&session, &ledger, 0).players;
    }

    assert_eq!(session.player(ANN).unwrap().balance, 60.0);
    assert_eq!(session.player(BO).unwrap().balance, -60.0);
    assert_eq!(session.player(DEALER).unwrap().balance, 0.0);
}

#[test]
fn unseated_ledger_entries_are_skipped() {
    let mut session = table_session();
    let mut ledger = ledger_for(&session);
    ledger.set_outcome(BO, 0, Outcome::Win).unwrap();
    session.remove_player(BO).unwrap();

    let commit = commit_round(&session, &ledger, 0);
    assert_eq!(commit.players.len(), 2);
    assert_eq!(balance(&commit.players, ANN), -20.0);
    assert_eq!(balance(&commit.players, DEALER), 20.0);
    assert!(commit.entry.detail_for(BO).is_none());
}

#[test]
fn no_dealer_leaves_dealer_net_unapplied() {
    let mut session = table_session();
    session.set_dealer(None).unwrap();
    let mut ledger = ledger_for(&session);
    assert_eq!(ledger.len(), 3);
    ledger.set_outcome(ANN, 0, Outcome::Win).unwrap();

    let commit = commit_round(&session, &ledger, 0);
    assert_eq!(commit.dealer_net, 20.0);
    assert_eq!(balance(&commit.players, DEALER), -20.0);
    assert_eq!(commit.entry.details.len(), 3);
}

#[test]
fn commit_writes_an_audit_entry() {
    let session = table_session();
    let mut ledger = ledger_for(&session);
    ledger.toggle_double(ANN, 0).unwrap();
    ledger.set_outcome(ANN, 0, Outcome::Win).unwrap();

    let commit = commit_round(&session, &ledger, 1_700_000_000_000);
    let entry = &commit.entry;
    assert_eq!(entry.timestamp, 1_700_000_000_000);
    assert_eq!(entry.details.len(), 3);

    let ann = entry.detail_for(ANN).unwrap();
    assert_eq!(ann.amount, 40.0);
    assert_eq!(ann.description, "win 40.00 (doubled from 20.00)");

    let bo = entry.detail_for(BO).unwrap();
    assert_eq!(bo.amount, -20.0);
    assert_eq!(bo.description, "lose 20.00");

    let dealer = entry.details.last().unwrap();
    assert_eq!(dealer.player_id, DEALER);
    assert_eq!(dealer.amount, -20.0);
}

#[test]
fn rounds_are_zero_sum() {
    let outcomes = [Outcome::Win, Outcome::Lose, Outcome::Push, Outcome::Blackjack];
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..200 {
        let seats = rng.random_range(2..7_u64);
        let mut session = Session::new("zero-sum", 0, 1.0);
        for id in 0..seats {
            session
                .add_player(PlayerId(id), &format!("p{id}"), None)
                .unwrap();
        }
        session
            .set_dealer(Some(PlayerId(rng.random_range(0..seats))))
            .unwrap();

        let mut ledger = ledger_for(&session);
        let ids: Vec<PlayerId> = ledger.player_ids().collect();
        for id in ids {
            ledger
                .set_bet(id, 0, f64::from(rng.random_range(1..200_u32)) * 0.5)
                .unwrap();
            if rng.random_bool(0.3) {
                ledger.split(id).unwrap();
            }
            let hands = ledger.hands(id).unwrap().len();
            for index in 0..hands {
                if rng.random_bool(0.4) {
                    ledger.toggle_double(id, index).unwrap();
                }
                let outcome = outcomes[rng.random_range(0..outcomes.len())];
                if outcome == Outcome::Blackjack && ledger.hands(id).unwrap()[index].is_doubled() {
                    continue;
                }
                ledger.set_outcome(id, index, outcome).unwrap();
            }
        }

        let before: f64 = session.total_balance();
        let commit = commit_round(&session, &ledger, 0);
        let after: f64 = commit.players.iter().map(|p| p.balance).sum();
        assert!(approx(before, after), "{before} != {after}");
    }
}
