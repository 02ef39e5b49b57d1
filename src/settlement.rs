//! Committing a recorded round to the session balances.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::hand::Hand;
use crate::result::{LogDetail, LogEntry, RoundCommit};
use crate::round::RoundLedger;
use crate::session::Session;

fn describe(hands: &[Hand]) -> String {
    let mut parts = Vec::with_capacity(hands.len());
    for hand in hands {
        if let Some(base) = hand.original_bet() {
            parts.push(format!("{} {:.2} (doubled from {base:.2})", hand.outcome(), hand.bet()));
        } else {
            parts.push(format!("{} {:.2}", hand.outcome(), hand.bet()));
        }
    }
    parts.join(", ")
}

/// Applies a round to the session roster.
///
/// For every non-dealer player in the ledger, the signed amounts of their
/// hands are added to their balance and the first hand's pre-double bet
/// becomes their `last_bet`. The dealer absorbs the negated total, so the
/// balance changes of one round always sum to zero.
///
/// Ledger entries for players no longer seated are skipped. The session is
/// not modified: the caller stores the returned players, appends the log
/// entry, and rebuilds the ledger for the next round.
///
/// # Example
///
/// ```
/// use bjledger::{Outcome, PlayerId, RoundLedger, Session, commit_round};
///
/// let mut session = Session::new("20241005-1", 0, 1.0);
/// session.add_player(PlayerId(1), "Dealer", None).unwrap();
/// session.add_player(PlayerId(2), "Ann", None).unwrap();
///
/// let mut ledger = RoundLedger::initialize(&session.players, session.dealer_id, 20.0);
/// ledger.set_outcome(PlayerId(2), 0, Outcome::Blackjack).unwrap();
///
/// let commit = commit_round(&session, &ledger, 1_000);
/// assert_eq!(commit.players[1].balance, 30.0);
/// assert_eq!(commit.players[0].balance, -30.0);
/// ```
#[must_use]
pub fn commit_round(session: &Session, ledger: &RoundLedger, timestamp: u64) -> RoundCommit {
    let mut players = session.players.clone();
    let mut dealer_net = 0.0;
    let mut details = Vec::with_capacity(players.len());

    for player in &mut players {
        if Some(player.id) == session.dealer_id {
            continue;
        }
        let Some(hands) = ledger.hands(player.id) else {
            continue;
        };
        let Some(first) = hands.first() else {
            continue;
        };

        let total: f64 = hands.iter().map(Hand::amount).sum();
        player.balance += total;
        player.last_bet = Some(first.base_bet());
        dealer_net -= total;

        log::debug!(
            "player {} settles {total:.2} over {} hand(s)",
            player.name,
            hands.len()
        );

        details.push(LogDetail {
            player_id: player.id,
            amount: total,
            description: describe(hands),
        });
    }

    for id in ledger.player_ids() {
        if session.player(id).is_none() {
            log::warn!("skipping ledger entry for unseated player {id}");
        }
    }

    if let Some(dealer) = players
        .iter_mut()
        .find(|p| Some(p.id) == session.dealer_id)
    {
        dealer.balance += dealer_net;
        details.push(LogDetail {
            player_id: dealer.id,
            amount: dealer_net,
            description: String::from("dealer"),
        });
    }

    log::info!(
        "committed round for session {}: {} player(s), dealer net {dealer_net:.2}",
        session.id,
        details.len()
    );

    RoundCommit {
        players,
        dealer_net,
        entry: LogEntry { timestamp, details },
    }
}
