use alloc::vec::Vec;

use crate::error::{ActionError, NettingError};
use crate::netting::{Transfer, net_debts_within};
use crate::player::PlayerId;
use crate::result::{LogEntry, Outcome};
use crate::round::RoundLedger;
use crate::session::Session;
use crate::settlement::commit_round;

use super::Table;

impl Table {
    /// Overwrites the bet of a hand, cancelling any pending double.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or the bet is
    /// not a positive, finite amount.
    pub fn set_bet(
        &self,
        player_id: PlayerId,
        hand_index: usize,
        bet: f64,
    ) -> Result<(), ActionError> {
        self.ledger.lock().set_bet(player_id, hand_index, bet)
    }

    /// Records the outcome of a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or a doubled
    /// hand is marked blackjack.
    pub fn set_outcome(
        &self,
        player_id: PlayerId,
        hand_index: usize,
        outcome: Outcome,
    ) -> Result<(), ActionError> {
        self.ledger
            .lock()
            .set_outcome(player_id, hand_index, outcome)
    }

    /// Doubles a hand, or undoes the double. Returns whether the hand is
    /// doubled afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or the hand is
    /// marked blackjack.
    pub fn toggle_double(
        &self,
        player_id: PlayerId,
        hand_index: usize,
    ) -> Result<bool, ActionError> {
        self.ledger.lock().toggle_double(player_id, hand_index)
    }

    /// Splits a player's only hand into two.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found or already split.
    pub fn split(&self, player_id: PlayerId) -> Result<(), ActionError> {
        self.ledger.lock().split(player_id)
    }

    /// Builds the session that results from committing the current round.
    pub(super) fn committed(
        session: &Session,
        ledger: &RoundLedger,
        timestamp: u64,
    ) -> (Session, LogEntry) {
        let commit = commit_round(session, ledger, timestamp);
        let mut next = session.clone();
        next.players = commit.players;
        next.transaction_log.push(commit.entry.clone());
        (next, commit.entry)
    }

    /// Commits the current round and starts the next one.
    ///
    /// Balances and suggested bets are updated, the round is appended to the
    /// transaction log, and the ledger is rebuilt from the new roster.
    /// Returns the log entry for the round.
    pub fn commit_round(&self, timestamp: u64) -> LogEntry {
        let mut session = self.session.lock();
        let mut ledger = self.ledger.lock();

        let (next, entry) = Self::committed(&session, &ledger, timestamp);
        *ledger = RoundLedger::initialize(&next.players, next.dealer_id, self.options.default_bet);
        *session = next;
        entry
    }

    /// Computes the payments that settle the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the balances do not net to zero.
    pub fn settle(&self) -> Result<Vec<Transfer>, NettingError> {
        let session = self.session.lock();
        net_debts_within(&session.players, self.options.settle_epsilon)
    }
}
