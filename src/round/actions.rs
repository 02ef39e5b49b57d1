use crate::error::ActionError;
use crate::hand::Hand;
use crate::player::PlayerId;
use crate::result::Outcome;

use super::RoundLedger;

impl RoundLedger {
    fn hand_mut(
        &mut self,
        player_id: PlayerId,
        hand_index: usize,
    ) -> Result<&mut Hand, ActionError> {
        self.hands
            .get_mut(&player_id)
            .ok_or(ActionError::PlayerNotFound)?
            .get_mut(hand_index)
            .ok_or(ActionError::HandNotFound)
    }

    /// Overwrites the bet of a hand and cancels any pending double.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or the bet is
    /// not a positive, finite amount.
    pub fn set_bet(
        &mut self,
        player_id: PlayerId,
        hand_index: usize,
        bet: f64,
    ) -> Result<(), ActionError> {
        self.hand_mut(player_id, hand_index)?.set_bet(bet)
    }

    /// Records the outcome of a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or a doubled
    /// hand is marked blackjack.
    pub fn set_outcome(
        &mut self,
        player_id: PlayerId,
        hand_index: usize,
        outcome: Outcome,
    ) -> Result<(), ActionError> {
        self.hand_mut(player_id, hand_index)?.set_outcome(outcome)
    }

    /// Doubles a hand, or undoes the double if it is already doubled.
    ///
    /// Returns whether the hand is doubled afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or hand cannot be found, or the hand is
    /// marked blackjack.
    pub fn toggle_double(
        &mut self,
        player_id: PlayerId,
        hand_index: usize,
    ) -> Result<bool, ActionError> {
        self.hand_mut(player_id, hand_index)?.toggle_double()
    }

    /// Splits a player's only hand into two identical hands.
    ///
    /// Both hands start with the same bet, outcome, and double state and are
    /// edited independently afterwards. Only one split per round is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found, or has already split.
    /// The ledger is left unchanged on error.
    pub fn split(&mut self, player_id: PlayerId) -> Result<(), ActionError> {
        let player_hands = self
            .hands
            .get_mut(&player_id)
            .ok_or(ActionError::PlayerNotFound)?;

        let [hand] = player_hands.as_slice() else {
            return Err(ActionError::AlreadySplit);
        };

        let copy = *hand;
        player_hands.push(copy);
        Ok(())
    }
}
