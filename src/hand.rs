//! A single wagered hand within a round.

use crate::error::ActionError;
use crate::result::Outcome;

/// A player's hand for the round being recorded.
///
/// The hand only tracks money: the bet in effect, the bet before a double,
/// and the outcome the operator picked. No cards are dealt here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Hand {
    /// Bet currently in effect.
    bet: f64,
    /// Bet before doubling; set only while the hand is doubled.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    original_bet: Option<f64>,
    /// Recorded outcome.
    outcome: Outcome,
}

pub(crate) fn valid_bet(bet: f64) -> bool {
    bet.is_finite() && bet > 0.0
}

impl Hand {
    /// Creates a new undoubled hand with the given bet and a `lose` outcome.
    ///
    /// Note: This function does not validate the bet; use [`Hand::set_bet`]
    /// for operator input.
    #[must_use]
    pub const fn new(bet: f64) -> Self {
        Self {
            bet,
            original_bet: None,
            outcome: Outcome::Lose,
        }
    }

    /// Returns the bet currently in effect.
    #[must_use]
    pub const fn bet(&self) -> f64 {
        self.bet
    }

    /// Returns the pre-double bet while the hand is doubled.
    #[must_use]
    pub const fn original_bet(&self) -> Option<f64> {
        self.original_bet
    }

    /// Returns the recorded outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns whether the hand is doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.original_bet.is_some()
    }

    /// Returns the bet the player put up before any double.
    #[must_use]
    pub fn base_bet(&self) -> f64 {
        self.original_bet.unwrap_or(self.bet)
    }

    /// Signed amount this hand settles for.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.outcome.amount(self.bet)
    }

    /// Overwrites the bet. A manual edit cancels a pending double.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidBet`] if the bet is not positive and finite.
    pub fn set_bet(&mut self, bet: f64) -> Result<(), ActionError> {
        if !valid_bet(bet) {
            return Err(ActionError::InvalidBet);
        }
        self.bet = bet;
        self.original_bet = None;
        Ok(())
    }

    /// Overwrites the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DoubleOnBlackjack`] when marking a doubled hand
    /// as blackjack.
    pub fn set_outcome(&mut self, outcome: Outcome) -> Result<(), ActionError> {
        if outcome == Outcome::Blackjack && self.is_doubled() {
            return Err(ActionError::DoubleOnBlackjack);
        }
        self.outcome = outcome;
        Ok(())
    }

    /// Doubles the bet, or restores the pre-double bet if already doubled.
    ///
    /// Returns whether the hand is doubled afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DoubleOnBlackjack`] when doubling a hand marked
    /// blackjack. Undoing a double never fails.
    pub fn toggle_double(&mut self) -> Result<bool, ActionError> {
        if let Some(original) = self.original_bet.take() {
            self.bet = original;
            return Ok(false);
        }

        if self.outcome == Outcome::Blackjack {
            return Err(ActionError::DoubleOnBlackjack);
        }

        self.original_bet = Some(self.bet);
        self.bet *= 2.0;
        Ok(true)
    }
}
