//! Hand outcomes and round result types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::player::{Player, PlayerId};

/// Blackjack pays 3:2.
pub const BLACKJACK_PAYS: f64 = 1.5;

/// Outcome the operator records for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    /// Player beats the dealer.
    Win,
    /// Dealer beats the player. Every hand starts here.
    #[default]
    Lose,
    /// Tie, the bet is returned.
    Push,
    /// Natural 21, paid 3:2.
    Blackjack,
}

impl Outcome {
    /// Returns the signed amount the player nets on a hand with this outcome.
    ///
    /// ```
    /// use bjledger::Outcome;
    ///
    /// assert_eq!(Outcome::Win.amount(20.0), 20.0);
    /// assert_eq!(Outcome::Lose.amount(20.0), -20.0);
    /// assert_eq!(Outcome::Push.amount(20.0), 0.0);
    /// assert_eq!(Outcome::Blackjack.amount(20.0), 30.0);
    /// ```
    #[must_use]
    pub fn amount(self, bet: f64) -> f64 {
        match self {
            Self::Win => bet,
            Self::Lose => -bet,
            Self::Push => 0.0,
            Self::Blackjack => bet * BLACKJACK_PAYS,
        }
    }

    /// Lowercase label, as stored in session documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Push => "push",
            Self::Blackjack => "blackjack",
        }
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's line in a transaction log entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LogDetail {
    /// The player the amount was applied to.
    pub player_id: PlayerId,
    /// Signed balance change for the round.
    pub amount: f64,
    /// Human-readable summary of the hands behind the amount.
    pub description: String,
}

/// Audit record of one committed round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Commit time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Per-player balance changes, non-dealers in roster order, dealer last.
    pub details: Vec<LogDetail>,
}

impl LogEntry {
    /// Returns the detail recorded for the given player, if any.
    #[must_use]
    pub fn detail_for(&self, player_id: PlayerId) -> Option<&LogDetail> {
        self.details.iter().find(|d| d.player_id == player_id)
    }
}

/// Result of committing a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundCommit {
    /// The full roster with balances and suggested bets updated.
    pub players: Vec<Player>,
    /// Negated sum of the non-dealer totals, applied to the dealer if one is
    /// designated.
    pub dealer_net: f64,
    /// Audit record to append to the session's transaction log.
    pub entry: LogEntry,
}
