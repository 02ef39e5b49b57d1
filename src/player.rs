//! Seated players and their identifiers.

use alloc::string::String;

use crate::hand::valid_bet;
use crate::options::DEFAULT_BET;

/// Opaque player identifier, stable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u64);

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A player seated in a session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Player {
    /// Unique within the session.
    pub id: PlayerId,
    /// Display name, unique within the session ignoring case.
    pub name: String,
    /// Net amount won (positive) or lost (negative) so far.
    pub balance: f64,
    /// Base bet of the player's last committed round.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_bet: Option<f64>,
    /// Payment address transfers to this player should go to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt_pay_id: Option<String>,
}

impl Player {
    /// Creates a player with a zero balance and no betting history.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balance: 0.0,
            last_bet: None,
            prompt_pay_id: None,
        }
    }

    /// Sets the payment address.
    #[must_use]
    pub fn with_prompt_pay(mut self, prompt_pay_id: Option<String>) -> Self {
        self.prompt_pay_id = prompt_pay_id.filter(|id| !id.is_empty());
        self
    }

    /// Returns the bet to seed the next round with.
    ///
    /// Uses `last_bet`, then `default_bet`, then [`DEFAULT_BET`], skipping any
    /// that is not a positive, finite amount.
    ///
    /// ```
    /// use bjledger::{Player, PlayerId};
    ///
    /// let mut player = Player::new(PlayerId(1), "Ann");
    /// assert_eq!(player.next_bet(10.0), 10.0);
    /// assert_eq!(player.next_bet(-10.0), 20.0);
    /// player.last_bet = Some(f64::NAN);
    /// assert_eq!(player.next_bet(10.0), 10.0);
    /// ```
    #[must_use]
    pub fn next_bet(&self, default_bet: f64) -> f64 {
        [self.last_bet, Some(default_bet)]
            .into_iter()
            .flatten()
            .find(|&bet| valid_bet(bet))
            .unwrap_or(DEFAULT_BET)
    }

    /// Returns whether `name` refers to this player, ignoring case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
