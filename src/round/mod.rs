//! The working set of hands for the round being recorded.

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::hand::Hand;
use crate::player::{Player, PlayerId};

mod actions;

/// Hands for every non-dealer player in the current round.
///
/// A ledger lives for exactly one round. It is rebuilt from the roster after
/// each commit and whenever the set of non-dealer players changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundLedger {
    /// Player hands (`player_id` -> one hand, or two after a split).
    hands: HashMap<PlayerId, Vec<Hand>>,
}

impl RoundLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh ledger with one `lose` hand per non-dealer player.
    ///
    /// Each hand is seeded with the player's `last_bet`, or `default_bet` if
    /// the player has not finished a round yet. Seeds that are not positive,
    /// finite amounts are skipped, see [`Player::next_bet`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjledger::{Player, PlayerId, RoundLedger};
    ///
    /// let players = [Player::new(PlayerId(1), "Ann"), Player::new(PlayerId(2), "Bo")];
    /// let ledger = RoundLedger::initialize(&players, Some(PlayerId(2)), 20.0);
    /// assert_eq!(ledger.len(), 1);
    /// assert_eq!(ledger.hands(PlayerId(1)).map(<[_]>::len), Some(1));
    /// ```
    #[must_use]
    pub fn initialize(players: &[Player], dealer_id: Option<PlayerId>, default_bet: f64) -> Self {
        let hands = players
            .iter()
            .filter(|p| Some(p.id) != dealer_id)
            .map(|p| (p.id, alloc::vec![Hand::new(p.next_bet(default_bet))]))
            .collect();

        Self { hands }
    }

    /// Returns whether this ledger holds exactly the non-dealer players of
    /// the given roster.
    #[must_use]
    pub fn covers(&self, players: &[Player], dealer_id: Option<PlayerId>) -> bool {
        let mut seated = 0;
        for player in players.iter().filter(|p| Some(p.id) != dealer_id) {
            if !self.hands.contains_key(&player.id) {
                return false;
            }
            seated += 1;
        }
        seated == self.hands.len()
    }

    /// Returns the player's hands, if the player is in this round.
    #[must_use]
    pub fn hands(&self, player_id: PlayerId) -> Option<&[Hand]> {
        self.hands.get(&player_id).map(Vec::as_slice)
    }

    /// Returns the ids of every player in this round, in no particular order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.hands.keys().copied()
    }

    /// Returns the number of players in this round.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Returns whether no player is in this round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}
