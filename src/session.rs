//! The session aggregate: roster, dealer designation, and transaction log.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::RosterError;
use crate::player::{Player, PlayerId};
use crate::result::{LogDetail, LogEntry};

/// Returns the id for the next session started on the given day.
///
/// Session ids are the date prefix (`YYYYMMDD`) followed by a one-based
/// counter of sessions started that day.
///
/// ```
/// use bjledger::session::next_session_id;
///
/// assert_eq!(next_session_id("20241005", 0), "20241005-1");
/// assert_eq!(next_session_id("20241005", 2), "20241005-3");
/// ```
#[must_use]
pub fn next_session_id(date_prefix: &str, sessions_today: usize) -> String {
    format!("{date_prefix}-{}", sessions_today + 1)
}

/// A blackjack session as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Session {
    /// Session id, see [`next_session_id`].
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Seated players in the order they joined.
    pub players: Vec<Player>,
    /// The player currently acting as dealer.
    pub dealer_id: Option<PlayerId>,
    /// Currency value of one chip.
    pub chip_value: f64,
    /// One entry per committed round, oldest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transaction_log: Vec<LogEntry>,
}

impl Session {
    /// Creates an empty session with no dealer.
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: u64, chip_value: f64) -> Self {
        Self {
            id: id.into(),
            created_at,
            players: Vec::new(),
            dealer_id: None,
            chip_value,
            transaction_log: Vec::new(),
        }
    }

    /// Returns the player with the given id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Returns the player with the given name, ignoring case.
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.has_name(name))
    }

    /// Returns the current dealer.
    #[must_use]
    pub fn dealer(&self) -> Option<&Player> {
        self.dealer_id.and_then(|id| self.player(id))
    }

    /// Seats a new player with a zero balance.
    ///
    /// The name is trimmed. If no dealer is designated, the first seated
    /// player becomes the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or another player
    /// already uses it (ignoring case).
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: &str,
        prompt_pay_id: Option<String>,
    ) -> Result<&Player, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.player_by_name(name).is_some() {
            return Err(RosterError::DuplicateName);
        }

        self.players
            .push(Player::new(id, name).with_prompt_pay(prompt_pay_id));
        if self.dealer_id.is_none() {
            self.dealer_id = self.players.first().map(|p| p.id);
        }

        let index = self.players.len() - 1;
        Ok(&self.players[index])
    }

    /// Removes a player. If they were the dealer, the first remaining player
    /// takes over.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, RosterError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::PlayerNotFound)?;
        let removed = self.players.remove(index);

        if self.dealer_id == Some(id) {
            self.dealer_id = self.players.first().map(|p| p.id);
        }

        Ok(removed)
    }

    /// Designates the dealer, or clears the designation with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn set_dealer(&mut self, id: Option<PlayerId>) -> Result<(), RosterError> {
        if let Some(id) = id {
            self.player(id).ok_or(RosterError::PlayerNotFound)?;
        }
        self.dealer_id = id;
        Ok(())
    }

    /// Sets or clears a player's payment address.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn set_prompt_pay(
        &mut self,
        id: PlayerId,
        prompt_pay_id: Option<String>,
    ) -> Result<(), RosterError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RosterError::PlayerNotFound)?;
        player.prompt_pay_id = prompt_pay_id.filter(|p| !p.is_empty());
        Ok(())
    }

    /// Returns players ordered by balance, highest first.
    ///
    /// Players with equal balances keep their seating order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by(|a, b| {
            b.balance
                .partial_cmp(&a.balance)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Sum of all balances. Zero, up to rounding, for a consistent session.
    #[must_use]
    pub fn total_balance(&self) -> f64 {
        self.players.iter().map(|p| p.balance).sum()
    }

    /// Returns a player's log lines, newest first, with their timestamps.
    pub fn history(&self, player_id: PlayerId) -> impl Iterator<Item = (u64, &LogDetail)> + '_ {
        self.transaction_log
            .iter()
            .rev()
            .filter_map(move |entry| entry.detail_for(player_id).map(|d| (entry.timestamp, d)))
    }
}
