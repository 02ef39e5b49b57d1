use alloc::string::String;

use crate::error::{RosterError, StoreError, TableError};
use crate::options::TableOptions;
use crate::player::PlayerId;
use crate::result::LogEntry;
use crate::round::RoundLedger;
use crate::store::{PlayerProfile, SessionStore};

use super::Table;

impl Table {
    /// Loads a session from the store and opens a table for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded.
    pub fn load<S: SessionStore + ?Sized>(
        store: &S,
        id: &str,
        options: TableOptions,
        seed: u64,
    ) -> Result<Self, StoreError> {
        let session = store.load_session(id)?;
        log::info!("loaded session {id} with {} player(s)", session.players.len());
        Ok(Self::new(session, options, seed))
    }

    /// Writes the current session to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub fn save<S: SessionStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        store.save_session(&self.session.lock())
    }

    /// Commits the current round and saves the result.
    ///
    /// The table only moves to the next round once the store has accepted the
    /// new session; if saving fails, the session and ledger are unchanged and
    /// the commit can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub fn commit_and_save<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        timestamp: u64,
    ) -> Result<LogEntry, StoreError> {
        let mut session = self.session.lock();
        let mut ledger = self.ledger.lock();

        let (next, entry) = Self::committed(&session, &ledger, timestamp);
        store.save_session(&next)?;

        *ledger = RoundLedger::initialize(&next.players, next.dealer_id, self.options.default_bet);
        *session = next;
        Ok(entry)
    }

    /// Seats a player, taking their payment address from their stored
    /// profile if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile lookup fails, or the name is empty or
    /// already taken.
    pub fn add_known_player<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        name: &str,
    ) -> Result<PlayerId, TableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName.into());
        }

        let prompt_pay_id = store
            .load_player_profile(name)?
            .and_then(|profile| profile.prompt_pay_id);
        Ok(self.add_player(name, prompt_pay_id)?)
    }

    /// Updates a player's payment address and favorite flag, both in the
    /// session and in their stored profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found or the profile cannot
    /// be saved. Nothing changes on error.
    pub fn update_profile<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        id: PlayerId,
        prompt_pay_id: Option<String>,
        is_favorite: bool,
    ) -> Result<(), TableError> {
        let mut session = self.session.lock();
        let mut next = session.clone();
        next.set_prompt_pay(id, prompt_pay_id)?;
        let player = next.player(id).ok_or(RosterError::PlayerNotFound)?;

        store.upsert_player_profile(PlayerProfile {
            name: player.name.clone(),
            prompt_pay_id: player.prompt_pay_id.clone(),
            is_favorite,
        })?;
        *session = next;
        Ok(())
    }
}
