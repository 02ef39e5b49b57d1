//! A live session together with the round being recorded.

use alloc::string::String;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::error::RosterError;
use crate::options::TableOptions;
use crate::player::{Player, PlayerId};
use crate::round::RoundLedger;
use crate::session::Session;

mod actions;
mod persist;

/// Returns the current time in milliseconds since the Unix epoch.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// A session being played, with the round ledger for the current round.
///
/// The table keeps the ledger in step with the roster: it is rebuilt whenever
/// the set of non-dealer players changes and after every committed round.
/// Every edit builds the new state first and swaps it in only on success, so
/// a failed call leaves the table as it was.
///
/// # Example
///
/// ```
/// use bjledger::{Outcome, Session, Table, TableOptions};
///
/// let table = Table::new(Session::new("20241005-1", 0, 1.0), TableOptions::default(), 7);
/// let dealer = table.add_player("Dee", None).unwrap();
/// let ann = table.add_player("Ann", None).unwrap();
///
/// table.set_outcome(ann, 0, Outcome::Win).unwrap();
/// table.commit_round(1_000);
///
/// let session = table.session();
/// assert_eq!(session.player(ann).map(|p| p.balance), Some(20.0));
/// assert_eq!(session.player(dealer).map(|p| p.balance), Some(-20.0));
/// ```
pub struct Table {
    /// Table options.
    pub options: TableOptions,
    /// Latest session snapshot.
    session: Mutex<Session>,
    /// Hands for the round being recorded.
    ledger: Mutex<RoundLedger>,
    /// Source of fresh player ids.
    rng: Mutex<ChaCha8Rng>,
}

impl Table {
    /// Creates a table for the given session, seeding player ids with `seed`.
    #[must_use]
    pub fn new(session: Session, options: TableOptions, seed: u64) -> Self {
        let ledger =
            RoundLedger::initialize(&session.players, session.dealer_id, options.default_bet);

        Self {
            options,
            session: Mutex::new(session),
            ledger: Mutex::new(ledger),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Returns a copy of the session.
    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    /// Returns a copy of the round ledger.
    pub fn ledger(&self) -> RoundLedger {
        self.ledger.snapshot()
    }

    /// Returns a copy of the player with the given id.
    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.session.lock().player(id).cloned()
    }

    /// Draws an id not used by any seated player.
    fn fresh_id(&self, session: &Session) -> PlayerId {
        let mut rng = self.rng.lock();
        loop {
            let id = PlayerId(rng.random());
            if session.player(id).is_none() {
                return id;
            }
        }
    }

    /// Rebuilds the ledger if it no longer matches the roster.
    fn sync_ledger(&self, session: &Session) {
        let mut ledger = self.ledger.lock();
        if !ledger.covers(&session.players, session.dealer_id) {
            log::debug!("roster changed, rebuilding round ledger");
            *ledger = RoundLedger::initialize(
                &session.players,
                session.dealer_id,
                self.options.default_bet,
            );
        }
    }

    /// Applies a roster edit to a copy of the session and swaps it in.
    fn edit_roster<T>(
        &self,
        edit: impl FnOnce(&mut Session) -> Result<T, RosterError>,
    ) -> Result<T, RosterError> {
        let mut session = self.session.lock();
        let mut next = session.clone();
        let value = edit(&mut next)?;
        self.sync_ledger(&next);
        *session = next;
        Ok(value)
    }

    /// Seats a new player and returns their id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or already taken.
    pub fn add_player(
        &self,
        name: &str,
        prompt_pay_id: Option<String>,
    ) -> Result<PlayerId, RosterError> {
        self.edit_roster(|session| {
            let id = self.fresh_id(session);
            let player = session.add_player(id, name, prompt_pay_id)?;
            log::info!("seated {} as {id}", player.name);
            Ok(id)
        })
    }

    /// Removes a player from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn remove_player(&self, id: PlayerId) -> Result<Player, RosterError> {
        self.edit_roster(|session| {
            let player = session.remove_player(id)?;
            log::info!("removed {}", player.name);
            Ok(player)
        })
    }

    /// Designates the dealer, or clears the designation with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn set_dealer(&self, id: Option<PlayerId>) -> Result<(), RosterError> {
        self.edit_roster(|session| session.set_dealer(id))
    }

    /// Sets or clears a player's payment address.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be found.
    pub fn set_prompt_pay(
        &self,
        id: PlayerId,
        prompt_pay_id: Option<String>,
    ) -> Result<(), RosterError> {
        self.edit_roster(|session| session.set_prompt_pay(id, prompt_pay_id))
    }

    /// Replaces the session with a snapshot received from storage.
    ///
    /// The round ledger survives unless the non-dealer roster changed.
    pub fn apply_snapshot(&self, snapshot: Session) {
        let mut session = self.session.lock();
        self.sync_ledger(&snapshot);
        *session = snapshot;
    }
}
