//! Storage collaborator interface and an in-memory implementation.

use core::sync::atomic::{AtomicBool, Ordering};

use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;
use crate::session::{Session, next_session_id};
use crate::sync::Mutex;

/// How far back session listings look, in days.
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 30;

/// Maximum number of sessions a listing returns.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

const MILLIS_PER_DAY: u64 = 86_400_000;

/// A player's profile, shared across sessions and keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerProfile {
    /// Player name.
    pub name: String,
    /// Payment address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt_pay_id: Option<String>,
    /// Whether the player shows up in the quick-add list.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_favorite: bool,
}

/// Durable storage for sessions and player profiles.
///
/// Implementations own retries; callers see a failure as a [`StoreError`].
pub trait SessionStore {
    /// Loads a session by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no session has this id.
    fn load_session(&self, id: &str) -> Result<Session, StoreError>;

    /// Writes a session, replacing the stored fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn save_session(&self, session: &Session) -> Result<(), StoreError>;

    /// Lists ids of sessions created within `window_days` before `now`,
    /// newest first, at most `max` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn list_recent_sessions(
        &self,
        now: u64,
        window_days: u32,
        max: usize,
    ) -> Result<Vec<String>, StoreError>;

    /// Counts sessions whose id starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn count_sessions_with_prefix(&self, prefix: &str) -> Result<usize, StoreError>;

    /// Loads the profile stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn load_player_profile(&self, name: &str) -> Result<Option<PlayerProfile>, StoreError>;

    /// Loads every profile marked favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn load_favorite_players(&self) -> Result<Vec<PlayerProfile>, StoreError>;

    /// Creates or overwrites the profile stored under `profile.name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn upsert_player_profile(&self, profile: PlayerProfile) -> Result<(), StoreError>;
}

/// Starts and saves an empty session with the next free id for the day.
///
/// # Errors
///
/// Returns an error if the store cannot be reached.
pub fn start_session<S: SessionStore + ?Sized>(
    store: &S,
    date_prefix: &str,
    created_at: u64,
    chip_value: f64,
) -> Result<Session, StoreError> {
    let today = store.count_sessions_with_prefix(date_prefix)?;
    let session = Session::new(next_session_id(date_prefix, today), created_at, chip_value);
    store.save_session(&session)?;
    log::info!("started session {}", session.id);
    Ok(session)
}

/// A [`SessionStore`] kept in memory.
#[derive(Default)]
pub struct MemoryStore {
    /// Sessions (`session_id` -> session).
    sessions: Mutex<HashMap<String, Session>>,
    /// Profiles (`name` -> profile).
    profiles: Mutex<HashMap<String, PlayerProfile>>,
    /// When set, every call fails with [`StoreError::Unavailable`].
    offline: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing or regaining the connection to the store.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load_session(&self, id: &str) -> Result<Session, StoreError> {
        self.check()?;
        self.sessions
            .lock()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        self.check()?;
        self.sessions
            .lock()
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn list_recent_sessions(
        &self,
        now: u64,
        window_days: u32,
        max: usize,
    ) -> Result<Vec<String>, StoreError> {
        self.check()?;
        let since = now.saturating_sub(u64::from(window_days) * MILLIS_PER_DAY);

        let sessions = self.sessions.lock();
        let mut recent: Vec<(u64, &String)> = sessions
            .values()
            .filter(|s| s.created_at >= since)
            .map(|s| (s.created_at, &s.id))
            .collect();
        recent.sort_by(|a, b| b.cmp(a));

        Ok(recent
            .into_iter()
            .take(max)
            .map(|(_, id)| id.clone())
            .collect())
    }

    fn count_sessions_with_prefix(&self, prefix: &str) -> Result<usize, StoreError> {
        self.check()?;
        Ok(self
            .sessions
            .lock()
            .keys()
            .filter(|id| id.starts_with(prefix))
            .count())
    }

    fn load_player_profile(&self, name: &str) -> Result<Option<PlayerProfile>, StoreError> {
        self.check()?;
        Ok(self.profiles.lock().get(name).cloned())
    }

    fn load_favorite_players(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        self.check()?;
        let mut favorites: Vec<PlayerProfile> = self
            .profiles
            .lock()
            .values()
            .filter(|p| p.is_favorite)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(favorites)
    }

    fn upsert_player_profile(&self, profile: PlayerProfile) -> Result<(), StoreError> {
        self.check()?;
        self.profiles.lock().insert(profile.name.clone(), profile);
        Ok(())
    }
}
