//! Error types for ledger, roster, settlement, and storage operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur while editing the round ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Player has no entry in the round ledger.
    #[error("player not found in the round ledger")]
    PlayerNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// The player already split this round.
    #[error("player already split this round")]
    AlreadySplit,
    /// A blackjack hand cannot be doubled.
    #[error("a blackjack hand cannot be doubled")]
    DoubleOnBlackjack,
    /// Bet must be a positive, finite amount.
    #[error("bet must be a positive, finite amount")]
    InvalidBet,
}

/// Errors that can occur while editing the session roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Player name is empty after trimming.
    #[error("player name is empty")]
    EmptyName,
    /// Another player already uses this name (case-insensitive).
    #[error("a player with this name is already seated")]
    DuplicateName,
    /// Player not found in the session.
    #[error("player not found in the session")]
    PlayerNotFound,
}

/// Errors that can occur while netting final balances.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NettingError {
    /// Debts and credits did not cancel out.
    ///
    /// Holds what was left in the debtor and creditor queues when one of them
    /// ran dry.
    #[error("balances do not net to zero: {debt:.2} still owed, {credit:.2} still due")]
    Unbalanced {
        /// Unmatched debt.
        debt: f64,
        /// Unmatched credit.
        credit: f64,
    },
}

/// Errors reported by a [`SessionStore`](crate::store::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested document does not exist.
    #[error("document not found")]
    NotFound,
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`Table`](crate::table::Table) operations that cross
/// the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Round ledger edit failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Roster edit failed.
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
