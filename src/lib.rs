//! Round settlement and debt netting for home blackjack sessions, with
//! optional `no_std` support.
//!
//! The crate keeps the books for a live table: a [`RoundLedger`] collects
//! each player's hands while a round is recorded, [`commit_round`] folds it
//! into running balances with the dealer taking the other side, and
//! [`net_debts`] turns the final balances into a short list of payments.
//! [`Table`] ties these to a [`Session`] and a [`SessionStore`].
//!
//! # Example
//!
//! ```
//! use bjledger::{Outcome, Session, Table, TableOptions};
//!
//! let table = Table::new(Session::new("20241005-1", 0, 1.0), TableOptions::default(), 42);
//! let _dealer = table.add_player("Dee", None).unwrap();
//! let ann = table.add_player("Ann", None).unwrap();
//!
//! table.set_outcome(ann, 0, Outcome::Win).unwrap();
//! table.commit_round(1_000);
//!
//! let transfers = table.settle().unwrap();
//! assert_eq!(transfers[0].from, "Dee");
//! assert_eq!(transfers[0].amount, 20.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod error;
pub mod hand;
pub mod netting;
pub mod options;
pub mod player;
pub mod result;
pub mod round;
pub mod session;
pub mod settlement;
pub mod store;
pub mod table;
mod sync;

// Re-export main types
pub use error::{ActionError, NettingError, RosterError, StoreError, TableError};
pub use hand::Hand;
pub use netting::{Transfer, net_debts, net_debts_within};
pub use options::{DEFAULT_BET, SETTLE_EPSILON, TableOptions};
pub use player::{Player, PlayerId};
pub use result::{BLACKJACK_PAYS, LogDetail, LogEntry, Outcome, RoundCommit};
pub use round::RoundLedger;
pub use session::Session;
pub use settlement::commit_round;
pub use store::{MemoryStore, PlayerProfile, SessionStore};
pub use table::Table;
