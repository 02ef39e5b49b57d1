//! End-of-session debt netting.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::NettingError;
use crate::options::SETTLE_EPSILON;
use crate::player::Player;

/// A payment one player owes another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Transfer {
    /// Name of the paying player.
    pub from: String,
    /// Name of the receiving player.
    pub to: String,
    /// Amount to pay, always positive.
    pub amount: f64,
    /// The receiver's payment address, if known.
    pub to_prompt_pay: Option<String>,
}

struct Position<'a> {
    player: &'a Player,
    remaining: f64,
}

/// Converts final balances into a list of payments using [`SETTLE_EPSILON`].
///
/// See [`net_debts_within`].
///
/// # Errors
///
/// Returns [`NettingError::Unbalanced`] if the balances do not sum to zero.
pub fn net_debts(players: &[Player]) -> Result<Vec<Transfer>, NettingError> {
    net_debts_within(players, SETTLE_EPSILON)
}

/// Converts final balances into a list of payments.
///
/// Debtors and creditors are queued in seating order. The head debtor pays
/// the head creditor the smaller of their two remainders; whichever side
/// drops below `epsilon` leaves its queue. Players whose balance is within
/// `epsilon` of zero take no part, so rounding residue never enters a queue.
/// Transfers come out in the order they are matched.
///
/// # Errors
///
/// Returns [`NettingError::Unbalanced`] if one queue is left with an
/// unmatched remainder of at least `epsilon`, which happens when the balances
/// do not sum to zero.
///
/// # Example
///
/// ```
/// use bjledger::{Player, PlayerId, net_debts};
///
/// let mut a = Player::new(PlayerId(1), "A");
/// let mut b = Player::new(PlayerId(2), "B");
/// let mut d = Player::new(PlayerId(3), "D");
/// a.balance = 20.0;
/// b.balance = -10.0;
/// d.balance = -10.0;
///
/// let transfers = net_debts(&[a, b, d]).unwrap();
/// assert_eq!(transfers.len(), 2);
/// assert_eq!((transfers[0].from.as_str(), transfers[0].to.as_str()), ("B", "A"));
/// assert_eq!((transfers[1].from.as_str(), transfers[1].to.as_str()), ("D", "A"));
/// ```
pub fn net_debts_within(players: &[Player], epsilon: f64) -> Result<Vec<Transfer>, NettingError> {
    let mut debtors: VecDeque<Position<'_>> = players
        .iter()
        .filter(|p| p.balance <= -epsilon)
        .map(|player| Position {
            player,
            remaining: -player.balance,
        })
        .collect();
    let mut creditors: VecDeque<Position<'_>> = players
        .iter()
        .filter(|p| p.balance >= epsilon)
        .map(|player| Position {
            player,
            remaining: player.balance,
        })
        .collect();

    let mut transfers = Vec::new();

    while let (Some(debtor), Some(creditor)) = (debtors.front_mut(), creditors.front_mut()) {
        let amount = debtor.remaining.min(creditor.remaining);
        transfers.push(Transfer {
            from: debtor.player.name.clone(),
            to: creditor.player.name.clone(),
            amount,
            to_prompt_pay: creditor.player.prompt_pay_id.clone(),
        });
        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining < epsilon {
            debtors.pop_front();
        }
        if creditor.remaining < epsilon {
            creditors.pop_front();
        }
    }

    let debt = debtors.iter().fold(0.0, |acc, d| acc + d.remaining);
    let credit = creditors.iter().fold(0.0, |acc, c| acc + c.remaining);
    if debt >= epsilon || credit >= epsilon {
        log::warn!("settlement left {debt:.2} owed and {credit:.2} due unmatched");
        return Err(NettingError::Unbalanced { debt, credit });
    }

    Ok(transfers)
}
