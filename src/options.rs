//! Table configuration options.

/// Bet seeded for a player with no previous round.
pub const DEFAULT_BET: f64 = 20.0;

/// Remainders below this are treated as settled when netting debts.
pub const SETTLE_EPSILON: f64 = 0.01;

/// Configuration options for a ledger table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjledger::TableOptions;
///
/// let options = TableOptions::default()
///     .with_default_bet(50.0)
///     .with_chip_value(0.5);
/// assert_eq!(options.default_bet, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOptions {
    /// Bet seeded into a fresh round for players without a `last_bet`.
    pub default_bet: f64,
    /// Netting tolerance for floating-point residue.
    pub settle_epsilon: f64,
    /// Currency value of one chip, stored on new sessions.
    pub chip_value: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            default_bet: DEFAULT_BET,
            settle_epsilon: SETTLE_EPSILON,
            chip_value: 1.0,
        }
    }
}

impl TableOptions {
    /// Sets the default bet for players without a previous round.
    ///
    /// A bet that is not positive and finite is stored as given but never
    /// seeded; rounds fall back to [`DEFAULT_BET`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjledger::TableOptions;
    ///
    /// let options = TableOptions::default().with_default_bet(10.0);
    /// assert_eq!(options.default_bet, 10.0);
    /// ```
    #[must_use]
    pub const fn with_default_bet(mut self, bet: f64) -> Self {
        self.default_bet = bet;
        self
    }

    /// Sets the netting tolerance.
    #[must_use]
    pub const fn with_settle_epsilon(mut self, epsilon: f64) -> Self {
        self.settle_epsilon = epsilon;
        self
    }

    /// Sets the chip value recorded on new sessions.
    #[must_use]
    pub const fn with_chip_value(mut self, value: f64) -> Self {
        self.chip_value = value;
        self
    }
}
