//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that sums of workbook cells
//! and carried-forward balances stay exact. Workbook cells hold decimal
//! numbers, so conversion to and from `f64` rounds to the nearest cent.
//!
//! A single cell may hold at most [`MAX_CELL_CENTS`] in either direction;
//! sums and balances built from cells use checked arithmetic.

use std::fmt;

/// Largest magnitude, in cents, accepted from a single cell (ten trillion)
pub const MAX_CELL_CENTS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use rollover_ledger::models::Money;
    /// let amount = Money::from_cents(-8550); // -$85.50
    /// assert_eq!(amount.to_string(), "-$85.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a decimal cell value, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and amounts beyond [`MAX_CELL_CENTS`].
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_CELL_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number, for writing back to a workbook cell
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtract an amount, returning `None` on overflow
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Sum amounts, returning `None` if the total overflows
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |total, amount| total.checked_add(amount))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "10", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = if let Some((whole, frac)) = s.split_once('.') {
            let dollars: i64 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };

            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            // Pad or round the fractional part to 2 digits
            let cents: i64 = match frac.len() {
                0 => 0,
                1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => frac.parse().map_err(|_| invalid())?,
                _ => {
                    let head: i64 = frac[..2].parse().map_err(|_| invalid())?;
                    let round_up = frac.as_bytes()[2] >= b'5';
                    head + i64::from(round_up)
                }
            };

            dollars
                .checked_mul(100)
                .and_then(|d| d.checked_add(cents))
                .ok_or_else(invalid)?
        } else {
            s.parse::<i64>()
                .ok()
                .and_then(|d| d.checked_mul(100))
                .ok_or_else(invalid)?
        };

        if cents > MAX_CELL_CENTS {
            return Err(invalid());
        }
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
