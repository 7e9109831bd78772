//! Market prices in Indian rupees per quintal.
//!
//! The price provider transmits every numeric field as a string. Parsing is
//! lenient: anything that is not a decimal number becomes zero, so a single
//! malformed record never drops out of aggregates.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price quoted by the market provider (₹ per quintal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a provider string, treating anything unparseable as zero.
    ///
    /// ```
    /// use agrow_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Price::from_provider("2150").amount(), Decimal::from(2150));
    /// assert_eq!(Price::from_provider(" 99.5 ").amount(), Decimal::new(995, 1));
    /// assert_eq!(Price::from_provider("NR"), Price::ZERO);
    /// ```
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        raw.trim().parse::<Decimal>().map_or(Self::ZERO, Self)
    }

    /// The amount as a decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Arithmetic mean of `prices`, rounded to a whole rupee with halves
    /// rounded away from zero. An empty input yields zero.
    #[must_use]
    pub fn mean_rounded<'a, I>(prices: I) -> Decimal
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let (sum, count) = prices
            .into_iter()
            .fold((Decimal::ZERO, 0u32), |(sum, count), price| {
                (sum + price.0, count + 1)
            });

        if count == 0 {
            return Decimal::ZERO;
        }

        (sum / Decimal::from(count))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}
