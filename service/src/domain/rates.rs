//! Currency exchange [`Rates`] definitions.

use common::{Currency, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use time::Date;

/// Snapshot of the USD/MXN exchange rate used for every price rendered
/// within a refresh interval.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rates {
    /// Amount of Mexican pesos in one US dollar.
    usd_mxn: Decimal,

    /// Date the rate was published on, if known.
    pub as_of: Option<Date>,

    /// Indicator whether this snapshot holds the configured fallback rate
    /// rather than a fetched one.
    pub is_fallback: bool,
}

impl Rates {
    /// Default amount of Mexican pesos in one US dollar used when no rate has
    /// been fetched.
    pub const DEFAULT_FALLBACK: Decimal =
        Decimal::from_parts(1750, 0, 0, false, 2);

    /// Creates new fetched [`Rates`] if the provided `usd_mxn` rate is
    /// positive.
    #[must_use]
    pub fn new(usd_mxn: Decimal, as_of: Option<Date>) -> Option<Self> {
        (usd_mxn > Decimal::ZERO).then_some(Self {
            usd_mxn,
            as_of,
            is_fallback: false,
        })
    }

    /// Creates fallback [`Rates`] out of the provided `usd_mxn` rate.
    ///
    /// Non-positive rate is replaced with the [`Rates::DEFAULT_FALLBACK`].
    #[must_use]
    pub fn fallback(usd_mxn: Decimal) -> Self {
        Self {
            usd_mxn: if usd_mxn > Decimal::ZERO {
                usd_mxn
            } else {
                Self::DEFAULT_FALLBACK
            },
            as_of: None,
            is_fallback: true,
        }
    }

    /// Returns the amount of Mexican pesos in one US dollar.
    #[must_use]
    pub const fn usd_mxn(&self) -> Decimal {
        self.usd_mxn
    }

    /// Returns the amount of `to` [`Currency`] in one unit of `from` one.
    #[must_use]
    pub fn rate(&self, from: Currency, to: Currency) -> Decimal {
        match (from, to) {
            (Currency::Usd, Currency::Usd) | (Currency::Mxn, Currency::Mxn) => {
                Decimal::ONE
            }
            (Currency::Usd, Currency::Mxn) => self.usd_mxn,
            (Currency::Mxn, Currency::Usd) => Decimal::ONE / self.usd_mxn,
        }
    }

    /// Converts the provided [`Money`] into the `to` [`Currency`], rounding
    /// to cents.
    ///
    /// [`None`] is returned if the converted amount overflows.
    #[must_use]
    pub fn convert(&self, money: Money, to: Currency) -> Option<Money> {
        let amount = match (money.currency, to) {
            (Currency::Usd, Currency::Mxn) => {
                money.amount.checked_mul(self.usd_mxn)?
            }
            (Currency::Mxn, Currency::Usd) => {
                money.amount.checked_div(self.usd_mxn)?
            }
            (Currency::Usd, Currency::Usd) | (Currency::Mxn, Currency::Mxn) => {
                return Some(money);
            }
        };
        Some(Money::new(
            amount
                .round_dp_with_strategy(
                    2,
                    RoundingStrategy::MidpointAwayFromZero,
                )
                .normalize(),
            to,
        ))
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::fallback(Self::DEFAULT_FALLBACK)
    }
}
