//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Formats this [`Money`] for displaying to a human, like
    /// `$1,250,000 USD`.
    ///
    /// Amounts are rounded to whole units, as prices are never listed with
    /// cents.
    #[must_use]
    pub fn to_price_tag(&self) -> String {
        let whole = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .abs()
            .to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero()
        {
            "-"
        } else {
            ""
        };
        format!("{sign}${grouped} {}", self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.normalize().to_i128() {
            Some(int) if amount.is_integer() => write!(f, "{int}{currency}"),
            _ => write!(f, "{}{currency}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = Currency::from_str(&currency.to_ascii_uppercase())
            .map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        #[value = "USD"]
        Usd,

        #[doc = "Mexican Peso."]
        #[value = "MXN"]
        Mxn,
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Usd
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code (`USD` or `MXN`).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("250000USD").unwrap(),
            Money::new(decimal("250000"), Currency::Usd),
        );
        assert_eq!(
            Money::from_str("4500000.50MXN").unwrap(),
            Money::new(decimal("4500000.50"), Currency::Mxn),
        );
        assert_eq!(
            Money::from_str("12mxn").unwrap(),
            Money::new(decimal("12"), Currency::Mxn),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45EUR").is_err());
        assert!(Money::from_str("USD").is_err());
        assert!(Money::from_str("abcUSD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::new(decimal("50.00"), Currency::Usd).to_string(),
            "50USD",
        );
        assert_eq!(
            Money::new(decimal("1999.90"), Currency::Mxn).to_string(),
            "1999.9MXN",
        );
        assert_eq!(Money::zero(Currency::Usd).to_string(), "0USD");
    }

    #[test]
    fn price_tag_groups_thousands() {
        assert_eq!(
            Money::new(decimal("1250000"), Currency::Usd).to_price_tag(),
            "$1,250,000 USD",
        );
        assert_eq!(
            Money::new(decimal("999"), Currency::Mxn).to_price_tag(),
            "$999 MXN",
        );
        assert_eq!(
            Money::new(decimal("15000.6"), Currency::Mxn).to_price_tag(),
            "$15,001 MXN",
        );
        assert_eq!(Money::zero(Currency::Usd).to_price_tag(), "$0 USD");
    }
}
