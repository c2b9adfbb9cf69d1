//! Price [`Bracket`] tables.

use common::Currency;
use rust_decimal::Decimal;

use crate::domain::property::ListingType;

use super::filter::PriceRange;

/// Selectable price bracket of a search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bracket {
    /// Human-readable label of this [`Bracket`].
    pub label: &'static str,

    /// [`PriceRange`] this [`Bracket`] selects.
    pub range: PriceRange,
}

/// Returns the ordered [`Bracket`]s offered for browsing the provided
/// [`ListingType`] in the provided display [`Currency`].
///
/// Brackets of different tables are not comparable with each other.
#[must_use]
pub const fn bracket_table(
    currency: Currency,
    listing_type: ListingType,
) -> &'static [Bracket] {
    match (currency, listing_type) {
        (Currency::Usd, ListingType::Sale) => USD_SALE,
        (Currency::Usd, ListingType::Rent) => USD_RENT,
        (Currency::Mxn, ListingType::Sale) => MXN_SALE,
        (Currency::Mxn, ListingType::Rent) => MXN_RENT,
    }
}

/// Creates a new [`Bracket`] out of whole-unit bounds.
const fn bracket(
    label: &'static str,
    min: Option<u32>,
    max: Option<u32>,
) -> Bracket {
    /// Converts whole units into a [`Decimal`].
    const fn units(n: Option<u32>) -> Option<Decimal> {
        match n {
            Some(n) => Some(Decimal::from_parts(n, 0, 0, false, 0)),
            None => None,
        }
    }

    Bracket {
        label,
        range: PriceRange::new_unchecked(units(min), units(max)),
    }
}

/// US dollar prices of properties for sale.
const USD_SALE: &[Bracket] = &[
    bracket("Under $250K", None, Some(250_000)),
    bracket("$250K-$500K", Some(250_000), Some(500_000)),
    bracket("$500K-$1M", Some(500_000), Some(1_000_000)),
    bracket("$1M+", Some(1_000_000), None),
];

/// US dollar monthly rents.
const USD_RENT: &[Bracket] = &[
    bracket("Under $1K", None, Some(1_000)),
    bracket("$1K-$2K", Some(1_000), Some(2_000)),
    bracket("$2K-$3K", Some(2_000), Some(3_000)),
    bracket("$3K+", Some(3_000), None),
];

/// Mexican peso prices of properties for sale.
const MXN_SALE: &[Bracket] = &[
    bracket("Under $1M", None, Some(1_000_000)),
    bracket("$1M-$3M", Some(1_000_000), Some(3_000_000)),
    bracket("$3M-$5M", Some(3_000_000), Some(5_000_000)),
    bracket("$5M+", Some(5_000_000), None),
];

/// Mexican peso monthly rents.
const MXN_RENT: &[Bracket] = &[
    bracket("Under $15K", None, Some(15_000)),
    bracket("$15K-$30K", Some(15_000), Some(30_000)),
    bracket("$30K-$50K", Some(30_000), Some(50_000)),
    bracket("$50K+", Some(50_000), None),
];

#[cfg(test)]
mod spec {
    use common::Currency;

    use crate::domain::property::ListingType;

    use super::bracket_table;

    fn table(currency: Currency, listing_type: ListingType) -> Vec<String> {
        bracket_table(currency, listing_type)
            .iter()
            .map(|b| format!("{} {}", b.label, b.range))
            .collect()
    }

    #[test]
    fn usd_sale() {
        assert_eq!(
            table(Currency::Usd, ListingType::Sale),
            [
                "Under $250K -250000",
                "$250K-$500K 250000-500000",
                "$500K-$1M 500000-1000000",
                "$1M+ 1000000-",
            ],
        );
    }

    #[test]
    fn usd_rent() {
        assert_eq!(
            table(Currency::Usd, ListingType::Rent),
            [
                "Under $1K -1000",
                "$1K-$2K 1000-2000",
                "$2K-$3K 2000-3000",
                "$3K+ 3000-",
            ],
        );
    }

    #[test]
    fn mxn_sale() {
        assert_eq!(
            table(Currency::Mxn, ListingType::Sale),
            [
                "Under $1M -1000000",
                "$1M-$3M 1000000-3000000",
                "$3M-$5M 3000000-5000000",
                "$5M+ 5000000-",
            ],
        );
    }

    #[test]
    fn mxn_rent() {
        assert_eq!(
            table(Currency::Mxn, ListingType::Rent),
            [
                "Under $15K -15000",
                "$15K-$30K 15000-30000",
                "$30K-$50K 30000-50000",
                "$50K+ 50000-",
            ],
        );
    }

    #[test]
    fn tables_do_not_share_brackets() {
        let all = [
            (Currency::Usd, ListingType::Sale),
            (Currency::Usd, ListingType::Rent),
            (Currency::Mxn, ListingType::Sale),
            (Currency::Mxn, ListingType::Rent),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                let a = bracket_table(a.0, a.1);
                let b = bracket_table(b.0, b.1);
                assert!(a.iter().all(|x| b.iter().all(|y| x.range != y.range)));
            }
        }
    }
}
