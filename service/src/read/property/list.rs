//! [`Property`] list definitions.

use std::{cmp::Ordering, num::NonZeroU32};

use common::{pagination, Currency};
use rust_decimal::Decimal;

use crate::domain::{
    property::{
        Amenity, Category, ListingType, Municipality, State, Status,
    },
    Property,
};

pub use super::filter::Sort;

/// Fixed size of a search results page.
pub const PAGE_SIZE: pagination::Size = match NonZeroU32::new(20) {
    Some(size) => pagination::Size::new(size),
    None => unreachable!(),
};

/// Page of search results.
pub type Page = pagination::Page<Property>;

/// Single conjunctive condition of [`Criteria`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    /// [`Property::status`] equals to the provided one.
    Status(Status),

    /// [`Property::show_on_storefront`] is set.
    ShowOnStorefront,

    /// [`Property::state`] equals to the provided one.
    State(State),

    /// [`Property::municipality`] equals to the provided one.
    Municipality(Municipality),

    /// [`Property::listing_type`] equals to the provided one.
    ListingType(ListingType),

    /// [`Property::category`] equals to the provided one.
    Category(Category),

    /// [`Property::amenities`] contain the provided one.
    Amenity(Amenity),

    /// [`Property::featured`] is set.
    Featured,

    /// Number of bedrooms is at least the provided one.
    MinBedrooms(u16),

    /// Number of bathrooms is at least the provided one.
    MinBathrooms(Decimal),

    /// Precomputed price in the provided [`Currency`] is at least the
    /// provided amount.
    MinPrice(Currency, Decimal),

    /// Precomputed price in the provided [`Currency`] is at most the
    /// provided amount.
    MaxPrice(Currency, Decimal),

    /// [`Property::coordinates`] are known.
    HasCoordinates,
}

impl Predicate {
    /// Checks whether the provided [`Property`] satisfies this [`Predicate`].
    ///
    /// Missing values never satisfy a comparison, like `NULL`s in SQL.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Self::Status(status) => property.status == *status,
            Self::ShowOnStorefront => property.show_on_storefront,
            Self::State(state) => property.state == *state,
            Self::Municipality(m) => property.municipality == *m,
            Self::ListingType(t) => property.listing_type == *t,
            Self::Category(c) => property.category == *c,
            Self::Amenity(a) => property.amenities.contains(a),
            Self::Featured => property.featured,
            Self::MinBedrooms(n) => {
                property.features.bedrooms.is_some_and(|b| b >= *n)
            }
            Self::MinBathrooms(n) => {
                property.features.bathrooms.is_some_and(|b| b >= *n)
            }
            Self::MinPrice(currency, min) => {
                property.prices.column(*currency).is_some_and(|p| p >= *min)
            }
            Self::MaxPrice(currency, max) => {
                property.prices.column(*currency).is_some_and(|p| p <= *max)
            }
            Self::HasCoordinates => property.coordinates.is_some(),
        }
    }
}

/// Conjunction of [`Predicate`]s selecting [`Property`] rows.
///
/// Always starts with the listing scope (active and shown on this
/// storefront), which cannot be removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Criteria {
    /// [`Predicate`]s of these [`Criteria`].
    predicates: Vec<Predicate>,
}

impl Criteria {
    /// Creates new [`Criteria`] selecting every listed [`Property`].
    #[must_use]
    pub fn listed() -> Self {
        Self {
            predicates: vec![
                Predicate::Status(Status::Active),
                Predicate::ShowOnStorefront,
            ],
        }
    }

    /// Adds the provided [`Predicate`] to these [`Criteria`].
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        if !self.predicates.contains(&predicate) {
            self.predicates.push(predicate);
        }
        self
    }

    /// Restricts these [`Criteria`] to [`Property`] rows plottable on a map.
    #[must_use]
    pub fn with_coordinates(self) -> Self {
        self.and(Predicate::HasCoordinates)
    }

    /// Returns the [`Predicate`]s of these [`Criteria`].
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Checks whether the provided [`Property`] satisfies these [`Criteria`].
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        self.predicates.iter().all(|p| p.matches(property))
    }
}

impl Sort {
    /// Compares the provided [`Property`] rows in this [`Sort`] order.
    ///
    /// Ties are broken by [`Property::id`], so the order is total and
    /// pagination is deterministic.
    #[must_use]
    pub fn compare(self, a: &Property, b: &Property) -> Ordering {
        let by_newest = || b.created_at.cmp(&a.created_at);
        let by_price = || a.prices.price.amount.cmp(&b.prices.price.amount);

        match self {
            Self::Featured => b.featured.cmp(&a.featured).then_with(by_newest),
            Self::Newest => by_newest(),
            Self::PriceAsc => by_price(),
            Self::PriceDesc => by_price().reverse(),
        }
        .then_with(|| a.id.cmp(&b.id))
    }
}

/// Selector of a [`Page`] of search results.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector {
    /// [`Criteria`] the rows are selected by.
    pub criteria: Criteria,

    /// [`Sort`] order of the rows.
    pub sort: Sort,

    /// Requested page [`pagination::Number`].
    pub page: pagination::Number,

    /// [`pagination::Size`] of the pages.
    pub size: pagination::Size,
}

impl Selector {
    /// Returns an empty [`Page`] of this [`Selector`].
    #[must_use]
    pub fn empty_page(&self) -> Page {
        Page::empty(self.page, self.size)
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::{collections::BTreeSet, time::Duration};

    use common::{Coordinates, Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        property::{
            self, Amenity, Category, Features, ListingType, Prices, Status,
        },
        Property,
    };

    use super::{Criteria, Predicate, Sort};

    /// Creates a listed [`Property`] created `age` minutes ago.
    pub(crate) fn listed(title: &str, usd: u32, age: u64) -> Property {
        let now = DateTime::now() - Duration::from_secs(age * 60);
        let price = Decimal::from(usd);
        Property {
            id: property::Id::new(),
            title: property::Title::new(title).unwrap(),
            description: None,
            listing_type: ListingType::Sale,
            category: Category::House,
            state: property::State::new("Guanajuato").unwrap(),
            municipality: property::Municipality::new("San Miguel de Allende")
                .unwrap(),
            neighborhood: None,
            address: None,
            prices: Prices {
                price: Money::new(price, Currency::Usd),
                usd: Some(price),
                mxn: Some(price * Decimal::from(17)),
            },
            features: Features {
                bedrooms: Some(3),
                bathrooms: Some(Decimal::new(25, 1)),
                ..Features::default()
            },
            amenities: BTreeSet::new(),
            coordinates: Coordinates::new(20.914, -100.745),
            images: vec![],
            status: Status::Active,
            show_on_storefront: true,
            featured: false,
            owner_id: None,
            client_id: None,
            contact: None,
            rejection_reason: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    #[test]
    fn scope_is_always_applied() {
        let criteria = Criteria::listed().and(Predicate::Featured);

        let mut p = listed("Casa", 300_000, 1);
        p.featured = true;
        assert!(criteria.matches(&p));

        p.show_on_storefront = false;
        assert!(!criteria.matches(&p));

        p.show_on_storefront = true;
        for status in [Status::Draft, Status::Pending, Status::Rejected] {
            p.status = status;
            assert!(!criteria.matches(&p));
        }
    }

    #[test]
    fn price_filters_use_display_currency_column() {
        let p = listed("Casa", 300_000, 1);

        let usd = Criteria::listed()
            .and(Predicate::MinPrice(Currency::Usd, Decimal::from(250_000)))
            .and(Predicate::MaxPrice(Currency::Usd, Decimal::from(500_000)));
        assert!(usd.matches(&p));

        let mxn = Criteria::listed()
            .and(Predicate::MinPrice(Currency::Mxn, Decimal::from(250_000)))
            .and(Predicate::MaxPrice(Currency::Mxn, Decimal::from(500_000)));
        assert!(!mxn.matches(&p));

        let mut p = p;
        p.prices.mxn = None;
        let any_mxn = Criteria::listed()
            .and(Predicate::MinPrice(Currency::Mxn, Decimal::ZERO));
        assert!(!any_mxn.matches(&p));
    }

    #[test]
    fn amenities_and_minimums() {
        let mut p = listed("Casa", 300_000, 1);
        _ = p.amenities.insert(Amenity::Pool);

        assert!(Criteria::listed()
            .and(Predicate::Amenity(Amenity::Pool))
            .and(Predicate::MinBedrooms(3))
            .and(Predicate::MinBathrooms(Decimal::new(25, 1)))
            .matches(&p));
        assert!(!Criteria::listed()
            .and(Predicate::Amenity(Amenity::Gym))
            .matches(&p));
        assert!(!Criteria::listed()
            .and(Predicate::MinBedrooms(4))
            .matches(&p));

        p.coordinates = None;
        assert!(!Criteria::listed().with_coordinates().matches(&p));
    }

    #[test]
    fn featured_first_then_newest() {
        let mut rows = vec![
            listed("old plain", 1, 50),
            listed("new plain", 2, 1),
            listed("old featured", 3, 40),
            listed("new featured", 4, 2),
            listed("mid plain", 5, 10),
        ];
        rows[2].featured = true;
        rows[3].featured = true;

        rows.sort_by(|a, b| Sort::Featured.compare(a, b));

        assert_eq!(
            rows.iter().map(|p| p.title.to_string()).collect::<Vec<_>>(),
            [
                "new featured",
                "old featured",
                "new plain",
                "mid plain",
                "old plain"
            ],
        );
    }

    #[test]
    fn price_sorts_by_raw_price() {
        let mut rows = vec![
            listed("b", 200, 1),
            listed("a", 100, 1),
            listed("c", 300, 1),
        ];
        rows[1].prices.price = Money::new(Decimal::from(100), Currency::Mxn);

        rows.sort_by(|a, b| Sort::PriceAsc.compare(a, b));
        let titles = rows.iter().map(|p| p.title.to_string()).collect::<Vec<_>>();
        assert_eq!(titles, ["a", "b", "c"]);

        rows.sort_by(|a, b| Sort::PriceDesc.compare(a, b));
        let titles = rows.iter().map(|p| p.title.to_string()).collect::<Vec<_>>();
        assert_eq!(titles, ["c", "b", "a"]);
    }
}
