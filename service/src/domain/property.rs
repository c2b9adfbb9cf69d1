//! [`Property`] definitions.

use std::collections::BTreeSet;

use common::{
    define_kind, unit, Coordinates, Currency, DateTime, DateTimeOf, Money,
};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{client, contact, image::ImageUrl, user, Rates};

/// Real estate listed in the shared property store.
///
/// Rows are either self-listed by their owner (the [`Property::owner_id`] is
/// set) or managed by a broker account (the [`Property::client_id`] is set).
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`], if any.
    pub description: Option<Description>,

    /// [`ListingType`] of this [`Property`].
    pub listing_type: ListingType,

    /// [`Category`] of this [`Property`].
    pub category: Category,

    /// [`State`] this [`Property`] is located in.
    pub state: State,

    /// [`Municipality`] this [`Property`] is located in.
    pub municipality: Municipality,

    /// [`Neighborhood`] this [`Property`] is located in, if known.
    pub neighborhood: Option<Neighborhood>,

    /// Street [`Address`] of this [`Property`], if disclosed.
    pub address: Option<Address>,

    /// [`Prices`] of this [`Property`].
    pub prices: Prices,

    /// Physical [`Features`] of this [`Property`].
    pub features: Features,

    /// [`Amenity`] flags set on this [`Property`].
    pub amenities: BTreeSet<Amenity>,

    /// Geolocation of this [`Property`], if known.
    pub coordinates: Option<Coordinates>,

    /// Images of this [`Property`] in their display order.
    pub images: Vec<ImageUrl>,

    /// Lifecycle [`Status`] of this [`Property`].
    pub status: Status,

    /// Indicator whether this [`Property`] is shown on this storefront.
    pub show_on_storefront: bool,

    /// Indicator whether this [`Property`] is promoted in the default order.
    pub featured: bool,

    /// ID of the user who listed this [`Property`] on their own, if any.
    pub owner_id: Option<user::Id>,

    /// ID of the broker [`Client`] managing this [`Property`], if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// Declared [`Contact`] of a self-listed [`Property`].
    pub contact: Option<Contact>,

    /// [`RejectionReason`] of the last moderation, if rejected.
    pub rejection_reason: Option<RejectionReason>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was modified last time.
    pub updated_at: ModificationDateTime,
}

impl Property {
    /// Indicates whether this [`Property`] is eligible for public search
    /// results.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status == Status::Active && self.show_on_storefront
    }

    /// Returns the price of this [`Property`] in the provided [`Currency`].
    ///
    /// Precomputed columns are preferred, and the provided [`Rates`] snapshot
    /// is used only when the column is missing. The canonical price is
    /// returned as is if it cannot be converted.
    #[must_use]
    pub fn price_in(&self, currency: Currency, rates: &Rates) -> Money {
        self.prices.column(currency).map_or_else(
            || {
                rates
                    .convert(self.prices.price, currency)
                    .unwrap_or(self.prices.price)
            },
            |amount| Money::new(amount, currency),
        )
    }
}

/// Prices of a [`Property`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Prices {
    /// Canonical price in the currency the [`Property`] is listed in.
    pub price: Money,

    /// Precomputed price in US dollars.
    pub usd: Option<Decimal>,

    /// Precomputed price in Mexican pesos.
    pub mxn: Option<Decimal>,
}

impl Prices {
    /// Maximum amount a price column holds (`NUMERIC(16, 2)`).
    pub const MAX_AMOUNT: Decimal =
        Decimal::from_parts(1_874_919_423, 2_328_306, 0, false, 2);

    /// Computes [`Prices`] for the canonical `price` using the provided
    /// [`Rates`] snapshot.
    ///
    /// [`None`] is returned if the canonical price or any of its conversions
    /// is negative or exceeds the [`Prices::MAX_AMOUNT`].
    #[must_use]
    pub fn new(price: Money, rates: &Rates) -> Option<Self> {
        let fits = |m: Money| {
            (!m.amount.is_sign_negative() && m.amount <= Self::MAX_AMOUNT)
                .then_some(m.amount)
        };

        _ = fits(price)?;
        Some(Self {
            price,
            usd: Some(rates.convert(price, Currency::Usd).and_then(fits)?),
            mxn: Some(rates.convert(price, Currency::Mxn).and_then(fits)?),
        })
    }

    /// Returns the precomputed amount for the provided [`Currency`], if any.
    #[must_use]
    pub const fn column(&self, currency: Currency) -> Option<Decimal> {
        match currency {
            Currency::Usd => self.usd,
            Currency::Mxn => self.mxn,
        }
    }
}

/// Physical features of a [`Property`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Features {
    /// Number of bedrooms.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms, half-bathrooms counted as `0.5`.
    pub bathrooms: Option<Decimal>,

    /// Built area in square feet.
    pub sqft: Option<Decimal>,

    /// Lot size in square feet.
    pub lot_size: Option<Decimal>,

    /// Number of parking spots.
    pub parking: Option<u16>,

    /// Year the construction was finished.
    pub year_built: Option<u16>,
}

/// Declared contact of a self-listed [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contact {
    /// Name of the contact person.
    pub name: Option<contact::Name>,

    /// Email of the contact person.
    pub email: Option<contact::Email>,

    /// Phone of the contact person.
    pub phone: Option<contact::Phone>,
}

/// ID of a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

define_text! {
    /// Title of a [`Property`].
    Title, |s| super::is_trimmed_line(s, 256)
}

define_text! {
    /// Description of a [`Property`].
    Description, |s| super::is_trimmed_text(s, 10_000)
}

define_text! {
    /// Mexican state a [`Property`] is located in.
    State, |s| super::is_trimmed_line(s, 128)
}

define_text! {
    /// Municipality a [`Property`] is located in.
    Municipality, |s| super::is_trimmed_line(s, 128)
}

define_text! {
    /// Neighborhood (colonia) a [`Property`] is located in.
    Neighborhood, |s| super::is_trimmed_line(s, 256)
}

define_text! {
    /// Street address of a [`Property`].
    Address, |s| super::is_trimmed_line(s, 512)
}

define_text! {
    /// Moderator's explanation of a [`Status::Rejected`] listing.
    RejectionReason, |s| super::is_trimmed_text(s, 2048)
}

define_kind! {
    #[doc = "Type of a [`Property`] listing."]
    enum ListingType {
        #[doc = "[`Property`] is for sale."]
        #[value = "sale"]
        Sale,

        #[doc = "[`Property`] is for rent."]
        #[value = "rent"]
        Rent,
    }
}

define_kind! {
    #[doc = "Category of a [`Property`]."]
    enum Category {
        #[doc = "Detached house."]
        #[value = "house"]
        House,

        #[doc = "Condominium unit."]
        #[value = "condo"]
        Condo,

        #[doc = "Apartment."]
        #[value = "apartment"]
        Apartment,

        #[doc = "Land plot."]
        #[value = "land"]
        Land,

        #[doc = "Townhouse."]
        #[value = "townhouse"]
        Townhouse,

        #[doc = "Villa."]
        #[value = "villa"]
        Villa,

        #[doc = "Commercial premises."]
        #[value = "commercial"]
        Commercial,

        #[doc = "Office."]
        #[value = "office"]
        Office,
    }
}

define_kind! {
    #[doc = "Lifecycle status of a [`Property`]."]
    enum Status {
        #[doc = "Being prepared by its owner, never shown publicly."]
        #[value = "draft"]
        Draft,

        #[doc = "Submitted for moderation."]
        #[value = "pending"]
        Pending,

        #[doc = "Approved and eligible for public search."]
        #[value = "active"]
        Active,

        #[doc = "Declined by a moderator, may be edited and resubmitted."]
        #[value = "rejected"]
        Rejected,
    }
}

impl Status {
    /// Indicates whether a [`Property`] in this [`Status`] may be edited by
    /// its owner.
    #[must_use]
    pub const fn is_editable_by_owner(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Indicates whether this [`Status`] may be changed to the `next` one.
    ///
    /// Saving edits keeps a [`Status::Draft`] or [`Status::Rejected`] listing
    /// in its [`Status`], while the moderation moves a [`Status::Pending`]
    /// one further.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Draft | Self::Pending)
                | (Self::Rejected, Self::Rejected | Self::Pending)
                | (Self::Pending, Self::Active | Self::Rejected),
        )
    }
}

define_kind! {
    #[doc = "Amenity a [`Property`] may offer."]
    enum Amenity {
        #[doc = "Swimming pool."]
        #[value = "pool"]
        Pool,

        #[doc = "Air conditioning."]
        #[value = "ac"]
        AirConditioning,

        #[doc = "Pets are allowed."]
        #[value = "pets"]
        PetsAllowed,

        #[doc = "Gym."]
        #[value = "gym"]
        Gym,

        #[doc = "Spa."]
        #[value = "spa"]
        Spa,

        #[doc = "Jacuzzi."]
        #[value = "jacuzzi"]
        Jacuzzi,

        #[doc = "24/7 security."]
        #[value = "security"]
        Security,

        #[doc = "Elevator."]
        #[value = "elevator"]
        Elevator,

        #[doc = "BBQ area."]
        #[value = "bbq"]
        Bbq,

        #[doc = "Event room."]
        #[value = "event-room"]
        EventRoom,

        #[doc = "Storage room."]
        #[value = "storage"]
        Storage,

        #[doc = "Laundry room."]
        #[value = "laundry"]
        Laundry,

        #[doc = "Covered parking."]
        #[value = "covered-parking"]
        CoveredParking,
    }
}

impl Amenity {
    /// Returns the name of the boolean column storing this [`Amenity`] flag.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Pool => "has_pool",
            Self::AirConditioning => "has_ac",
            Self::PetsAllowed => "pets_allowed",
            Self::Gym => "has_gym",
            Self::Spa => "has_spa",
            Self::Jacuzzi => "has_jacuzzi",
            Self::Security => "has_security",
            Self::Elevator => "has_elevator",
            Self::Bbq => "has_bbq",
            Self::EventRoom => "has_event_room",
            Self::Storage => "has_storage",
            Self::Laundry => "has_laundry",
            Self::CoveredParking => "has_covered_parking",
        }
    }

    /// Indicates whether this [`Amenity`] has its own dedicated search
    /// parameter, rather than being a part of the extended set.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Pool | Self::AirConditioning | Self::PetsAllowed)
    }
}

/// Owner-provided content of a self-listed [`Property`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Title`] of the listing.
    pub title: Title,

    /// [`Description`] of the listing, if any.
    pub description: Option<Description>,

    /// [`ListingType`] of the listing.
    pub listing_type: ListingType,

    /// [`Category`] of the listing.
    pub category: Category,

    /// Canonical price of the listing.
    pub price: Money,

    /// [`State`] the listing is located in.
    pub state: State,

    /// [`Municipality`] the listing is located in.
    pub municipality: Municipality,

    /// [`Neighborhood`] the listing is located in, if any.
    pub neighborhood: Option<Neighborhood>,

    /// Street [`Address`] of the listing, if any.
    pub address: Option<Address>,

    /// Physical [`Features`] of the listing.
    pub features: Features,

    /// [`Amenity`] flags of the listing.
    pub amenities: BTreeSet<Amenity>,

    /// Geolocation of the listing, if known.
    pub coordinates: Option<Coordinates>,

    /// Uploaded images in their display order.
    pub images: Vec<ImageUrl>,

    /// [`Contact`] buyers' inquiries are routed to.
    pub contact: Contact,
}

impl Draft {
    /// Computes [`Prices`] of this [`Draft`] using the provided [`Rates`]
    /// snapshot.
    ///
    /// [`None`] is returned if the price doesn't fit the price columns.
    #[must_use]
    pub fn prices(&self, rates: &Rates) -> Option<Prices> {
        Prices::new(self.price, rates)
    }

    /// Creates a new [`Status::Draft`] [`Property`] listed by the provided
    /// owner.
    ///
    /// `prices` are expected to be computed by [`Draft::prices()`].
    #[must_use]
    pub fn into_property(self, owner: user::Id, prices: Prices) -> Property {
        let now = DateTime::now();
        let mut property = Property {
            id: Id::new(),
            title: self.title.clone(),
            description: None,
            listing_type: self.listing_type,
            category: self.category,
            state: self.state.clone(),
            municipality: self.municipality.clone(),
            neighborhood: None,
            address: None,
            prices,
            features: Features::default(),
            amenities: BTreeSet::new(),
            coordinates: None,
            images: Vec::new(),
            status: Status::Draft,
            show_on_storefront: true,
            featured: false,
            owner_id: Some(owner),
            client_id: None,
            contact: None,
            rejection_reason: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        self.apply_to(&mut property, prices);
        property
    }

    /// Overwrites the owner-editable content of the provided [`Property`]
    /// with this [`Draft`] and its `prices` computed by [`Draft::prices()`].
    ///
    /// Neither [`Status`] nor moderation flags are touched.
    pub fn apply_to(self, property: &mut Property, prices: Prices) {
        let Self {
            title,
            description,
            listing_type,
            category,
            price: _,
            state,
            municipality,
            neighborhood,
            address,
            features,
            amenities,
            coordinates,
            images,
            contact,
        } = self;

        property.title = title;
        property.description = description;
        property.listing_type = listing_type;
        property.category = category;
        property.prices = prices;
        property.state = state;
        property.municipality = municipality;
        property.neighborhood = neighborhood;
        property.address = address;
        property.features = features;
        property.amenities = amenities;
        property.coordinates = coordinates;
        property.images = images;
        property.contact = Some(contact);
        property.updated_at = DateTime::now().coerce();
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::{Currency, Money};
    use rust_decimal::Decimal;

    use crate::domain::Rates;

    use super::{Prices, Status};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn status_transitions() {
        use Status as S;

        assert!(S::Draft.can_become(S::Pending));
        assert!(S::Rejected.can_become(S::Pending));
        assert!(S::Pending.can_become(S::Active));
        assert!(S::Pending.can_become(S::Rejected));

        assert!(!S::Draft.can_become(S::Active));
        assert!(!S::Active.can_become(S::Pending));
        assert!(!S::Pending.can_become(S::Draft));
        assert!(!S::Rejected.can_become(S::Active));
    }

    #[test]
    fn only_draft_and_rejected_are_editable() {
        let editable = Status::ALL
            .iter()
            .filter(|s| s.is_editable_by_owner())
            .copied()
            .collect::<Vec<_>>();

        assert_eq!(editable, [Status::Draft, Status::Rejected]);
    }

    #[test]
    fn prices_are_computed_for_both_columns() {
        let rates = Rates::fallback(decimal("17.50"));

        let prices =
            Prices::new(Money::new(decimal("350000"), Currency::Usd), &rates)
                .unwrap();
        assert_eq!(prices.usd, Some(decimal("350000")));
        assert_eq!(prices.mxn, Some(decimal("6125000")));

        let prices =
            Prices::new(Money::new(decimal("17500"), Currency::Mxn), &rates)
                .unwrap();
        assert_eq!(prices.usd, Some(decimal("1000")));
        assert_eq!(prices.mxn, Some(decimal("17500")));
    }

    #[test]
    fn prices_fit_columns() {
        let rates = Rates::fallback(decimal("17.50"));
        let usd = |s| Money::new(decimal(s), Currency::Usd);

        assert_eq!(Prices::MAX_AMOUNT, decimal("99999999999999.99"));
        assert!(Prices::new(usd("5714285714285.71"), &rates).is_some());
        assert!(Prices::new(usd("5714285714285.72"), &rates).is_none());
        assert!(Prices::new(usd("100000000000000"), &rates).is_none());
        assert!(Prices::new(usd("-1"), &rates).is_none());
        assert!(
            Prices::new(Money::new(Decimal::MAX, Currency::Usd), &rates)
                .is_none(),
        );
        assert!(Prices::new(
            Money::new(decimal("99999999999999.99"), Currency::Mxn),
            &rates,
        )
        .is_some());
    }
}
