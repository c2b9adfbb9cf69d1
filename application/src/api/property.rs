//! [`Property`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::domain::{self, contact, image};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    mirror_enum, Context,
};

/// A real estate listing.
#[derive(Clone, Debug, From, Into)]
pub struct Property(domain::Property);

/// A real estate listing.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Property`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Description of this `Property`.
    #[must_use]
    pub fn description(&self) -> Option<Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Type of this `Property` listing.
    #[must_use]
    pub fn listing_type(&self) -> ListingType {
        self.0.listing_type.into()
    }

    /// Category of this `Property`.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Mexican state this `Property` is located in.
    #[must_use]
    pub fn state(&self) -> State {
        self.0.state.clone().into()
    }

    /// Municipality this `Property` is located in.
    #[must_use]
    pub fn municipality(&self) -> Municipality {
        self.0.municipality.clone().into()
    }

    /// Neighborhood this `Property` is located in.
    #[must_use]
    pub fn neighborhood(&self) -> Option<Neighborhood> {
        self.0.neighborhood.clone().map(Into::into)
    }

    /// Street address of this `Property`.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        self.0.address.clone().map(Into::into)
    }

    /// Price of this `Property` as listed by its owner.
    #[must_use]
    pub fn listed_price(&self) -> Money {
        self.0.prices.price
    }

    /// Price of this `Property` in the requested `currency`.
    ///
    /// Converted with the current exchange rates, if not stored.
    #[tracing::instrument(
        skip_all,
        fields(
            currency = ?currency,
            gql.name = "Property.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(
        &self,
        #[graphql(default = Currency::Usd)] currency: Currency,
        ctx: &Context,
    ) -> Money {
        let rates = ctx.service().rates().await;
        self.0.price_in(currency.into(), &rates)
    }

    /// Number of bedrooms.
    #[must_use]
    pub fn bedrooms(&self) -> Option<i32> {
        self.0.features.bedrooms.map(Into::into)
    }

    /// Number of bathrooms, halves included.
    #[must_use]
    pub fn bathrooms(&self) -> Option<scalar::Decimal> {
        self.0.features.bathrooms.map(Into::into)
    }

    /// Built area in square feet.
    #[must_use]
    pub fn sqft(&self) -> Option<scalar::Decimal> {
        self.0.features.sqft.map(Into::into)
    }

    /// Lot size in square feet.
    #[must_use]
    pub fn lot_size(&self) -> Option<scalar::Decimal> {
        self.0.features.lot_size.map(Into::into)
    }

    /// Number of parking spaces.
    #[must_use]
    pub fn parking(&self) -> Option<i32> {
        self.0.features.parking.map(Into::into)
    }

    /// Year this `Property` was built in.
    #[must_use]
    pub fn year_built(&self) -> Option<i32> {
        self.0.features.year_built.map(Into::into)
    }

    /// Amenities this `Property` offers.
    #[must_use]
    pub fn amenities(&self) -> Vec<Amenity> {
        self.0.amenities.iter().copied().map(Into::into).collect()
    }

    /// Geographic position of this `Property`, if known.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.0.coordinates.map(Into::into)
    }

    /// Images of this `Property` in their display order.
    #[must_use]
    pub fn images(&self) -> Vec<ImageUrl> {
        self.0.images.iter().cloned().map(Into::into).collect()
    }

    /// Lifecycle status of this `Property`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Indicator whether this `Property` is featured.
    #[must_use]
    pub fn featured(&self) -> bool {
        self.0.featured
    }

    /// Contact details of this `Property`, if any.
    #[must_use]
    pub fn contact(&self) -> Option<Contact> {
        self.0.contact.clone().map(Into::into)
    }

    /// Reason of this `Property` rejection by a moderator, if rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<String> {
        self.0.rejection_reason.as_ref().map(ToString::to_string)
    }

    /// Path of this `Property` detail page.
    #[must_use]
    pub fn link(&self) -> String {
        format!("/properties/{}", self.0.id)
    }

    /// `DateTime` when this `Property` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Property` was modified last time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Property`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

/// Title of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitle",
    with = scalar::Via::<domain::property::Title>,
)]
pub struct Title(domain::property::Title);

/// Description of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyDescription",
    with = scalar::Via::<domain::property::Description>,
)]
pub struct Description(domain::property::Description);

/// Mexican state a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyState",
    with = scalar::Via::<domain::property::State>,
)]
pub struct State(domain::property::State);

/// Municipality a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyMunicipality",
    with = scalar::Via::<domain::property::Municipality>,
)]
pub struct Municipality(domain::property::Municipality);

/// Neighborhood a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyNeighborhood",
    with = scalar::Via::<domain::property::Neighborhood>,
)]
pub struct Neighborhood(domain::property::Neighborhood);

/// Street address of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyAddress",
    with = scalar::Via::<domain::property::Address>,
)]
pub struct Address(domain::property::Address);

/// Absolute `http(s)` URL of an uploaded image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<image::ImageUrl>)]
pub struct ImageUrl(image::ImageUrl);

/// Name of a person to contact.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ContactName", with = scalar::Via::<contact::Name>)]
pub struct ContactName(contact::Name);

/// Email address to contact.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ContactEmail", with = scalar::Via::<contact::Email>)]
pub struct ContactEmail(contact::Email);

/// Phone number to contact.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ContactPhone", with = scalar::Via::<contact::Phone>)]
pub struct ContactPhone(contact::Phone);

/// Contact details of a `Property`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "PropertyContact")]
pub struct Contact {
    /// Name of the person to contact.
    pub name: Option<ContactName>,

    /// Email to contact.
    pub email: Option<ContactEmail>,

    /// Phone to contact.
    pub phone: Option<ContactPhone>,
}

impl From<domain::property::Contact> for Contact {
    fn from(contact: domain::property::Contact) -> Self {
        Self {
            name: contact.name.map(Into::into),
            email: contact.email.map(Into::into),
            phone: contact.phone.map(Into::into),
        }
    }
}

/// Geographic position.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl From<common::Coordinates> for Coordinates {
    fn from(c: common::Coordinates) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

mirror_enum! {
    #[doc = "Type of a `Property` listing."]
    #[graphql(name = "ListingType")]
    enum ListingType = domain::property::ListingType {
        #[doc = "For sale."]
        Sale,
        #[doc = "For rent."]
        Rent,
    }
}

mirror_enum! {
    #[doc = "Category of a `Property`."]
    #[graphql(name = "PropertyCategory")]
    enum Category = domain::property::Category {
        #[doc = "Detached house."]
        House,
        #[doc = "Condominium unit."]
        Condo,
        #[doc = "Apartment."]
        Apartment,
        #[doc = "Land plot."]
        Land,
        #[doc = "Townhouse."]
        Townhouse,
        #[doc = "Villa."]
        Villa,
        #[doc = "Commercial premises."]
        Commercial,
        #[doc = "Office."]
        Office,
    }
}

mirror_enum! {
    #[doc = "Lifecycle status of a `Property`."]
    #[graphql(name = "PropertyStatus")]
    enum Status = domain::property::Status {
        #[doc = "Being prepared by its owner."]
        Draft,
        #[doc = "Submitted for moderation."]
        Pending,
        #[doc = "Publicly listed."]
        Active,
        #[doc = "Declined by a moderator."]
        Rejected,
    }
}

mirror_enum! {
    #[doc = "Amenity a `Property` may offer."]
    #[graphql(name = "Amenity")]
    enum Amenity = domain::property::Amenity {
        #[doc = "Swimming pool."]
        Pool,
        #[doc = "Air conditioning."]
        AirConditioning,
        #[doc = "Pets are allowed."]
        PetsAllowed,
        #[doc = "Gym."]
        Gym,
        #[doc = "Spa."]
        Spa,
        #[doc = "Jacuzzi."]
        Jacuzzi,
        #[doc = "24/7 security."]
        Security,
        #[doc = "Elevator."]
        Elevator,
        #[doc = "BBQ area."]
        Bbq,
        #[doc = "Event room."]
        EventRoom,
        #[doc = "Storage room."]
        Storage,
        #[doc = "Laundry room."]
        Laundry,
        #[doc = "Covered parking."]
        CoveredParking,
    }
}

mirror_enum! {
    #[doc = "Currency of a price."]
    #[graphql(name = "Currency")]
    enum Currency = common::Currency {
        #[doc = "US Dollar."]
        Usd,
        #[doc = "Mexican Peso."]
        Mxn,
    }
}

pub mod list {
    //! Definitions related to a [`Property`] search page.

    use juniper::graphql_object;
    use service::read;

    use super::Property;
    use crate::Context;

    /// Page of a [`Property`] search.
    #[derive(Clone, Debug, derive_more::From)]
    pub struct Page(read::property::list::Page);

    /// Page of a `Property` search.
    #[graphql_object(name = "PropertyPage", context = Context)]
    impl Page {
        /// `Property`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Property> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Property`s matching the search.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.0.total).unwrap_or(i32::MAX)
        }

        /// Number of this page, starting from `1`.
        #[must_use]
        pub fn number(&self) -> i32 {
            i32::try_from(self.0.number.get()).unwrap_or(i32::MAX)
        }

        /// Total number of pages.
        #[must_use]
        pub fn total_pages(&self) -> i32 {
            i32::try_from(self.0.total_pages()).unwrap_or(i32::MAX)
        }

        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.0.has_next()
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.0.has_previous()
        }
    }
}

pub mod map {
    //! Definitions related to a [`Property`] map.

    use common::Money;
    use juniper::{graphql_object, GraphQLObject, GraphQLUnion};
    use service::read::property::map;

    #[cfg(doc)]
    use super::Property;
    use super::{Coordinates, Id, ImageUrl, Title};
    use crate::{api::scalar, Context};

    /// Map of the [`Property`]s matching a search.
    #[derive(Clone, Debug, derive_more::From)]
    pub struct View(map::View);

    /// Map of the `Property`s matching a search.
    #[graphql_object(name = "PropertyMap", context = Context)]
    impl View {
        /// Plotted markers.
        #[must_use]
        pub fn markers(&self) -> Vec<Marker> {
            self.0.markers().iter().cloned().map(Into::into).collect()
        }

        /// Visible area fitted to the markers.
        #[must_use]
        pub fn viewport(&self) -> Viewport {
            self.0.viewport().into()
        }
    }

    /// Marker of a `Property` on a map.
    #[derive(Clone, Debug, GraphQLObject)]
    #[graphql(name = "PropertyMarker")]
    pub struct Marker {
        /// ID of the plotted `Property`.
        pub id: Id,

        /// Position of this marker.
        pub coordinates: Coordinates,

        /// Title of the `Property`.
        pub title: Title,

        /// Price in the display currency.
        pub price: Money,

        /// Number of bedrooms.
        pub bedrooms: Option<i32>,

        /// Number of bathrooms.
        pub bathrooms: Option<scalar::Decimal>,

        /// Built area in square feet.
        pub sqft: Option<scalar::Decimal>,

        /// First image of the `Property`.
        pub thumbnail: Option<ImageUrl>,

        /// Path of the `Property` detail page.
        pub link: String,
    }

    impl From<map::Marker> for Marker {
        fn from(marker: map::Marker) -> Self {
            let map::Marker {
                id,
                coordinates,
                summary,
            } = marker;
            Self {
                id: id.into(),
                coordinates: coordinates.into(),
                title: summary.title.into(),
                price: summary.price,
                bedrooms: summary.bedrooms.map(Into::into),
                bathrooms: summary.bathrooms.map(Into::into),
                sqft: summary.sqft.map(Into::into),
                thumbnail: summary.thumbnail.map(Into::into),
                link: summary.link,
            }
        }
    }

    /// Visible area of a map.
    #[derive(Clone, Copy, Debug, GraphQLUnion)]
    pub enum Viewport {
        /// Default country-level view.
        Country(CountryViewport),

        /// View fitted to the markers.
        Fit(FitViewport),
    }

    impl From<map::Viewport> for Viewport {
        fn from(viewport: map::Viewport) -> Self {
            match viewport {
                map::Viewport::Country { center, zoom } => {
                    Self::Country(CountryViewport {
                        center: center.into(),
                        zoom: zoom.into(),
                    })
                }
                map::Viewport::Fit { bounds, padding } => {
                    Self::Fit(FitViewport {
                        south_west: bounds.south_west.into(),
                        north_east: bounds.north_east.into(),
                        padding: padding.into(),
                    })
                }
            }
        }
    }

    /// Default country-level view of a map.
    #[derive(Clone, Copy, Debug, GraphQLObject)]
    pub struct CountryViewport {
        /// Centre of the view.
        pub center: Coordinates,

        /// Zoom level of the view.
        pub zoom: i32,
    }

    /// View of a map fitted to its markers.
    #[derive(Clone, Copy, Debug, GraphQLObject)]
    pub struct FitViewport {
        /// South-west corner of the bounds.
        pub south_west: Coordinates,

        /// North-east corner of the bounds.
        pub north_east: Coordinates,

        /// Padding around the bounds in pixels.
        pub padding: i32,
    }
}
