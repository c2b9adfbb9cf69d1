//! Self-listing definitions.

use std::collections::BTreeSet;

use common::Money;
use juniper::GraphQLInputObject;
use service::{command, domain};

use crate::{
    api::{property, scalar},
    define_error, AsError, Error,
};

/// Geographic position.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct CoordinatesInput {
    /// Latitude in degrees, within `[-90, 90]`.
    pub latitude: f64,

    /// Longitude in degrees, within `[-180, 180]`.
    pub longitude: f64,
}

impl CoordinatesInput {
    /// Converts this [`CoordinatesInput`] into [`common::Coordinates`].
    ///
    /// # Errors
    ///
    /// If the coordinates are out of range.
    pub fn try_into_coordinates(self) -> Result<common::Coordinates, Error> {
        common::Coordinates::new(self.latitude, self.longitude).ok_or_else(
            || Error::from(ListingError::InvalidValue).with_field("coordinates"),
        )
    }
}

/// Content of a self-listed `Property`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ListingInput")]
pub struct Input {
    /// Title of the listing.
    pub title: property::Title,

    /// Description of the listing.
    pub description: Option<property::Description>,

    /// Type of the listing.
    pub listing_type: property::ListingType,

    /// Category of the `Property`.
    pub category: property::Category,

    /// Price in its original currency.
    pub price: Money,

    /// Mexican state.
    pub state: property::State,

    /// Municipality.
    pub municipality: property::Municipality,

    /// Neighborhood.
    pub neighborhood: Option<property::Neighborhood>,

    /// Street address.
    pub address: Option<property::Address>,

    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of bathrooms, halves included.
    pub bathrooms: Option<scalar::Decimal>,

    /// Built area in square feet.
    pub sqft: Option<scalar::Decimal>,

    /// Lot size in square feet.
    pub lot_size: Option<scalar::Decimal>,

    /// Number of parking spaces.
    pub parking: Option<i32>,

    /// Year the `Property` was built in.
    pub year_built: Option<i32>,

    /// Offered amenities.
    #[graphql(default)]
    pub amenities: Vec<property::Amenity>,

    /// Geographic position.
    pub coordinates: Option<CoordinatesInput>,

    /// Uploaded images in their display order.
    #[graphql(default)]
    pub images: Vec<property::ImageUrl>,

    /// Name of the person to contact.
    pub contact_name: Option<property::ContactName>,

    /// Email to contact.
    pub contact_email: Option<property::ContactEmail>,

    /// Phone to contact.
    pub contact_phone: Option<property::ContactPhone>,
}

impl Input {
    /// Converts this [`Input`] into a [`domain::property::Draft`].
    ///
    /// # Errors
    ///
    /// If a numeric value is negative or out of range (including a price not
    /// fitting the price columns), or coordinates are invalid.
    pub fn into_draft(self) -> Result<domain::property::Draft, Error> {
        use domain::property as p;

        /// Converts the provided count into [`u16`].
        fn count(
            field: &'static str,
            v: Option<i32>,
        ) -> Result<Option<u16>, Error> {
            v.map(u16::try_from).transpose().map_err(|_| {
                Error::from(ListingError::InvalidValue).with_field(field)
            })
        }

        /// Checks the provided amount to be non-negative.
        fn amount(
            field: &'static str,
            v: Option<scalar::Decimal>,
        ) -> Result<Option<rust_decimal::Decimal>, Error> {
            match v.map(rust_decimal::Decimal::from) {
                Some(d) if d.is_sign_negative() => Err(
                    Error::from(ListingError::InvalidValue).with_field(field),
                ),
                d => Ok(d),
            }
        }

        let Self {
            title,
            description,
            listing_type,
            category,
            price,
            state,
            municipality,
            neighborhood,
            address,
            bedrooms,
            bathrooms,
            sqft,
            lot_size,
            parking,
            year_built,
            amenities,
            coordinates,
            images,
            contact_name,
            contact_email,
            contact_phone,
        } = self;

        if price.amount.is_sign_negative()
            || price.amount > p::Prices::MAX_AMOUNT
        {
            return Err(
                Error::from(ListingError::InvalidValue).with_field("price"),
            );
        }

        Ok(p::Draft {
            title: title.into(),
            description: description.map(Into::into),
            listing_type: listing_type.into(),
            category: category.into(),
            price,
            state: state.into(),
            municipality: municipality.into(),
            neighborhood: neighborhood.map(Into::into),
            address: address.map(Into::into),
            features: p::Features {
                bedrooms: count("bedrooms", bedrooms)?,
                bathrooms: amount("bathrooms", bathrooms)?,
                sqft: amount("sqft", sqft)?,
                lot_size: amount("lotSize", lot_size)?,
                parking: count("parking", parking)?,
                year_built: count("yearBuilt", year_built)?,
            },
            amenities: amenities
                .into_iter()
                .map(Into::into)
                .collect::<BTreeSet<_>>(),
            coordinates: coordinates
                .map(CoordinatesInput::try_into_coordinates)
                .transpose()?,
            images: images.into_iter().map(Into::into).collect(),
            contact: p::Contact {
                name: contact_name.map(Into::into),
                email: contact_email.map(Into::into),
                phone: contact_phone.map(Into::into),
            },
        })
    }
}

impl AsError for command::save_listing_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotEditable(_) => Some(ListingError::NotEditable.into()),
            Self::PriceOutOfRange(_) => Some(
                Error::from(ListingError::InvalidValue).with_field("price"),
            ),
        }
    }
}

impl AsError for command::submit_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::NoPhotos => Some(
                Error::from(ListingError::NoPhotos).with_field("images"),
            ),
            Self::Save(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EDITABLE"]
        #[status = CONFLICT]
        #[message = "Listing cannot be edited while pending or active"]
        NotEditable,

        #[code = "LISTING_NO_PHOTOS"]
        #[status = BAD_REQUEST]
        #[message = "At least one photo is required"]
        NoPhotos,

        #[code = "INVALID_LISTING_VALUE"]
        #[status = BAD_REQUEST]
        #[message = "Listing value is out of range"]
        InvalidValue,
    }
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};
    use rust_decimal::Decimal;
    use service::domain::property as p;

    use crate::api::property;

    use super::Input;

    fn input(price: Money) -> Input {
        Input {
            title: p::Title::new("Casa Colibrí").unwrap().into(),
            description: None,
            listing_type: property::ListingType::Sale,
            category: property::Category::House,
            price,
            state: p::State::new("Guanajuato").unwrap().into(),
            municipality: p::Municipality::new("San Miguel de Allende")
                .unwrap()
                .into(),
            neighborhood: None,
            address: None,
            bedrooms: Some(3),
            bathrooms: None,
            sqft: None,
            lot_size: None,
            parking: None,
            year_built: None,
            amenities: vec![],
            coordinates: None,
            images: vec![],
            contact_name: None,
            contact_email: None,
            contact_phone: None,
        }
    }

    #[test]
    fn accepts_storable_price() {
        let price = Money::new(p::Prices::MAX_AMOUNT, Currency::Mxn);

        let draft = input(price).into_draft().unwrap();

        assert_eq!(draft.price, price);
        assert_eq!(draft.features.bedrooms, Some(3));
    }

    #[test]
    fn rejects_unstorable_price() {
        for amount in [Decimal::MAX, Decimal::from(100_000_000_000_000_u64)] {
            let err = input(Money::new(amount, Currency::Usd))
                .into_draft()
                .unwrap_err();

            assert_eq!(err.code, "INVALID_LISTING_VALUE");
            assert_eq!(err.field, Some("price"));
        }
    }

    #[test]
    fn rejects_negative_price() {
        let err = input(Money::new(Decimal::NEGATIVE_ONE, Currency::Usd))
            .into_draft()
            .unwrap_err();

        assert_eq!(err.field, Some("price"));
    }
}
