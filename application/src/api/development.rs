//! [`Development`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::{command, domain, query};
use uuid::Uuid;

use crate::{
    api::{self, property, scalar},
    define_error, AsError, Context, Error,
};

/// A real estate development microsite.
#[derive(Clone, Debug, From, Into)]
pub struct Development(domain::Development);

/// A real estate development microsite.
#[graphql_object(context = Context)]
impl Development {
    /// Unique identifier of this `Development`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Development`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Slug of this `Development` microsite URL.
    #[must_use]
    pub fn slug(&self) -> Slug {
        self.0.slug.clone().into()
    }

    /// Tagline of this `Development`.
    #[must_use]
    pub fn tagline(&self) -> Option<Tagline> {
        self.0.tagline.clone().map(Into::into)
    }

    /// Description of this `Development`.
    #[must_use]
    pub fn description(&self) -> Option<Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Branding of this `Development` microsite.
    #[must_use]
    pub fn branding(&self) -> Branding {
        let b = &self.0.branding;
        Branding {
            primary_color: b.primary_color.clone().into(),
            secondary_color: b.secondary_color.clone().into(),
            logo: b.logo.clone().map(Into::into),
        }
    }

    /// Hero image of this `Development` microsite.
    #[must_use]
    pub fn hero_image(&self) -> Option<property::ImageUrl> {
        self.0.hero_image.clone().map(Into::into)
    }

    /// Gallery images in their display order.
    #[must_use]
    pub fn gallery(&self) -> Vec<property::ImageUrl> {
        self.0.gallery.iter().cloned().map(Into::into).collect()
    }

    /// Location of this `Development`.
    #[must_use]
    pub fn location(&self) -> Location {
        let l = &self.0.location;
        Location {
            address: l.address.clone().map(Into::into),
            state: l.state.clone().map(Into::into),
            municipality: l.municipality.clone().map(Into::into),
            coordinates: l.coordinates.map(Into::into),
        }
    }

    /// Amenities offered by this `Development`.
    #[must_use]
    pub fn amenities(&self) -> Vec<AmenityLabel> {
        self.0.amenities.iter().cloned().map(Into::into).collect()
    }

    /// Contacts of this `Development` sales office.
    #[must_use]
    pub fn contacts(&self) -> Contacts {
        let c = &self.0.contacts;
        Contacts {
            email: c.email.clone().map(Into::into),
            phone: c.phone.clone().map(Into::into),
            whatsapp: c.whatsapp.clone().map(Into::into),
        }
    }

    /// SEO metadata of this `Development` microsite.
    #[must_use]
    pub fn seo(&self) -> Seo {
        Seo {
            title: self.0.seo.title.clone().map(Into::into),
            description: self.0.seo.description.clone().map(Into::into),
        }
    }

    /// Indicator whether this `Development` microsite is published.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.is_active
    }

    /// Indicator whether this `Development` is listed first.
    #[must_use]
    pub fn featured(&self) -> bool {
        self.0.featured
    }

    /// `DateTime` when this `Development` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Development` was modified last time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Development`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::development::Id)]
#[into(domain::development::Id)]
#[graphql(name = "DevelopmentId", transparent)]
pub struct Id(Uuid);

/// Name of a `Development`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DevelopmentName",
    with = scalar::Via::<domain::development::Name>,
)]
pub struct Name(domain::development::Name);

/// Slug of a `Development` microsite URL, like `torre-ambar`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DevelopmentSlug",
    with = scalar::Via::<domain::development::Slug>,
)]
pub struct Slug(domain::development::Slug);

/// Tagline of a `Development`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DevelopmentTagline",
    with = scalar::Via::<domain::development::Tagline>,
)]
pub struct Tagline(domain::development::Tagline);

/// Description of a `Development`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DevelopmentDescription",
    with = scalar::Via::<domain::development::Description>,
)]
pub struct Description(domain::development::Description);

/// `#RRGGBB` color.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::development::Color>)]
pub struct Color(domain::development::Color);

/// Free-text amenity of a `Development`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DevelopmentAmenity",
    with = scalar::Via::<domain::development::AmenityLabel>,
)]
pub struct AmenityLabel(domain::development::AmenityLabel);

/// Page title of a `Development` microsite.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::development::SeoTitle>)]
pub struct SeoTitle(domain::development::SeoTitle);

/// Page meta description of a `Development` microsite.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::development::SeoDescription>)]
pub struct SeoDescription(domain::development::SeoDescription);

/// Colors and logo of a `Development` microsite.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DevelopmentBranding")]
pub struct Branding {
    /// Primary color.
    pub primary_color: Color,

    /// Secondary color.
    pub secondary_color: Color,

    /// Logo image.
    pub logo: Option<property::ImageUrl>,
}

/// Location of a `Development`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DevelopmentLocation")]
pub struct Location {
    /// Street address.
    pub address: Option<property::Address>,

    /// Mexican state.
    pub state: Option<property::State>,

    /// Municipality.
    pub municipality: Option<property::Municipality>,

    /// Geographic position.
    pub coordinates: Option<property::Coordinates>,
}

/// Contacts of a `Development` sales office.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DevelopmentContacts")]
pub struct Contacts {
    /// Email address.
    pub email: Option<property::ContactEmail>,

    /// Phone number.
    pub phone: Option<property::ContactPhone>,

    /// WhatsApp number.
    pub whatsapp: Option<property::ContactPhone>,
}

/// SEO metadata of a `Development` microsite.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DevelopmentSeo")]
pub struct Seo {
    /// Page title.
    pub title: Option<SeoTitle>,

    /// Page meta description.
    pub description: Option<SeoDescription>,
}

/// Content of a `Development` microsite.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "DevelopmentInput")]
pub struct Input {
    /// Name of the `Development`.
    pub name: Name,

    /// Slug of the microsite URL, derived from the `name` if omitted.
    pub slug: Option<Slug>,

    /// Tagline.
    pub tagline: Option<Tagline>,

    /// Description.
    pub description: Option<Description>,

    /// Primary branding color.
    pub primary_color: Option<Color>,

    /// Secondary branding color.
    pub secondary_color: Option<Color>,

    /// Logo image.
    pub logo: Option<property::ImageUrl>,

    /// Hero image.
    pub hero_image: Option<property::ImageUrl>,

    /// Gallery images in their display order.
    #[graphql(default)]
    pub gallery: Vec<property::ImageUrl>,

    /// Street address.
    pub address: Option<property::Address>,

    /// Mexican state.
    pub state: Option<property::State>,

    /// Municipality.
    pub municipality: Option<property::Municipality>,

    /// Geographic position.
    pub coordinates: Option<api::listing::CoordinatesInput>,

    /// Free-text amenities.
    #[graphql(default)]
    pub amenities: Vec<AmenityLabel>,

    /// Sales office email.
    pub email: Option<property::ContactEmail>,

    /// Sales office phone.
    pub phone: Option<property::ContactPhone>,

    /// Sales office WhatsApp number.
    pub whatsapp: Option<property::ContactPhone>,

    /// Page title override.
    pub seo_title: Option<SeoTitle>,

    /// Page meta description.
    pub seo_description: Option<SeoDescription>,

    /// Indicator whether the microsite is published.
    #[graphql(default = true)]
    pub is_active: bool,

    /// Indicator whether the `Development` is listed first.
    #[graphql(default = false)]
    pub featured: bool,
}

impl Input {
    /// Converts this [`Input`] into a [`domain::development::Draft`].
    ///
    /// # Errors
    ///
    /// If no valid slug can be derived from the `name`, or coordinates are
    /// out of range.
    pub fn into_draft(self) -> Result<domain::development::Draft, Error> {
        use domain::development as d;

        let Self {
            name,
            slug,
            tagline,
            description,
            primary_color,
            secondary_color,
            logo,
            hero_image,
            gallery,
            address,
            state,
            municipality,
            coordinates,
            amenities,
            email,
            phone,
            whatsapp,
            seo_title,
            seo_description,
            is_active,
            featured,
        } = self;

        let name = d::Name::from(name);
        let slug = match slug {
            Some(s) => s.into(),
            None => d::Slug::from_name(AsRef::<str>::as_ref(&name))
                .ok_or_else(|| Error::from(DevelopmentError::InvalidSlug))?,
        };
        let default = d::Branding::default();

        Ok(d::Draft {
            name,
            slug,
            tagline: tagline.map(Into::into),
            description: description.map(Into::into),
            branding: d::Branding {
                primary_color: primary_color
                    .map_or(default.primary_color, Into::into),
                secondary_color: secondary_color
                    .map_or(default.secondary_color, Into::into),
                logo: logo.map(Into::into),
            },
            hero_image: hero_image.map(Into::into),
            gallery: gallery.into_iter().map(Into::into).collect(),
            location: d::Location {
                address: address.map(Into::into),
                state: state.map(Into::into),
                municipality: municipality.map(Into::into),
                coordinates: coordinates
                    .map(api::listing::CoordinatesInput::try_into_coordinates)
                    .transpose()?,
            },
            amenities: amenities.into_iter().map(Into::into).collect(),
            contacts: d::Contacts {
                email: email.map(Into::into),
                phone: phone.map(Into::into),
                whatsapp: whatsapp.map(Into::into),
            },
            seo: d::Seo {
                title: seo_title.map(Into::into),
                description: seo_description.map(Into::into),
            },
            is_active,
            featured,
        })
    }
}

impl AsError for query::developments::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Forbidden => Some(api::PrivilegeError::Admin.into()),
        }
    }
}

impl AsError for command::create_development::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Forbidden => Some(api::PrivilegeError::Admin.into()),
            Self::SlugOccupied(_) => Some(
                Error::from(DevelopmentError::SlugOccupied).with_field("slug"),
            ),
        }
    }
}

impl AsError for command::update_development::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DevelopmentNotExists(_) => {
                Some(DevelopmentError::NotExists.into())
            }
            Self::Forbidden => Some(api::PrivilegeError::Admin.into()),
            Self::SlugOccupied(_) => Some(
                Error::from(DevelopmentError::SlugOccupied).with_field("slug"),
            ),
        }
    }
}

impl AsError for command::delete_development::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DevelopmentNotExists(_) => {
                Some(DevelopmentError::NotExists.into())
            }
            Self::Forbidden => Some(api::PrivilegeError::Admin.into()),
        }
    }
}

define_error! {
    enum DevelopmentError {
        #[code = "DEVELOPMENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Development` does not exist"]
        NotExists,

        #[code = "SLUG_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Slug is used by another `Development` already"]
        SlugOccupied,

        #[code = "INVALID_SLUG"]
        #[status = BAD_REQUEST]
        #[message = "Cannot derive a slug from the `Development` name"]
        InvalidSlug,
    }
}
