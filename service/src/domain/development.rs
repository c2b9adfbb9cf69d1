//! [`Development`] definitions.

use std::sync::LazyLock;

use common::{unit, Coordinates, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{contact, image::ImageUrl, property};

/// Admin-configured microsite of a real estate development.
#[derive(Clone, Debug)]
pub struct Development {
    /// ID of this [`Development`].
    pub id: Id,

    /// [`Name`] of this [`Development`].
    pub name: Name,

    /// [`Slug`] of this [`Development`] microsite URL.
    pub slug: Slug,

    /// [`Tagline`] of this [`Development`], if any.
    pub tagline: Option<Tagline>,

    /// [`Description`] of this [`Development`], if any.
    pub description: Option<Description>,

    /// [`Branding`] of this [`Development`] microsite.
    pub branding: Branding,

    /// Hero image of this [`Development`] microsite, if any.
    pub hero_image: Option<ImageUrl>,

    /// Gallery images of this [`Development`] in their display order.
    pub gallery: Vec<ImageUrl>,

    /// [`Location`] of this [`Development`].
    pub location: Location,

    /// Free-text amenities offered by this [`Development`].
    pub amenities: Vec<AmenityLabel>,

    /// [`Contacts`] of this [`Development`] sales office.
    pub contacts: Contacts,

    /// [`Seo`] metadata of this [`Development`] microsite.
    pub seo: Seo,

    /// Indicator whether this [`Development`] microsite is published.
    pub is_active: bool,

    /// Indicator whether this [`Development`] is listed first.
    pub featured: bool,

    /// [`DateTime`] when this [`Development`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Development`] was modified last time.
    pub updated_at: ModificationDateTime,
}

/// Admin-provided content of a [`Development`] microsite.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Name`] of the [`Development`].
    pub name: Name,

    /// [`Slug`] of the [`Development`] microsite URL.
    pub slug: Slug,

    /// [`Tagline`] of the [`Development`], if any.
    pub tagline: Option<Tagline>,

    /// [`Description`] of the [`Development`], if any.
    pub description: Option<Description>,

    /// [`Branding`] of the [`Development`] microsite.
    pub branding: Branding,

    /// Hero image, if any.
    pub hero_image: Option<ImageUrl>,

    /// Gallery images in their display order.
    pub gallery: Vec<ImageUrl>,

    /// [`Location`] of the [`Development`].
    pub location: Location,

    /// Free-text amenities.
    pub amenities: Vec<AmenityLabel>,

    /// [`Contacts`] of the sales office.
    pub contacts: Contacts,

    /// [`Seo`] metadata.
    pub seo: Seo,

    /// Indicator whether the microsite is published.
    pub is_active: bool,

    /// Indicator whether the [`Development`] is listed first.
    pub featured: bool,
}

impl Draft {
    /// Creates a new [`Development`] out of this [`Draft`].
    #[must_use]
    pub fn into_development(self) -> Development {
        let now = DateTime::now();
        let Self {
            name,
            slug,
            tagline,
            description,
            branding,
            hero_image,
            gallery,
            location,
            amenities,
            contacts,
            seo,
            is_active,
            featured,
        } = self;
        Development {
            id: Id::new(),
            name,
            slug,
            tagline,
            description,
            branding,
            hero_image,
            gallery,
            location,
            amenities,
            contacts,
            seo,
            is_active,
            featured,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Overwrites the content of the provided [`Development`] with this
    /// [`Draft`], keeping its ID and creation time.
    #[must_use]
    pub fn apply_to(self, development: Development) -> Development {
        Development {
            id: development.id,
            created_at: development.created_at,
            ..self.into_development()
        }
    }
}

/// Colors and logo of a [`Development`] microsite.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Branding {
    /// Primary [`Color`].
    pub primary_color: Color,

    /// Secondary [`Color`].
    pub secondary_color: Color,

    /// Logo image, if any.
    pub logo: Option<ImageUrl>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: Color(String::from("#1E3A5F")),
            secondary_color: Color(String::from("#C9A227")),
            logo: None,
        }
    }
}

/// Location of a [`Development`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    /// Street [`property::Address`], if any.
    pub address: Option<property::Address>,

    /// [`property::State`], if any.
    pub state: Option<property::State>,

    /// [`property::Municipality`], if any.
    pub municipality: Option<property::Municipality>,

    /// Geolocation, if known.
    pub coordinates: Option<Coordinates>,
}

/// Contact channels of a [`Development`] sales office.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contacts {
    /// Email address, if any.
    pub email: Option<contact::Email>,

    /// Phone number, if any.
    pub phone: Option<contact::Phone>,

    /// WhatsApp number, if any.
    pub whatsapp: Option<contact::Phone>,
}

/// SEO metadata of a [`Development`] microsite.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Seo {
    /// Page title, if overridden.
    pub title: Option<SeoTitle>,

    /// Page meta description, if any.
    pub description: Option<SeoDescription>,
}

/// ID of a [`Development`].
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
    PartialEq,
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
    /// Name of a [`Development`].
    Name, |s| super::is_trimmed_line(s, 256)
}

define_text! {
    /// URL-safe unique identifier of a [`Development`] microsite.
    Slug, |s| {
        /// Regular expression checking [`Slug`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
        });

        s.len() <= Slug::MAX_LEN && REGEX.is_match(s)
    }
}

impl Slug {
    /// Maximum length of a [`Slug`].
    pub const MAX_LEN: usize = 128;

    /// Derives a [`Slug`] from the provided display `name`.
    ///
    /// Accented latin letters are folded to ASCII, and any run of other
    /// characters is collapsed into a single `-`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars().flat_map(char::to_lowercase) {
            let c = match c {
                'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
                'é' | 'è' | 'ê' | 'ë' => 'e',
                'í' | 'ì' | 'î' | 'ï' => 'i',
                'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
                'ú' | 'ù' | 'û' | 'ü' => 'u',
                'ñ' => 'n',
                'ç' => 'c',
                c => c,
            };
            if c.is_ascii_alphanumeric() {
                if slug.len() == Self::MAX_LEN {
                    break;
                }
                slug.push(c);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                if slug.len() + 1 >= Self::MAX_LEN {
                    break;
                }
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            _ = slug.pop();
        }
        Self::new(slug)
    }
}

define_text! {
    /// `#RRGGBB` color of a [`Development`] microsite.
    Color, |s| {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

define_text! {
    /// Tagline of a [`Development`].
    Tagline, |s| super::is_trimmed_line(s, 256)
}

define_text! {
    /// Description of a [`Development`].
    Description, |s| super::is_trimmed_text(s, 20_000)
}

define_text! {
    /// Free-text amenity of a [`Development`].
    AmenityLabel, |s| super::is_trimmed_line(s, 128)
}

define_text! {
    /// SEO title of a [`Development`] microsite.
    SeoTitle, |s| super::is_trimmed_line(s, 128)
}

define_text! {
    /// SEO meta description of a [`Development`] microsite.
    SeoDescription, |s| super::is_trimmed_line(s, 512)
}

/// [`DateTime`] when a [`Development`] was created.
pub type CreationDateTime = DateTimeOf<(Development, unit::Creation)>;

/// [`DateTime`] when a [`Development`] was modified.
pub type ModificationDateTime = DateTimeOf<(Development, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Color, Slug};

    #[test]
    fn slug_format() {
        assert!(Slug::new("residencial-los-arcos").is_some());
        assert!(Slug::new("torre-360").is_some());

        assert!(Slug::new("Los-Arcos").is_none());
        assert!(Slug::new("los--arcos").is_none());
        assert!(Slug::new("-los-arcos").is_none());
        assert!(Slug::new("los arcos").is_none());
        assert!(Slug::new("a".repeat(129)).is_none());
        assert!(Slug::new("a".repeat(128)).is_some());
    }

    #[test]
    fn slug_from_name() {
        assert_eq!(
            Slug::from_name("Residencial Los Árcos, Fase II").unwrap().to_string(),
            "residencial-los-arcos-fase-ii",
        );
        assert_eq!(
            Slug::from_name("  Peñasco & Mar — Torre 3 ").unwrap().to_string(),
            "penasco-mar-torre-3",
        );
        assert_eq!(
            Slug::from_name(&"x ".repeat(100)).unwrap().to_string().len(),
            127,
        );
        assert!(Slug::from_name("¿?").is_none());
    }

    #[test]
    fn color_format() {
        assert!(Color::new("#1e3a5F").is_some());

        assert!(Color::new("1E3A5F").is_none());
        assert!(Color::new("#1E3A5").is_none());
        assert!(Color::new("#GGGGGG").is_none());
    }
}
