//! Map [`View`] of search results.
//!
//! The map plots every matching [`Property`] having coordinates, rather than
//! the current list page only, so its density reflects the whole filtered
//! population.

use common::{Bounds, Coordinates, Currency, Money};
use rust_decimal::Decimal;

use crate::domain::{image::ImageUrl, property, Property, Rates};

/// Centre of the default country-level view.
#[expect(unsafe_code, reason = "valid constant")]
pub const COUNTRY_CENTER: Coordinates =
    unsafe { Coordinates::new_unchecked(23.6345, -102.5528) };

/// Zoom level of the default country-level view.
pub const COUNTRY_ZOOM: u8 = 5;

/// Padding around plotted markers when fitting a view to them, in pixels.
pub const FIT_PADDING: u16 = 50;

/// Condensed card of a [`Property`] shown for a selected [`Marker`].
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Title of the [`Property`].
    pub title: property::Title,

    /// Price of the [`Property`] in the display currency.
    pub price: Money,

    /// Number of bedrooms, if known.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms, if known.
    pub bathrooms: Option<Decimal>,

    /// Built area in square feet, if known.
    pub sqft: Option<Decimal>,

    /// First image of the [`Property`], if any.
    pub thumbnail: Option<ImageUrl>,

    /// Path of the [`Property`] detail page.
    pub link: String,
}

/// Plotted [`Property`].
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// ID of the plotted [`Property`].
    pub id: property::Id,

    /// Position of this [`Marker`].
    pub coordinates: Coordinates,

    /// [`Summary`] of the plotted [`Property`].
    pub summary: Summary,
}

/// Visible area of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Viewport {
    /// Default country-level view.
    Country {
        /// Centre of the view.
        center: Coordinates,

        /// Zoom level of the view.
        zoom: u8,
    },

    /// View fitted to contain every plotted [`Marker`].
    Fit {
        /// [`Bounds`] containing every plotted [`Marker`].
        bounds: Bounds,

        /// Padding around the [`Bounds`] in pixels.
        padding: u16,
    },
}

impl Viewport {
    /// Default country-level [`Viewport`].
    pub const COUNTRY: Self = Self::Country {
        center: COUNTRY_CENTER,
        zoom: COUNTRY_ZOOM,
    };
}

/// Map state reconciled with a filtered set of [`Property`] rows.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// Plotted [`Marker`]s.
    markers: Vec<Marker>,

    /// [`Viewport`] fitted to the [`Marker`]s.
    viewport: Viewport,

    /// ID of the highlighted [`Marker`], if any.
    highlighted: Option<property::Id>,
}

impl View {
    /// Creates a new [`View`] plotting the provided [`Property`] rows with
    /// prices in the display `currency`.
    ///
    /// Rows without coordinates are skipped.
    pub fn new<I>(properties: I, currency: Currency, rates: &Rates) -> Self
    where
        I: IntoIterator<Item = Property>,
    {
        let markers = properties
            .into_iter()
            .filter_map(|p| {
                Some(Marker {
                    id: p.id,
                    coordinates: p.coordinates?,
                    summary: Summary {
                        price: p.price_in(currency, rates),
                        bedrooms: p.features.bedrooms,
                        bathrooms: p.features.bathrooms,
                        sqft: p.features.sqft,
                        thumbnail: p.images.into_iter().next(),
                        link: format!("/properties/{}", p.id),
                        title: p.title,
                    },
                })
            })
            .collect::<Vec<_>>();

        let viewport = Bounds::enclosing(markers.iter().map(|m| m.coordinates))
            .map_or(Viewport::COUNTRY, |bounds| Viewport::Fit {
                bounds,
                padding: FIT_PADDING,
            });

        Self {
            markers,
            viewport,
            highlighted: None,
        }
    }

    /// Returns the plotted [`Marker`]s.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns the [`Viewport`] of this [`View`].
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the ID of the highlighted [`Marker`], if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<property::Id> {
        self.highlighted
    }

    /// Highlights the [`Marker`] of the hovered list item, or clears the
    /// highlighting.
    ///
    /// Returns `false` if the hovered [`Property`] is not plotted, in which
    /// case nothing is highlighted.
    pub fn hover(&mut self, id: Option<property::Id>) -> bool {
        self.highlighted =
            id.filter(|id| self.markers.iter().any(|m| m.id == *id));
        self.highlighted.is_some() || id.is_none()
    }

    /// Returns the [`Marker`] to show the info card of.
    #[must_use]
    pub fn select(&self, id: property::Id) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod spec {
    use common::{Coordinates, Currency};
    use rust_decimal::Decimal;

    use crate::{
        domain::{image::ImageUrl, property, Rates},
        read::property::list::spec::listed,
    };

    use super::{View, Viewport, FIT_PADDING};

    #[test]
    fn empty_set_resets_to_country() {
        let view = View::new([], Currency::Usd, &Rates::default());

        assert!(view.markers().is_empty());
        assert_eq!(view.viewport(), Viewport::COUNTRY);

        let mut unplotted = listed("Casa", 1, 1);
        unplotted.coordinates = None;
        let view = View::new([unplotted], Currency::Usd, &Rates::default());
        assert_eq!(view.viewport(), Viewport::COUNTRY);
    }

    #[test]
    fn fits_every_marker() {
        let mut a = listed("San Miguel", 1, 1);
        a.coordinates = Coordinates::new(20.914, -100.745);
        let mut b = listed("Tulum", 2, 1);
        b.coordinates = Coordinates::new(20.211, -87.465);
        let mut c = listed("Unknown", 3, 1);
        c.coordinates = None;

        let view = View::new([a, b, c], Currency::Usd, &Rates::default());

        assert_eq!(view.markers().len(), 2);
        let Viewport::Fit { bounds, padding } = view.viewport() else {
            panic!("expected fitted viewport");
        };
        assert_eq!(padding, FIT_PADDING);
        assert!(view.markers().iter().all(|m| bounds.contains(m.coordinates)));
        assert_eq!(
            Some(bounds.south_west),
            Coordinates::new(20.211, -100.745),
        );
        assert_eq!(Some(bounds.north_east), Coordinates::new(20.914, -87.465));
    }

    #[test]
    fn summary_uses_display_currency_and_first_image() {
        let mut p = listed("Casa Azul", 300_000, 1);
        p.images = vec![
            ImageUrl::new("https://cdn.example.com/1.jpg").unwrap(),
            ImageUrl::new("https://cdn.example.com/2.jpg").unwrap(),
        ];
        let id = p.id;

        let view = View::new([p], Currency::Mxn, &Rates::default());
        let marker = view.select(id).unwrap();

        assert_eq!(marker.summary.price.currency, Currency::Mxn);
        assert_eq!(marker.summary.price.amount, Decimal::from(5_100_000));
        assert_eq!(
            marker.summary.thumbnail.as_ref().map(ToString::to_string),
            Some("https://cdn.example.com/1.jpg".into()),
        );
        assert_eq!(marker.summary.link, format!("/properties/{id}"));
    }

    #[test]
    fn hover_highlights_only_plotted() {
        let p = listed("Casa", 1, 1);
        let id = p.id;
        let mut view = View::new([p], Currency::Usd, &Rates::default());

        assert!(view.hover(Some(id)));
        assert_eq!(view.highlighted(), Some(id));

        assert!(!view.hover(Some(property::Id::new())));
        assert_eq!(view.highlighted(), None);

        assert!(view.hover(None));
        assert!(view.select(property::Id::new()).is_none());
    }
}
