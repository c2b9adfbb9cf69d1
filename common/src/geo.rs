//! Geographic primitives used for map rendering.

/// Point on the Earth surface in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude, in `[-90, 90]` range.
    latitude: f64,

    /// Longitude, in `[-180, 180]` range.
    longitude: f64,
}

impl Coordinates {
    /// Creates new [`Coordinates`] if both components are finite and lie in
    /// their valid ranges.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        ((-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude))
        .then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Creates new [`Coordinates`] without checking their ranges.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `latitude` lies in `[-90, 90]` range, and
    /// `longitude` lies in `[-180, 180]` range.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates new [`Coordinates`] out of optional components, as stored rows
    /// may lack either of them.
    #[must_use]
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Option<Self> {
        Self::new(latitude?, longitude?)
    }

    /// Returns the latitude of these [`Coordinates`].
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude of these [`Coordinates`].
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Rectangular area enclosing a set of [`Coordinates`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// South-west corner of these [`Bounds`].
    pub south_west: Coordinates,

    /// North-east corner of these [`Bounds`].
    pub north_east: Coordinates,
}

impl Bounds {
    /// Computes the smallest [`Bounds`] enclosing all the provided points.
    ///
    /// [`None`] is returned if there are no points at all.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Self {
                south_west: first,
                north_east: first,
            },
            |b, p| Self {
                south_west: Coordinates {
                    latitude: b.south_west.latitude.min(p.latitude),
                    longitude: b.south_west.longitude.min(p.longitude),
                },
                north_east: Coordinates {
                    latitude: b.north_east.latitude.max(p.latitude),
                    longitude: b.north_east.longitude.max(p.longitude),
                },
            },
        ))
    }

    /// Indicates whether the provided point lies within these [`Bounds`].
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south_west.latitude..=self.north_east.latitude)
            .contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude)
                .contains(&point.longitude)
    }

    /// Returns the centre point of these [`Bounds`].
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: (self.south_west.latitude + self.north_east.latitude)
                / 2.0,
            longitude: (self.south_west.longitude + self.north_east.longitude)
                / 2.0,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Bounds, Coordinates};

    fn point(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).is_none());
        assert!(Coordinates::new(0.0, -180.5).is_none());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
        assert!(Coordinates::from_parts(Some(20.9), None).is_none());
        assert!(Coordinates::from_parts(Some(20.9), Some(-100.7)).is_some());
    }

    #[test]
    fn encloses_every_point() {
        let points = [
            point(20.914, -100.745),
            point(21.161, -86.851),
            point(19.432, -99.133),
        ];
        let bounds = Bounds::enclosing(points).unwrap();

        assert_eq!(bounds.south_west, point(19.432, -100.745));
        assert_eq!(bounds.north_east, point(21.161, -86.851));
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn single_point_is_degenerate_bounds() {
        let p = point(20.914, -100.745);
        let bounds = Bounds::enclosing([p]).unwrap();

        assert_eq!(bounds.center(), p);
        assert!(Bounds::enclosing([]).is_none());
    }
}
