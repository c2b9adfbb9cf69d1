//! Search [`Filter`] state and its query-string representation.

use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use common::{define_kind, pagination, Currency};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::domain::property::{
    Amenity, Category, ListingType, Municipality, State,
};

use super::{
    bracket::{bracket_table, Bracket},
    list::{Criteria, Predicate, Selector, PAGE_SIZE},
    location,
};

/// Authoritative state of a property search.
///
/// Fields are changed only via [`Filter::apply()`], which keeps dependent
/// fields consistent, so any [`Filter`] value describes a valid query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// Selected [`State`], if any.
    state: Option<State>,

    /// Selected [`Municipality`] of the selected [`State`], if any.
    municipality: Option<Municipality>,

    /// Selected [`ListingType`], if any.
    listing_type: Option<ListingType>,

    /// Selected property [`Category`], if any.
    category: Option<Category>,

    /// Selected [`PriceRange`] out of the applicable [`Bracket`] table.
    price_range: Option<PriceRange>,

    /// Minimum number of bedrooms, if any.
    beds: Option<u16>,

    /// Minimum number of bathrooms, if any.
    baths: Option<Decimal>,

    /// Indicator whether only featured properties are requested.
    featured_only: bool,

    /// Required [`Amenity`] flags.
    amenities: BTreeSet<Amenity>,

    /// Requested [`Sort`] order.
    sort: Sort,

    /// Display [`Currency`] prices are browsed in.
    currency: Currency,

    /// Requested [`pagination::Number`].
    page: pagination::Number,
}

impl Filter {
    /// Returns the selected [`State`], if any.
    #[must_use]
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// Returns the selected [`Municipality`], if any.
    #[must_use]
    pub fn municipality(&self) -> Option<&Municipality> {
        self.municipality.as_ref()
    }

    /// Returns the selected [`ListingType`], if any.
    #[must_use]
    pub fn listing_type(&self) -> Option<ListingType> {
        self.listing_type
    }

    /// Returns the selected [`Category`], if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the selected [`PriceRange`], if any.
    #[must_use]
    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    /// Returns the minimum number of bedrooms, if any.
    #[must_use]
    pub fn beds(&self) -> Option<u16> {
        self.beds
    }

    /// Returns the minimum number of bathrooms, if any.
    #[must_use]
    pub fn baths(&self) -> Option<Decimal> {
        self.baths
    }

    /// Indicates whether only featured properties are requested.
    #[must_use]
    pub fn featured_only(&self) -> bool {
        self.featured_only
    }

    /// Returns the required [`Amenity`] flags.
    #[must_use]
    pub fn amenities(&self) -> &BTreeSet<Amenity> {
        &self.amenities
    }

    /// Returns the requested [`Sort`] order.
    #[must_use]
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Returns the display [`Currency`].
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the requested [`pagination::Number`].
    #[must_use]
    pub fn page(&self) -> pagination::Number {
        self.page
    }

    /// Returns the [`Bracket`] table applicable to this [`Filter`].
    ///
    /// Properties for sale are assumed while no [`ListingType`] is selected.
    #[must_use]
    pub fn brackets(&self) -> &'static [Bracket] {
        bracket_table(
            self.currency,
            self.listing_type.unwrap_or(ListingType::Sale),
        )
    }

    /// Returns the municipalities selectable in this [`Filter`].
    ///
    /// Empty while no [`State`] is selected.
    #[must_use]
    pub fn municipality_options(&self) -> &'static [&'static str] {
        self.state
            .as_ref()
            .map_or(&[], |s| location::municipalities(s.as_ref()))
    }

    /// Applies the provided [`Change`] to this [`Filter`], clearing the
    /// fields depending on the changed one.
    ///
    /// Any change, except the [`Change::Page`] itself, moves the search back
    /// to the first page.
    ///
    /// # Errors
    ///
    /// If the [`Change`] would make this [`Filter`] inconsistent. This
    /// [`Filter`] is left untouched in such case.
    pub fn apply(&mut self, change: Change) -> Result<(), ChangeError> {
        use ChangeError as E;

        match change {
            Change::State(state) => {
                if self.state != state {
                    self.municipality = None;
                }
                self.state = state;
            }
            Change::Municipality(municipality) => {
                if let Some(m) = &municipality {
                    if self.state.is_none() {
                        return Err(E::NoStateSelected);
                    }
                    let m: &str = m.as_ref();
                    if !self.municipality_options().contains(&m) {
                        return Err(E::MunicipalityOutOfState);
                    }
                }
                self.municipality = municipality;
            }
            Change::ListingType(listing_type) => {
                if self.listing_type != listing_type {
                    self.price_range = None;
                }
                self.listing_type = listing_type;
            }
            Change::Currency(currency) => {
                if self.currency != currency {
                    self.price_range = None;
                }
                self.currency = currency;
            }
            Change::PriceRange(range) => {
                if let Some(r) = range {
                    if !self.brackets().iter().any(|b| b.range == r) {
                        return Err(E::PriceRangeNotOffered);
                    }
                }
                self.price_range = range;
            }
            Change::Category(category) => self.category = category,
            Change::Beds(beds) => self.beds = beds.filter(|&n| n > 0),
            Change::Baths(baths) => {
                self.baths = baths.filter(|n| *n > Decimal::ZERO);
            }
            Change::FeaturedOnly(featured) => self.featured_only = featured,
            Change::Amenity(amenity, required) => {
                _ = if required {
                    self.amenities.insert(amenity)
                } else {
                    self.amenities.remove(&amenity)
                };
            }
            Change::Sort(sort) => self.sort = sort,
            Change::Reset => {
                *self = Self {
                    currency: self.currency,
                    ..Self::default()
                };
            }
            Change::Page(page) => {
                self.page = page;
                return Ok(());
            }
        }
        self.page = pagination::Number::FIRST;
        Ok(())
    }

    /// Builds the query [`Criteria`] matching this [`Filter`].
    #[must_use]
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::listed();
        if let Some(state) = &self.state {
            criteria = criteria.and(Predicate::State(state.clone()));
        }
        if let Some(municipality) = &self.municipality {
            criteria =
                criteria.and(Predicate::Municipality(municipality.clone()));
        }
        if let Some(listing_type) = self.listing_type {
            criteria = criteria.and(Predicate::ListingType(listing_type));
        }
        if let Some(category) = self.category {
            criteria = criteria.and(Predicate::Category(category));
        }
        for &amenity in &self.amenities {
            criteria = criteria.and(Predicate::Amenity(amenity));
        }
        if self.featured_only {
            criteria = criteria.and(Predicate::Featured);
        }
        if let Some(beds) = self.beds {
            criteria = criteria.and(Predicate::MinBedrooms(beds));
        }
        if let Some(baths) = self.baths {
            criteria = criteria.and(Predicate::MinBathrooms(baths));
        }
        if let Some(range) = self.price_range {
            let currency = self.currency;
            if let Some(min) = range.min {
                criteria = criteria.and(Predicate::MinPrice(currency, min));
            }
            if let Some(max) = range.max {
                criteria = criteria.and(Predicate::MaxPrice(currency, max));
            }
        }
        criteria
    }

    /// Builds the paginated list [`Selector`] matching this [`Filter`].
    #[must_use]
    pub fn selector(&self) -> Selector {
        Selector {
            criteria: self.criteria(),
            sort: self.sort,
            page: self.page,
            size: PAGE_SIZE,
        }
    }
}

/// Canonical order of query-string parameters.
const PARAMS: &[&str] = &[
    "state",
    "municipality",
    "type",
    "listingType",
    "minPrice",
    "maxPrice",
    "beds",
    "baths",
    "featured",
    "page",
    "displayCurrency",
    "pool",
    "ac",
    "pets",
    "amenities",
    "sort",
];

impl fmt::Display for Filter {
    /// Encodes this [`Filter`] as a query string, omitting the defaults.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        for &param in PARAMS {
            let value = match param {
                "state" => self.state.as_ref().map(ToString::to_string),
                "municipality" => {
                    self.municipality.as_ref().map(ToString::to_string)
                }
                "type" => self.category.map(|c| c.to_string()),
                "listingType" => self.listing_type.map(|t| t.to_string()),
                "minPrice" => self
                    .price_range
                    .and_then(|r| r.min)
                    .map(|m| m.normalize().to_string()),
                "maxPrice" => self
                    .price_range
                    .and_then(|r| r.max)
                    .map(|m| m.normalize().to_string()),
                "beds" => self.beds.map(|n| n.to_string()),
                "baths" => self.baths.map(|n| n.normalize().to_string()),
                "featured" => self.featured_only.then(|| "true".into()),
                "page" => (!self.page.is_first()).then(|| self.page.to_string()),
                "displayCurrency" => (self.currency != Currency::default())
                    .then(|| self.currency.to_string()),
                "pool" | "ac" | "pets" => param
                    .parse::<Amenity>()
                    .ok()
                    .filter(|a| self.amenities.contains(a))
                    .map(|_| "true".into()),
                "amenities" => {
                    let extended = self
                        .amenities
                        .iter()
                        .filter(|a| !a.is_primary())
                        .map(|a| a.as_str())
                        .collect::<Vec<_>>();
                    (!extended.is_empty()).then(|| extended.join(","))
                }
                "sort" => (self.sort != Sort::default())
                    .then(|| self.sort.to_string()),
                _ => None,
            };
            if let Some(value) = value {
                _ = qs.append_pair(param, &value);
            }
        }
        f.write_str(&qs.finish())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    /// Decodes a [`Filter`] from the provided query string leniently.
    ///
    /// Unknown parameters, unparsable values and values inconsistent with the
    /// rest of the [`Filter`] are ignored. A leading `?` is allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pairs = form_urlencoded::parse(s.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect::<Vec<_>>();
        let param = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
        };

        let mut filter = Self::default();

        // Dependencies go first, so that dependent fields are not cleared
        // after being decoded.
        let mut changes = Vec::new();
        for name in ["state", "municipality", "type", "listingType"] {
            changes.push(Change::parse(name, param(name)));
        }
        changes.push(Change::parse("displayCurrency", param("displayCurrency")));
        if param("minPrice").is_some() || param("maxPrice").is_some() {
            changes.push(
                PriceRange::from_bounds(param("minPrice"), param("maxPrice"))
                    .map(|r| Change::PriceRange(Some(r))),
            );
        }
        for name in ["beds", "baths", "featured", "pool", "ac", "pets"] {
            changes.push(Change::parse(name, param(name)));
        }
        for amenity in param("amenities").into_iter().flat_map(|v| v.split(','))
        {
            changes.push(
                amenity
                    .trim()
                    .parse::<Amenity>()
                    .map(|a| Change::Amenity(a, true))
                    .map_err(|_| ParseError::InvalidValue("amenities")),
            );
        }
        changes.push(Change::parse("sort", param("sort")));
        changes.push(Change::parse("page", param("page")));

        for change in changes.into_iter().flatten() {
            _ = filter.apply(change);
        }
        Ok(filter)
    }
}

/// Single change of a [`Filter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Change {
    /// Selects the provided [`State`], or clears the selection.
    State(Option<State>),

    /// Selects the provided [`Municipality`], or clears the selection.
    Municipality(Option<Municipality>),

    /// Selects the provided [`ListingType`], or clears the selection.
    ListingType(Option<ListingType>),

    /// Selects the provided [`Category`], or clears the selection.
    Category(Option<Category>),

    /// Selects the provided [`PriceRange`], or clears the selection.
    PriceRange(Option<PriceRange>),

    /// Sets the minimum number of bedrooms, or clears it.
    Beds(Option<u16>),

    /// Sets the minimum number of bathrooms, or clears it.
    Baths(Option<Decimal>),

    /// Toggles the featured-only restriction.
    FeaturedOnly(bool),

    /// Toggles the requirement of the provided [`Amenity`].
    Amenity(Amenity, bool),

    /// Changes the [`Sort`] order.
    Sort(Sort),

    /// Changes the display [`Currency`].
    Currency(Currency),

    /// Navigates to the provided page.
    Page(pagination::Number),

    /// Clears every filter, keeping the display [`Currency`].
    Reset,
}

impl Change {
    /// Parses a [`Change`] of the query-string `param`eter to the provided
    /// `value`.
    ///
    /// Missing `value` clears the parameter. `minPrice` and `maxPrice` are
    /// not supported separately, use `priceRange` in `min-max` format
    /// instead.
    ///
    /// # Errors
    ///
    /// If the `param`eter is unknown or its `value` is invalid.
    pub fn parse(param: &str, value: Option<&str>) -> Result<Self, ParseError> {
        use ParseError as E;

        /// Parses an optional `value` of the `param`eter.
        fn opt<T: FromStr>(
            param: &'static str,
            value: Option<&str>,
        ) -> Result<Option<T>, ParseError> {
            value
                .map(|v| v.trim().parse::<T>())
                .transpose()
                .map_err(|_| ParseError::InvalidValue(param))
        }

        /// Parses a boolean toggle.
        fn toggle(value: Option<&str>) -> Result<bool, ParseError> {
            match value.map(str::trim) {
                None | Some("" | "false" | "0") => Ok(false),
                Some("true" | "1") => Ok(true),
                Some(_) => Err(ParseError::InvalidValue("toggle")),
            }
        }

        Ok(match param {
            "state" => Self::State(opt("state", value)?),
            "municipality" => Self::Municipality(opt("municipality", value)?),
            "type" => Self::Category(opt("type", value)?),
            "listingType" => Self::ListingType(opt("listingType", value)?),
            "priceRange" => Self::PriceRange(opt("priceRange", value)?),
            "beds" => Self::Beds(opt("beds", value)?),
            "baths" => Self::Baths(opt("baths", value)?),
            "featured" => Self::FeaturedOnly(toggle(value)?),
            "pool" | "ac" | "pets" => Self::Amenity(
                param.parse().map_err(|_| E::UnknownParam)?,
                toggle(value)?,
            ),
            "amenity" => {
                let (amenity, on) =
                    value.and_then(|v| v.split_once('=')).map_or_else(
                        || (value.unwrap_or_default(), true),
                        |(a, on)| (a, on.trim() == "true"),
                    );
                Self::Amenity(
                    amenity
                        .trim()
                        .parse()
                        .map_err(|_| E::InvalidValue("amenity"))?,
                    on,
                )
            }
            "sort" => Self::Sort(opt("sort", value)?.unwrap_or_default()),
            "displayCurrency" => Self::Currency(
                opt::<String>("displayCurrency", value)?
                    .map(|c| c.to_ascii_uppercase().parse())
                    .transpose()
                    .map_err(|_| E::InvalidValue("displayCurrency"))?
                    .unwrap_or_default(),
            ),
            "page" => Self::Page(
                opt::<u32>("page", value)?
                    .map(|n| {
                        pagination::Number::new(n)
                            .ok_or(E::InvalidValue("page"))
                    })
                    .transpose()?
                    .unwrap_or_default(),
            ),
            "reset" => Self::Reset,
            _ => return Err(E::UnknownParam),
        })
    }
}

/// Error of parsing a [`Change`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Parameter is not a known [`Filter`] parameter.
    #[display("Unknown search parameter")]
    UnknownParam,

    /// Value of the parameter is invalid.
    #[display("Invalid value of `{_0}` search parameter")]
    InvalidValue(#[error(not(source))] &'static str),
}

/// Error of applying a [`Change`] to a [`Filter`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ChangeError {
    /// Municipality is selected while no state is selected.
    #[display("Municipality cannot be selected without a state")]
    NoStateSelected,

    /// Municipality does not belong to the selected state.
    #[display("Municipality does not belong to the selected state")]
    MunicipalityOutOfState,

    /// Price range is not a part of the applicable bracket table.
    #[display("Price range is not offered for the selected currency and type")]
    PriceRangeNotOffered,
}

/// Range of prices with at least one bound.
///
/// Textual form is `min-max`, with either bound omissible.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PriceRange {
    /// Inclusive lower bound, if any.
    pub min: Option<Decimal>,

    /// Inclusive upper bound, if any.
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Creates a new [`PriceRange`] if at least one bound is present and the
    /// bounds are ordered.
    #[must_use]
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Option<Self> {
        let valid = match (min, max) {
            (None, None) => false,
            (Some(min), Some(max)) => {
                min >= Decimal::ZERO && min <= max
            }
            (Some(bound), None) | (None, Some(bound)) => bound >= Decimal::ZERO,
        };
        valid.then_some(Self { min, max })
    }

    /// Creates a new [`PriceRange`] without checking its bounds.
    #[must_use]
    pub(super) const fn new_unchecked(
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Self {
        Self { min, max }
    }

    /// Parses a [`PriceRange`] out of separate textual bounds.
    fn from_bounds(
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<Self, ParseError> {
        let bound = |b: Option<&str>| {
            b.map(|b| b.trim().parse::<Decimal>())
                .transpose()
                .map_err(|_| ParseError::InvalidValue("priceRange"))
        };
        Self::new(bound(min)?, bound(max)?)
            .ok_or(ParseError::InvalidValue("priceRange"))
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{}", min.normalize())?;
        }
        f.write_str("-")?;
        if let Some(max) = self.max {
            write!(f, "{}", max.normalize())?;
        }
        Ok(())
    }
}

impl FromStr for PriceRange {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s.split_once('-').ok_or("missing `-` separator")?;
        let bound = |b: &str| {
            let b = b.trim();
            (!b.is_empty())
                .then(|| b.parse::<Decimal>())
                .transpose()
                .map_err(|_| "invalid bound")
        };
        Self::new(bound(min)?, bound(max)?).ok_or("invalid `PriceRange`")
    }
}

define_kind! {
    #[doc = "Sort order of search results."]
    enum Sort {
        #[doc = "Featured first, newest first within each group."]
        #[value = "featured"]
        Featured,

        #[doc = "Newest first."]
        #[value = "newest"]
        Newest,

        #[doc = "Cheapest first, by the raw stored price."]
        #[value = "price-asc"]
        PriceAsc,

        #[doc = "Most expensive first, by the raw stored price."]
        #[value = "price-desc"]
        PriceDesc,
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::Featured
    }
}
