//! Property search definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::read::property::{self as read, filter};

use crate::{api::scalar, define_error, AsError, Error};

/// Property search in its URL query-string form, like
/// `state=Jalisco&listingType=sale&page=2`.
///
/// Decoded leniently: unknown parameters and inconsistent values are
/// ignored.
#[derive(
    AsRef, Clone, Debug, Default, Display, From, GraphQLScalar, Into,
)]
#[graphql(with = scalar::Via::<read::Filter>)]
pub struct SearchQuery(read::Filter);

/// Selectable price bracket of a search.
#[derive(Clone, Debug, GraphQLObject)]
pub struct PriceBracket {
    /// Human-readable label of this `PriceBracket`.
    pub label: String,

    /// Price range this `PriceBracket` selects, in `min-max` form.
    pub range: String,
}

impl From<&read::Bracket> for PriceBracket {
    fn from(bracket: &read::Bracket) -> Self {
        Self {
            label: bracket.label.to_owned(),
            range: bracket.range.to_string(),
        }
    }
}

impl AsError for filter::ParseError {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            match self {
                Self::UnknownParam => SearchError::UnknownParam,
                Self::InvalidValue(_) => SearchError::InvalidValue,
            }
            .into(),
        )
    }
}

impl AsError for filter::ChangeError {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            match self {
                Self::NoStateSelected => SearchError::NoStateSelected,
                Self::MunicipalityOutOfState => {
                    SearchError::MunicipalityOutOfState
                }
                Self::PriceRangeNotOffered => SearchError::PriceRangeNotOffered,
            }
            .into(),
        )
    }
}

define_error! {
    enum SearchError {
        #[code = "UNKNOWN_SEARCH_PARAM"]
        #[status = BAD_REQUEST]
        #[message = "Unknown search parameter"]
        UnknownParam,

        #[code = "INVALID_SEARCH_VALUE"]
        #[status = BAD_REQUEST]
        #[message = "Invalid value of the search parameter"]
        InvalidValue,

        #[code = "NO_STATE_SELECTED"]
        #[status = BAD_REQUEST]
        #[message = "Municipality cannot be selected without a state"]
        NoStateSelected,

        #[code = "MUNICIPALITY_OUT_OF_STATE"]
        #[status = BAD_REQUEST]
        #[message = "Municipality does not belong to the selected state"]
        MunicipalityOutOfState,

        #[code = "PRICE_RANGE_NOT_OFFERED"]
        #[status = BAD_REQUEST]
        #[message = "Price range is not offered for the selected currency \
                     and listing type"]
        PriceRangeNotOffered,
    }
}
