//! GraphQL [`Query`]s definitions.

use juniper::{graphql_object, GraphQLObject};
use service::{
    query,
    read::{self, development::Visibility},
    Query as _,
};

use crate::{
    api::{self, scalar, search::SearchQuery},
    AsError, Context, Error,
};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Searches the publicly listed `Property`s.
    ///
    /// Never fails: an empty page is returned if the search cannot be
    /// performed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "searchProperties",
            otel.name = Self::SPAN_NAME,
            query = ?query.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn search_properties(
        query: Option<SearchQuery>,
        ctx: &Context,
    ) -> api::property::list::Page {
        let filter = query.unwrap_or_default().into();
        ctx.service()
            .execute(query::properties::Search(filter))
            .await
            .unwrap_or_else(|e| match e {})
            .into()
    }

    /// Returns the map of the publicly listed `Property`s matching the
    /// search.
    ///
    /// Pagination of the search is ignored: every matching `Property` with
    /// known coordinates is plotted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "propertyMap",
            otel.name = Self::SPAN_NAME,
            query = ?query.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn property_map(
        query: Option<SearchQuery>,
        ctx: &Context,
    ) -> api::property::map::View {
        let filter = query.unwrap_or_default().into();
        ctx.service()
            .execute(query::properties::Map(filter))
            .await
            .unwrap_or_else(|e| match e {})
            .into()
    }

    /// Applies a change of a single search parameter to the provided search,
    /// keeping its dependent parameters consistent.
    ///
    /// Missing `value` clears the parameter.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_SEARCH_PARAM` - the `param` is not a search parameter;
    /// - `INVALID_SEARCH_VALUE` - the `value` cannot be parsed;
    /// - `NO_STATE_SELECTED` - a municipality is selected without a state;
    /// - `MUNICIPALITY_OUT_OF_STATE` - a municipality is not in the selected
    ///                                 state;
    /// - `PRICE_RANGE_NOT_OFFERED` - a price range is not one of the offered
    ///                               brackets.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "refineSearch",
            otel.name = Self::SPAN_NAME,
            param = %param,
            query = ?query.as_ref().map(ToString::to_string),
            value = ?value,
        ),
    )]
    pub fn refine_search(
        query: Option<SearchQuery>,
        param: String,
        value: Option<String>,
        ctx: &Context,
    ) -> Result<SearchQuery, Error> {
        let mut filter =
            read::property::Filter::from(query.unwrap_or_default());
        let change = read::property::Change::parse(&param, value.as_deref())
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        filter
            .apply(change)
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        Ok(filter.into())
    }

    /// Returns the price brackets offered for browsing the provided listing
    /// type in the provided currency.
    #[tracing::instrument(
        skip_all,
        fields(
            currency = ?currency,
            gql.name = "priceBrackets",
            listing_type = ?listing_type,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn price_brackets(
        #[graphql(default = api::property::Currency::Usd)]
        currency: api::property::Currency,
        #[graphql(default = api::property::ListingType::Sale)]
        listing_type: api::property::ListingType,
    ) -> Vec<api::search::PriceBracket> {
        read::property::bracket_table(currency.into(), listing_type.into())
            .iter()
            .map(Into::into)
            .collect()
    }

    /// Returns the Mexican states suggested for a search.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "states", otel.name = Self::SPAN_NAME),
    )]
    pub fn states() -> Vec<String> {
        read::property::location::states().map(str::to_owned).collect()
    }

    /// Returns the municipalities of the provided Mexican state suggested
    /// for a search.
    ///
    /// Unknown state has no municipalities.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "municipalities",
            otel.name = Self::SPAN_NAME,
            state = %state,
        ),
    )]
    pub fn municipalities(state: String) -> Vec<String> {
        read::property::location::municipalities(&state)
            .iter()
            .copied()
            .map(str::to_owned)
            .collect()
    }

    /// Returns the publicly listed `Property` with the provided ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "property",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        ctx.service()
            .execute(query::property::Listed(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }

    /// Returns the exchange rates every price is currently converted with.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "exchangeRates", otel.name = Self::SPAN_NAME),
    )]
    pub async fn exchange_rates(ctx: &Context) -> ExchangeRates {
        let rates = ctx
            .service()
            .execute(query::ExchangeRates)
            .await
            .unwrap_or_else(|e| match e {});
        ExchangeRates {
            usd_mxn: rates.usd_mxn().into(),
            as_of: rates.as_of.map(|d| d.to_string()),
            is_fallback: rates.is_fallback,
        }
    }

    /// Returns the published `Development` microsite with the provided slug,
    /// if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "development",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn development(
        slug: api::development::Slug,
        ctx: &Context,
    ) -> Result<Option<api::Development>, Error> {
        ctx.service()
            .execute(query::development::BySlug(slug.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|d| d.map(Into::into))
    }

    /// Returns the published `Development` microsites, featured first.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "developments", otel.name = Self::SPAN_NAME),
    )]
    pub async fn developments(
        ctx: &Context,
    ) -> Result<Vec<api::Development>, Error> {
        ctx.service()
            .execute(query::developments::Published::by(Visibility::Published))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ds| ds.into_iter().map(Into::into).collect())
    }

    /// Returns every `Development` microsite, inactive ones included.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_ADMIN` - the current user is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "allDevelopments", otel.name = Self::SPAN_NAME),
    )]
    pub async fn all_developments(
        ctx: &Context,
    ) -> Result<Vec<api::Development>, Error> {
        let by = ctx.current_session().await?;
        ctx.service()
            .execute(query::developments::All { by })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ds| ds.into_iter().map(Into::into).collect())
    }

    /// Returns the listing of the current user, if any.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "myListing", otel.name = Self::SPAN_NAME),
    )]
    pub async fn my_listing(
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        let owner = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::listing::ByOwner::by(owner))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }
}

/// Exchange rates every price is converted with.
#[derive(Clone, Debug, GraphQLObject)]
pub struct ExchangeRates {
    /// Amount of Mexican pesos in one US dollar.
    pub usd_mxn: scalar::Decimal,

    /// Date the rate was published on, if known.
    pub as_of: Option<String>,

    /// Indicator whether the configured fallback rate is used.
    pub is_fallback: bool,
}
