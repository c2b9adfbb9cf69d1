//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Submits a buyer inquiry about a `Property`.
    ///
    /// Notifies the `Property` contact (or the administrator) by email,
    /// while a notification failure doesn't fail the inquiry.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the provided ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "submitLead",
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
            source = ?source.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn submit_lead(
        property_id: api::property::Id,
        name: api::property::ContactName,
        email: api::property::ContactEmail,
        phone: Option<api::property::ContactPhone>,
        message: api::lead::Message,
        source: Option<api::lead::Source>,
        ctx: &Context,
    ) -> Result<api::lead::Lead, Error> {
        ctx.service()
            .execute(command::SubmitLead {
                property_id: property_id.into(),
                name: name.into(),
                email: email.into(),
                phone: phone.map(Into::into),
                message: message.into(),
                source: source.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Saves the listing of the current user as a draft, creating it if
    /// the user has none yet.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `INVALID_LISTING_VALUE` - a value is out of range;
    /// - `LISTING_NOT_EDITABLE` - the listing is pending or active.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "saveListingDraft",
            otel.name = Self::SPAN_NAME,
            title = %listing.title,
        ),
    )]
    pub async fn save_listing_draft(
        listing: api::listing::Input,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let owner = ctx.current_session().await?.user_id;
        let draft = listing.into_draft().map_err(ctx.error())?;
        ctx.service()
            .execute(command::SaveListingDraft { owner, draft })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Saves the listing of the current user and submits it for moderation.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `INVALID_LISTING_VALUE` - a value is out of range;
    /// - `LISTING_NO_PHOTOS` - no images are provided;
    /// - `LISTING_NOT_EDITABLE` - the listing is pending or active.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitListing",
            otel.name = Self::SPAN_NAME,
            title = %listing.title,
        ),
    )]
    pub async fn submit_listing(
        listing: api::listing::Input,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let owner = ctx.current_session().await?.user_id;
        let draft = listing.into_draft().map_err(ctx.error())?;
        ctx.service()
            .execute(command::SubmitListing { owner, draft })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Development` microsite.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_ADMIN` - the current user is not an administrator;
    /// - `INVALID_SLUG` - no slug can be derived from the name;
    /// - `SLUG_OCCUPIED` - the slug is used by another `Development`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createDevelopment",
            name = %development.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_development(
        development: api::development::Input,
        ctx: &Context,
    ) -> Result<api::Development, Error> {
        let by = ctx.current_session().await?;
        let draft = development.into_draft().map_err(ctx.error())?;
        ctx.service()
            .execute(command::CreateDevelopment { by, draft })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the content of the `Development` microsite with the
    /// provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_ADMIN` - the current user is not an administrator;
    /// - `DEVELOPMENT_NOT_EXISTS` - the `Development` does not exist;
    /// - `INVALID_SLUG` - no slug can be derived from the name;
    /// - `SLUG_OCCUPIED` - the slug is used by another `Development`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateDevelopment",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_development(
        id: api::development::Id,
        development: api::development::Input,
        ctx: &Context,
    ) -> Result<api::Development, Error> {
        let by = ctx.current_session().await?;
        let draft = development.into_draft().map_err(ctx.error())?;
        ctx.service()
            .execute(command::UpdateDevelopment {
                by,
                id: id.into(),
                draft,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Development` microsite with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_ADMIN` - the current user is not an administrator;
    /// - `DEVELOPMENT_NOT_EXISTS` - the `Development` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteDevelopment",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_development(
        id: api::development::Id,
        ctx: &Context,
    ) -> Result<api::development::Id, Error> {
        let by = ctx.current_session().await?;
        ctx.service()
            .execute(command::DeleteDevelopment { by, id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }
}
