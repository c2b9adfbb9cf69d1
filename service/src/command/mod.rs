//! [`Command`] definition.

pub mod authorize_session;
pub mod create_development;
pub mod delete_development;
pub mod save_listing_draft;
pub mod submit_lead;
pub mod submit_listing;
pub mod update_development;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_session::AuthorizeSession,
    create_development::CreateDevelopment,
    delete_development::DeleteDevelopment,
    save_listing_draft::SaveListingDraft, submit_lead::SubmitLead,
    submit_listing::SubmitListing, update_development::UpdateDevelopment,
};
