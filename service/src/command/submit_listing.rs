//! [`Command`] for submitting a self-listed [`Property`] for review.

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Status},
        user, Property,
    },
    infra::{database, Database},
    Service,
};

use super::{save_listing_draft, Command};

/// [`Command`] for saving the content of the single [`Property`] listed by
/// its owner and submitting it for review.
///
/// A listing without photos is never submitted, and no [`Database`]
/// operation is performed for it.
#[derive(Clone, Debug)]
pub struct SubmitListing {
    /// ID of the owner.
    pub owner: user::Id,

    /// Content of the listing.
    pub draft: property::Draft,
}

impl<Db, Ml, Rp> Command<SubmitListing> for Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<Property>, user::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitListing { owner, draft } = cmd;

        if draft.images.is_empty() {
            return Err(tracerr::new!(E::NoPhotos));
        }

        self.save_listing(owner, draft, Some(Status::Pending))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Listing has no photos attached.
    #[display("At least one photo is required")]
    NoPhotos,

    /// Failed to save the listing.
    #[display("{_0}")]
    #[from]
    Save(save_listing_draft::ExecutionError),
}
