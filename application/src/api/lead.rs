//! Lead-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{property, scalar},
    define_error, AsError, Error,
};

/// Unique identifier of a `Lead`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::lead::Id)]
#[into(domain::lead::Id)]
#[graphql(name = "LeadId", transparent)]
pub struct Id(Uuid);

/// Free-text message of a `Lead`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadMessage", with = scalar::Via::<domain::lead::Message>)]
pub struct Message(domain::lead::Message);

/// Tag of the page or campaign a `Lead` came from.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadSource", with = scalar::Via::<domain::lead::Source>)]
pub struct Source(domain::lead::Source);

/// Buyer inquiry about a `Property`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Lead {
    /// Unique identifier of this `Lead`.
    pub id: Id,

    /// ID of the inquired `Property`.
    pub property_id: property::Id,
}

impl From<domain::Lead> for Lead {
    fn from(lead: domain::Lead) -> Self {
        Self {
            id: lead.id.into(),
            property_id: lead.property_id.into(),
        }
    }
}

impl AsError for command::submit_lead::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(LeadError::PropertyNotExists.into())
            }
        }
    }
}

define_error! {
    enum LeadError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` does not exist"]
        PropertyNotExists,
    }
}
