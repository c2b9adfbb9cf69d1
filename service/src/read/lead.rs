//! Listing lookups used to route a [`Lead`].
//!
//! Only listed properties are looked up, see [`Property::is_listed()`].
//!
//! [`Lead`]: crate::domain::Lead
//! [`Property::is_listed()`]: crate::domain::Property::is_listed

use crate::domain::{lead::Broker, property};

/// Listing submitted by its owner directly.
#[derive(Clone, Debug)]
pub struct PublicListing {
    /// ID of the listed property.
    pub id: property::Id,

    /// Title of the listed property.
    pub title: property::Title,

    /// Declared contact of the owner, if any.
    pub contact: Option<property::Contact>,
}

/// Listing managed by a broker account.
#[derive(Clone, Debug)]
pub struct BrokerListing {
    /// ID of the listed property.
    pub id: property::Id,

    /// Title of the listed property.
    pub title: property::Title,

    /// Broker owning the listing, if it could be resolved.
    pub broker: Option<Broker>,
}
