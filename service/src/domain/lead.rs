//! [`Lead`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{client, contact, property};

/// Persisted buyer inquiry about a [`Property`].
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// ID of the [`Property`] this [`Lead`] is about.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: property::Id,

    /// Title of the [`Property`] at the moment of inquiry.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_title: property::Title,

    /// Name of the buyer.
    pub name: contact::Name,

    /// Email of the buyer.
    pub email: contact::Email,

    /// Phone of the buyer, if provided.
    pub phone: Option<contact::Phone>,

    /// [`Message`] of the buyer.
    pub message: Message,

    /// [`Kind`] of this [`Lead`].
    pub kind: Kind,

    /// [`Status`] of this [`Lead`].
    pub status: Status,

    /// [`Source`] this [`Lead`] came from.
    pub source: Source,

    /// Price charged to a broker for this [`Lead`] initially, in US dollars.
    pub base_price_usd: Decimal,

    /// Price currently charged to a broker for this [`Lead`], in US dollars.
    pub current_price_usd: Decimal,

    /// Broker owning the [`Property`], if it was resolved.
    ///
    /// [`Property`]: crate::domain::Property
    pub broker: Option<Broker>,

    /// [`DateTime`] when this [`Lead`] was created.
    pub created_at: CreationDateTime,
}

/// Broker details resolved for a [`Kind::Broker`] [`Lead`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Broker {
    /// ID of the broker [`Client`] account.
    ///
    /// [`Client`]: crate::domain::Client
    pub id: client::Id,

    /// Display name of the broker, if any.
    pub name: Option<contact::Name>,

    /// Email of the broker, if any.
    pub email: Option<contact::Email>,
}

/// ID of a [`Lead`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

define_text! {
    /// Free-text message of a [`Lead`].
    Message, |s| super::is_trimmed_text(s, 5000)
}

define_text! {
    /// Tag of the page or campaign a [`Lead`] came from.
    Source, |s| {
        super::is_trimmed_line(s, 64)
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    }
}

impl Default for Source {
    fn default() -> Self {
        Self("website".into())
    }
}

define_kind! {
    #[doc = "Kind of a [`Lead`] depending on who owns the inquired listing."]
    enum Kind {
        #[doc = "Listing was submitted by its owner directly."]
        #[value = "public"]
        Public,

        #[doc = "Listing is managed by a broker account."]
        #[value = "broker"]
        Broker,
    }
}

define_kind! {
    #[doc = "Processing status of a [`Lead`]."]
    enum Status {
        #[doc = "Awaits a manual assignment."]
        #[value = "new"]
        New,

        #[doc = "Buyer has been contacted."]
        #[value = "contacted"]
        Contacted,

        #[doc = "Fulfilled, no paid distribution applies."]
        #[value = "purchased"]
        Purchased,
    }
}

/// [`DateTime`] when a [`Lead`] was created.
pub type CreationDateTime = DateTimeOf<(Lead, unit::Creation)>;
