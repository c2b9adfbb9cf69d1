//! [`Client`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact;

/// Broker (client) account of the parent platform owning shared listings.
#[derive(Clone, Debug)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// Display name of this [`Client`], if any.
    pub name: Option<contact::Name>,

    /// Email of this [`Client`], if any.
    pub email: Option<contact::Email>,
}

/// ID of a [`Client`].
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
