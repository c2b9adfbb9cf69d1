//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, FromStr};
use serde::{Deserialize, Serialize};

use crate::domain::{contact, user};

/// Session of a user signed in via the identity provider.
///
/// Deserialized from the claims of a JWT access token.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the user this [`Session`] belongs to.
    #[serde(rename = "sub")]
    pub user_id: user::Id,

    /// Email of the user this [`Session`] belongs to, if any.
    #[serde(default)]
    pub email: Option<contact::Email>,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// The token is verified once decoded.
    #[must_use]
    pub const fn new_unverified(token: String) -> Self {
        Self(token)
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;
