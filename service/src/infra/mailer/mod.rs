//! [`Mailer`]-related implementations.

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

use derive_more::{Display, Error as StdError, From};

use crate::domain::contact;

pub use self::http::Http;

/// Outgoing email delivery.
pub use common::Handler as Mailer;

/// Email to be delivered by a [`Mailer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Email {
    /// Primary recipient.
    pub to: contact::Email,

    /// Carbon copy recipients.
    pub cc: Vec<contact::Email>,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html: String,
}

/// [`Mailer`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP API request failed.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Invalid API key was configured.
    #[display("Invalid API key")]
    #[from(ignore)]
    InvalidApiKey,

    /// In-memory [`Mailer`] was switched to fail.
    #[cfg(test)]
    #[display("`Mailer` is unavailable")]
    Unavailable,
}
