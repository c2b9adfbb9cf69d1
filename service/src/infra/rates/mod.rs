//! Exchange [`Rates`] [`Provider`] implementations.

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use crate::domain::Rates;

pub use self::http::Http;

/// Provider of the current exchange [`Rates`].
pub use common::Handler as Provider;

/// [`Provider`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP API request failed.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Configured endpoint URL cannot have path segments.
    #[display("Endpoint URL cannot be a base")]
    #[from(ignore)]
    InvalidEndpoint,

    /// Response doesn't contain a usable USD/MXN rate.
    #[display("No positive USD/MXN rate in response")]
    #[from(ignore)]
    NoRate,

    /// In-memory [`Provider`] was switched to fail.
    #[cfg(test)]
    #[display("`Provider` is unavailable")]
    Unavailable,
}
