//! In-memory [`Provider`] used in tests.

use std::sync::{Arc, Mutex};

use common::{
    operations::{By, Fetch},
    Currency,
};
use tracerr::Traced;

use crate::domain::Rates;

use super::{Error, Provider};

/// [`Provider`] returning preset [`Rates`], or failing if there are none.
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory(Arc<Mutex<Option<Rates>>>);

impl Memory {
    /// Creates a new [`Memory`] provider returning the provided [`Rates`].
    pub(crate) fn new(rates: Rates) -> Self {
        Self(Arc::new(Mutex::new(Some(rates))))
    }

    /// Replaces the [`Rates`] returned by this [`Memory`] provider.
    pub(crate) fn set(&self, rates: Option<Rates>) {
        *self.0.lock().unwrap() = rates;
    }
}

impl Provider<Fetch<By<Rates, Currency>>> for Memory {
    type Ok = Rates;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Fetch<By<Rates, Currency>>,
    ) -> Result<Self::Ok, Self::Err> {
        (*self.0.lock().unwrap())
            .ok_or_else(|| tracerr::new!(Error::Unavailable))
    }
}
