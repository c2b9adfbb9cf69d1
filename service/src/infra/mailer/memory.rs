//! In-memory [`Mailer`] used in tests.

use std::sync::{Arc, Mutex};

use common::operations::Deliver;
use tracerr::Traced;

use super::{Email, Error, Mailer};

/// [`Mailer`] recording every delivered [`Email`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory {
    /// Delivered [`Email`]s.
    sent: Arc<Mutex<Vec<Email>>>,

    /// Indicator whether every delivery should fail.
    unavailable: bool,
}

impl Memory {
    /// Creates a new [`Memory`] mailer failing every delivery.
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Returns the delivered [`Email`]s.
    pub(crate) fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer<Deliver<Email>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Deliver(email): Deliver<Email>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.unavailable {
            return Err(tracerr::new!(Error::Unavailable));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
