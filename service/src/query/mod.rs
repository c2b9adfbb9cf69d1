//! [`Query`] definition.

pub mod development;
pub mod developments;
pub mod listing;
pub mod properties;
pub mod property;

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Rates,
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Ml, Rp, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db, Ml, Rp>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries the current exchange [`Rates`] snapshot.
#[derive(Clone, Copy, Debug)]
pub struct ExchangeRates;

impl<Db, Ml, Rp> Query<ExchangeRates> for Service<Db, Ml, Rp> {
    type Ok = Rates;
    type Err = Infallible;

    async fn execute(&self, _: ExchangeRates) -> Result<Self::Ok, Self::Err> {
        Ok(self.rates().await)
    }
}
