//! [`RefreshExchangeRates`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Fetch, Perform, Start},
    Currency,
};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Rates,
    infra::{rates, RatesProvider},
    Service,
};

use super::Task;

/// Configuration for [`RefreshExchangeRates`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between [`Rates`] refreshes.
    #[default(time::Duration::from_secs(60 * 60))]
    pub interval: time::Duration,
}

/// [`Task`] for refreshing the [`Rates`] snapshot of a [`Service`].
///
/// The first refresh happens right at the start.
#[derive(Clone, Copy, Debug)]
pub struct RefreshExchangeRates<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db, Ml, Rp> Task<Start<By<RefreshExchangeRates<Self>, Config>>>
    for Service<Db, Ml, Rp>
where
    RefreshExchangeRates<Service<Db, Ml, Rp>>:
        Task<Perform<()>, Ok = Rates, Err: Error>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<RefreshExchangeRates<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = RefreshExchangeRates {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            match task.execute(Perform(())).await {
                Ok(rates) => log::debug!(
                    "`task::RefreshExchangeRates` fetched USD/MXN rate {} \
                     as of {:?}",
                    rates.usd_mxn(),
                    rates.as_of,
                ),
                Err(e) => log::warn!(
                    "`task::RefreshExchangeRates` failed, previous rates are \
                     kept: {e}",
                ),
            }
        }
    }
}

impl<Db, Ml, Rp> Task<Perform<()>> for RefreshExchangeRates<Service<Db, Ml, Rp>>
where
    Rp: RatesProvider<
        Fetch<By<Rates, Currency>>,
        Ok = Rates,
        Err = Traced<rates::Error>,
    >,
{
    type Ok = Rates;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let rates = self
            .service
            .rates_provider()
            .execute(Fetch(By::new(Currency::Usd)))
            .await
            .map_err(tracerr::wrap!())?;
        self.service.set_rates(rates).await;
        Ok(rates)
    }
}

/// Error of [`RefreshExchangeRates`] execution.
pub type ExecutionError = Traced<rates::Error>;

#[cfg(test)]
mod spec {
    use common::operations::Perform;
    use rust_decimal::Decimal;

    use crate::{domain::Rates, spec, Task as _};

    use super::{Config, RefreshExchangeRates};

    #[tokio::test]
    async fn replaces_snapshot() {
        let svc = spec::service();
        let fetched = Rates::new(Decimal::new(1705, 2), None).unwrap();
        svc.rates_provider().set(Some(fetched));

        let task = RefreshExchangeRates {
            config: Config::default(),
            service: svc.clone(),
        };
        assert_eq!(task.execute(Perform(())).await.unwrap(), fetched);
        assert_eq!(svc.rates().await, fetched);
    }

    #[tokio::test]
    async fn keeps_previous_snapshot_on_failure() {
        let svc = spec::service();
        let fallback = svc.rates().await;
        assert!(fallback.is_fallback);

        let task = RefreshExchangeRates {
            config: Config::default(),
            service: svc.clone(),
        };
        assert!(task.execute(Perform(())).await.is_err());
        assert_eq!(svc.rates().await, fallback);
    }

    #[test]
    fn refreshes_hourly_by_default() {
        assert_eq!(Config::default().interval.as_secs(), 3600);
    }
}
