//! HTTP API [`Provider`] implementation.

use std::{collections::HashMap, time::Duration};

use common::{
    operations::{By, Fetch},
    Currency,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{macros::format_description, Date};
use tracerr::Traced;
use url::Url;

use crate::domain::Rates;

use super::{Error, Provider};

/// [`Http`] provider configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the exchange rate API, the base currency code is appended
    /// to it as a path segment.
    pub endpoint: Url,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Provider`] fetching [`Rates`] from an exchange rate HTTP API.
///
/// Requests are never retried.
#[derive(Clone, Debug)]
pub struct Http {
    /// HTTP client.
    client: reqwest::Client,

    /// Base URL of the API.
    endpoint: Url,
}

impl Http {
    /// Creates a new [`Http`] provider out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!())?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }
}

/// JSON body of an exchange rate API response.
#[derive(Debug, Deserialize)]
struct Response {
    /// Date the rates were published on, as `YYYY-MM-DD`.
    #[serde(default)]
    date: Option<String>,

    /// Amounts of the keyed currencies in one unit of the base one.
    rates: HashMap<String, Decimal>,
}

impl Response {
    /// Extracts USD/MXN [`Rates`] out of this [`Response`] to a USD-based
    /// request.
    fn into_rates(self) -> Option<Rates> {
        let usd_mxn = *self.rates.get(Currency::Mxn.as_str())?;
        let as_of = self.date.and_then(|d| {
            Date::parse(&d, format_description!("[year]-[month]-[day]")).ok()
        });
        Rates::new(usd_mxn, as_of)
    }
}

impl Provider<Fetch<By<Rates, Currency>>> for Http {
    type Ok = Rates;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Fetch(by): Fetch<By<Rates, Currency>>,
    ) -> Result<Self::Ok, Self::Err> {
        let base = by.into_inner();

        let mut url = self.endpoint.clone();
        _ = url
            .path_segments_mut()
            .map_err(|()| tracerr::new!(Error::InvalidEndpoint))?
            .pop_if_empty()
            .push(base.as_str());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!())?
            .json::<Response>()
            .await
            .map_err(tracerr::from_and_wrap!())?;

        match base {
            Currency::Usd => response.into_rates(),
            // Only USD-based snapshots are kept.
            Currency::Mxn => None,
        }
        .ok_or_else(|| tracerr::new!(Error::NoRate))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use time::macros::date;

    use super::Response;

    #[test]
    fn extracts_mxn_rate() {
        let response: Response = serde_json::from_str(
            r#"{
                "base": "USD",
                "date": "2024-03-01",
                "rates": {"EUR": 0.92, "MXN": 17.05}
            }"#,
        )
        .unwrap();

        let rates = response.into_rates().unwrap();
        assert_eq!(rates.usd_mxn(), Decimal::new(1705, 2));
        assert_eq!(rates.as_of, Some(date!(2024 - 03 - 01)));
        assert!(!rates.is_fallback);
    }

    #[test]
    fn tolerates_unparsable_date() {
        let response: Response = serde_json::from_str(
            r#"{"date": "yesterday", "rates": {"MXN": 18}}"#,
        )
        .unwrap();

        let rates = response.into_rates().unwrap();
        assert_eq!(rates.usd_mxn(), Decimal::from(18));
        assert_eq!(rates.as_of, None);
    }

    #[test]
    fn rejects_missing_or_non_positive_rate() {
        for json in [
            r#"{"rates": {"EUR": 0.92}}"#,
            r#"{"rates": {"MXN": 0}}"#,
            r#"{"rates": {"MXN": -17.5}}"#,
        ] {
            let response: Response = serde_json::from_str(json).unwrap();
            assert!(response.into_rates().is_none(), "{json}");
        }
    }
}
