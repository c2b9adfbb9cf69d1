//! HTTP API [`Mailer`] implementation.

use std::time::Duration;

use common::operations::Deliver;
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use tracerr::Traced;
use url::Url;

use crate::domain::contact;

use super::{Email, Error, Mailer};

/// [`Http`] mailer configuration.
#[derive(Debug)]
pub struct Config {
    /// URL of the transactional email API endpoint.
    pub endpoint: Url,

    /// API key authorizing the requests.
    pub api_key: SecretString,

    /// Sender address of the delivered emails.
    pub from: contact::Email,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Mailer`] delivering emails via a transactional email HTTP API.
///
/// Requests are never retried.
#[derive(Clone, Debug)]
pub struct Http {
    /// HTTP client with the API key set as the default authorization.
    client: reqwest::Client,

    /// URL of the API endpoint.
    endpoint: Url,

    /// Sender address.
    from: contact::Email,
}

impl Http {
    /// Creates a new [`Http`] mailer out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the API key is not a valid header value, or the HTTP client cannot
    /// be built.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let Config {
            endpoint,
            api_key,
            from,
            timeout,
        } = config;

        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            api_key.expose_secret(),
        ))
        .map_err(|_| tracerr::new!(Error::InvalidApiKey))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        _ = headers.insert(header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(tracerr::from_and_wrap!())?;

        Ok(Self {
            client,
            endpoint,
            from,
        })
    }
}

/// JSON body of a delivery request.
#[derive(Debug, Serialize)]
struct Payload<'a> {
    /// Sender address.
    from: &'a str,

    /// Primary recipients.
    to: [&'a str; 1],

    /// Carbon copy recipients.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    cc: Vec<&'a str>,

    /// Subject line.
    subject: &'a str,

    /// HTML body.
    html: &'a str,
}

impl Mailer<Deliver<Email>> for Http {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Deliver(email): Deliver<Email>,
    ) -> Result<Self::Ok, Self::Err> {
        let payload = Payload {
            from: self.from.as_ref(),
            to: [email.to.as_ref()],
            cc: email.cc.iter().map(AsRef::<str>::as_ref).collect(),
            subject: &email.subject,
            html: &email.html,
        };

        _ = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!())?;
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use super::Payload;

    #[test]
    fn payload_omits_empty_cc() {
        let payload = Payload {
            from: "noreply@example.com",
            to: ["owner@example.com"],
            cc: vec![],
            subject: "New inquiry: Casa Azul",
            html: "<p>Hi</p>",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "from": "noreply@example.com",
                "to": ["owner@example.com"],
                "subject": "New inquiry: Casa Azul",
                "html": "<p>Hi</p>",
            }),
        );
    }
}
