//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::sync::Arc;

use common::operations::{By, Start};
use derive_more::{Debug, Error};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

#[cfg(doc)]
use infra::{Database, Mailer, RatesProvider};

use self::domain::{contact, user, Rates};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] decoding key of the identity provider.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Required `aud` claim of [JWT]s issued by the identity provider.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    pub jwt_audience: String,

    /// Emails of users allowed to administer [`Development`]s.
    ///
    /// [`Development`]: domain::Development
    pub admin_emails: Vec<contact::Email>,

    /// Address receiving notifications about every [`Lead`].
    ///
    /// [`Lead`]: domain::Lead
    pub admin_notification_email: contact::Email,

    /// Nominal price of a broker [`Lead`], in US dollars.
    ///
    /// [`Lead`]: domain::Lead
    pub broker_lead_price: Decimal,

    /// Amount of Mexican pesos in one US dollar used until [`Rates`] are
    /// fetched.
    pub fallback_rate: Decimal,

    /// [`task::RefreshExchangeRates`] configuration.
    pub refresh_exchange_rates: task::refresh_exchange_rates::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Ml, Rp> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Mailer`] of this [`Service`].
    mailer: Ml,

    /// [`RatesProvider`] of this [`Service`].
    rates_provider: Rp,

    /// Current [`Rates`] snapshot shared by all the clones of this
    /// [`Service`].
    rates: Arc<RwLock<Rates>>,
}

impl<Db, Ml, Rp> Service<Db, Ml, Rp> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        database: Db,
        mailer: Ml,
        rates_provider: Rp,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::RefreshExchangeRates<Self>,
                        task::refresh_exchange_rates::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let rates =
            Arc::new(RwLock::new(Rates::fallback(config.fallback_rate)));
        let this = Service {
            config,
            database,
            mailer,
            rates_provider,
            rates,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().refresh_exchange_rates)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Mailer`] of this [`Service`].
    #[must_use]
    pub fn mailer(&self) -> &Ml {
        &self.mailer
    }

    /// Returns [`RatesProvider`] of this [`Service`].
    #[must_use]
    pub fn rates_provider(&self) -> &Rp {
        &self.rates_provider
    }

    /// Returns the current [`Rates`] snapshot.
    pub async fn rates(&self) -> Rates {
        *self.rates.read().await
    }

    /// Replaces the current [`Rates`] snapshot.
    async fn set_rates(&self, rates: Rates) {
        *self.rates.write().await = rates;
    }

    /// Checks whether the provided [`user::Session`] belongs to an
    /// administrator.
    #[must_use]
    pub fn is_admin(&self, session: &user::Session) -> bool {
        session
            .email
            .as_ref()
            .is_some_and(|e| self.config.admin_emails.contains(e))
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::{sync::Arc, time::Duration};

    use common::DateTimeOf;
    use rust_decimal::Decimal;
    use tokio::sync::RwLock;

    use crate::{
        domain::{contact, user, Rates},
        infra::{database, mailer, rates},
        task, Config, Service,
    };

    /// [`Service`] backed by in-memory infrastructure.
    pub(crate) type Mocked = Service<
        database::memory::Memory,
        mailer::memory::Memory,
        rates::memory::Memory,
    >;

    /// Secret the tokens are signed with in tests.
    pub(crate) const JWT_SECRET: &[u8] = b"test-secret";

    /// Email of the administrator in tests.
    pub(crate) const ADMIN: &str = "admin@example.com";

    /// Returns [`Config`] used in tests.
    pub(crate) fn config() -> Config {
        Config {
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                JWT_SECRET,
            ),
            jwt_audience: "authenticated".into(),
            admin_emails: vec![contact::Email::new(ADMIN).unwrap()],
            admin_notification_email: contact::Email::new(ADMIN).unwrap(),
            broker_lead_price: Decimal::new(5000, 2),
            fallback_rate: Rates::DEFAULT_FALLBACK,
            refresh_exchange_rates: task::refresh_exchange_rates::Config::default(),
        }
    }

    /// Creates a new [`Mocked`] service without spawning background tasks.
    pub(crate) fn service() -> Mocked {
        with(mailer::memory::Memory::default())
    }

    /// Creates a new [`Mocked`] service with the provided mailer.
    pub(crate) fn with(mailer: mailer::memory::Memory) -> Mocked {
        let config = config();
        Service {
            rates: Arc::new(RwLock::new(Rates::fallback(
                config.fallback_rate,
            ))),
            config,
            database: database::memory::Memory::default(),
            mailer,
            rates_provider: rates::memory::Memory::default(),
        }
    }

    /// Returns a [`user::Session`] of the provided email.
    pub(crate) fn session(email: &str) -> user::Session {
        user::Session {
            user_id: user::Id::new(),
            email: contact::Email::new(email),
            expires_at: DateTimeOf::now() + Duration::from_secs(3600),
        }
    }

    #[test]
    fn recognizes_admins() {
        let svc = service();

        assert!(svc.is_admin(&session(ADMIN)));
        assert!(!svc.is_admin(&session("buyer@example.com")));

        let mut anonymous = session(ADMIN);
        anonymous.email = None;
        assert!(!svc.is_admin(&anonymous));
    }
}
