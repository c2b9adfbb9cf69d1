//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use service::{domain::contact, infra};
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret of the identity provider.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default(SecretString::from("secret"))]
    pub jwt_secret: SecretString,

    /// Required `aud` claim of the [JWT]s.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("authenticated".to_owned())]
    pub jwt_audience: String,

    /// Emails of the administrators.
    pub admin_emails: Vec<contact::Email>,

    /// Address receiving every lead notification.
    #[default(default_admin_email())]
    pub admin_notification_email: contact::Email,

    /// Nominal price of a broker lead, in US dollars.
    #[default(Decimal::new(5000, 2))]
    pub broker_lead_price: Decimal,

    /// Exchange rates configuration.
    pub exchange_rates: ExchangeRates,

    /// Mailer configuration.
    pub mailer: Mailer,
}

/// Returns the default [`Service::admin_notification_email`].
#[expect(clippy::missing_panics_doc, reason = "infallible")]
fn default_admin_email() -> contact::Email {
    contact::Email::new("admin@localhost.localdomain")
        .expect("valid email literal")
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        use secrecy::ExposeSecret as _;

        let Service {
            jwt_secret,
            jwt_audience,
            admin_emails,
            admin_notification_email,
            broker_lead_price,
            exchange_rates,
            mailer: _,
        } = value;
        Self {
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.expose_secret().as_bytes(),
            ),
            jwt_audience,
            admin_emails,
            admin_notification_email,
            broker_lead_price,
            fallback_rate: exchange_rates.fallback_rate,
            refresh_exchange_rates:
                service::task::refresh_exchange_rates::Config {
                    interval: exchange_rates.refresh_interval,
                },
        }
    }
}

/// Exchange rates configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ExchangeRates {
    /// Base URL of the exchange rate API.
    #[default(default_url("https://api.exchangerate-api.com/v4/latest"))]
    pub endpoint: Url,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Interval between the rates refreshes.
    #[default(time::Duration::from_secs(60 * 60))]
    #[serde(with = "humantime_serde")]
    pub refresh_interval: time::Duration,

    /// Amount of Mexican pesos in one US dollar used until the rates are
    /// fetched.
    #[default(service::domain::Rates::DEFAULT_FALLBACK)]
    pub fallback_rate: Decimal,
}

impl From<ExchangeRates> for infra::rates::http::Config {
    fn from(value: ExchangeRates) -> Self {
        Self {
            endpoint: value.endpoint,
            timeout: value.timeout,
        }
    }
}

/// Mailer configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Mailer {
    /// URL of the transactional email API endpoint.
    #[default(default_url("https://api.resend.com/emails"))]
    pub endpoint: Url,

    /// API key of the transactional email API.
    #[default(SecretString::from(""))]
    pub api_key: SecretString,

    /// Sender address of the notifications.
    #[default(default_admin_email())]
    pub from: contact::Email,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Mailer> for infra::mailer::http::Config {
    fn from(value: Mailer) -> Self {
        let Mailer {
            endpoint,
            api_key,
            from,
            timeout,
        } = value;
        Self {
            endpoint,
            api_key,
            from,
            timeout,
        }
    }
}

/// Parses the provided default URL literal.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
fn default_url(url: &str) -> Url {
    url.parse().expect("valid URL literal")
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
