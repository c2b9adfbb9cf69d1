//! Infrastructure layer.

pub mod database;
pub mod mailer;
pub mod rates;

pub use self::{
    database::Database, mailer::Mailer, rates::Provider as RatesProvider,
};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
