//! Background [`Task`]s definitions.

mod background;
pub mod refresh_exchange_rates;

pub use common::Handler as Task;

pub use self::{
    background::Background, refresh_exchange_rates::RefreshExchangeRates,
};
