//! [`Property`] search read definitions.
//!
//! [`Property`]: crate::domain::Property

pub mod bracket;
pub mod filter;
pub mod list;
pub mod location;
pub mod map;

pub use self::{
    bracket::{bracket_table, Bracket},
    filter::{Change, Filter, PriceRange, Sort},
};
