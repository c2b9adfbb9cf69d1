//! [`Query`] collection related to a self-listed [`Property`].

use common::operations::By;

use crate::domain::{user, Property};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`Property`] listed by the owner with the provided
/// [`user::Id`].
pub type ByOwner = DatabaseQuery<By<Option<Property>, user::Id>>;
