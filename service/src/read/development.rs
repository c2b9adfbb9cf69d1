//! [`Development`]-related read definitions.

#[cfg(doc)]
use crate::domain::Development;

/// Visibility of [`Development`]s to list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    /// Only published ([`Development::is_active`]) ones, featured first.
    Published,

    /// Every [`Development`], for administration.
    All,
}
