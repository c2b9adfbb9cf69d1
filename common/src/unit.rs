//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity modification.
#[derive(Clone, Copy, Debug)]
pub struct Modification;

/// Marker type describing an expiration of something.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;
