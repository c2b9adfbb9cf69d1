//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Commands, queries, database operations, outgoing notifications and
/// background tasks are all expressed as [`Handler`]s of some operation type,
/// so that every collaborator can be swapped by implementing the operations
/// it is required to handle.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
