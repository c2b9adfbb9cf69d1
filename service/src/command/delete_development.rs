//! [`Command`] for deleting a [`Development`] microsite.

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{development, user, Development},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Development`] microsite.
///
/// Only administrators may execute it.
#[derive(Clone, Debug)]
pub struct DeleteDevelopment {
    /// [`user::Session`] of the administrator.
    pub by: user::Session,

    /// ID of the [`Development`] to delete.
    pub id: development::Id,
}

impl<Db, Ml, Rp> Command<DeleteDevelopment> for Service<Db, Ml, Rp>
where
    Db: Database<
        Delete<By<Development, development::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteDevelopment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteDevelopment { by, id } = cmd;

        if !self.is_admin(&by) {
            return Err(tracerr::new!(E::Forbidden));
        }

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::DevelopmentNotExists(id)));
        }
        Ok(())
    }
}

/// Error of [`DeleteDevelopment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Development`] with the provided ID does not exist.
    #[display("`Development(id: {_0})` does not exist")]
    DevelopmentNotExists(#[error(not(source))] development::Id),

    /// [`user::Session`] doesn't belong to an administrator.
    #[display("Only administrators may manage `Development`s")]
    Forbidden,
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        command::{create_development::spec::draft, Command as _},
        infra::Database as _,
        spec,
    };

    use super::{DeleteDevelopment, ExecutionError};

    #[tokio::test]
    async fn deletes_once() {
        let svc = spec::service();
        let existing = draft("Torre Ámbar").into_development();
        svc.database().execute(Insert(existing.clone())).await.unwrap();
        let by = spec::session(spec::ADMIN);

        svc.execute(DeleteDevelopment {
            by: by.clone(),
            id: existing.id,
        })
        .await
        .unwrap();
        assert!(svc.database().rows().developments.is_empty());

        let err = svc
            .execute(DeleteDevelopment {
                by,
                id: existing.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::DevelopmentNotExists(_),
        ));
    }

    #[tokio::test]
    async fn requires_admin() {
        let svc = spec::service();
        let existing = draft("Torre Ámbar").into_development();
        svc.database().execute(Insert(existing.clone())).await.unwrap();

        let err = svc
            .execute(DeleteDevelopment {
                by: spec::session("buyer@example.com"),
                id: existing.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Forbidden));
        assert_eq!(svc.database().rows().developments.len(), 1);
    }
}
