//! [`Command`] for updating an existing [`Development`] microsite.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{development, user, Development},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for overwriting the content of an existing [`Development`]
/// microsite.
///
/// Only administrators may execute it.
#[derive(Clone, Debug)]
pub struct UpdateDevelopment {
    /// [`user::Session`] of the administrator.
    pub by: user::Session,

    /// ID of the [`Development`] to update.
    pub id: development::Id,

    /// New content of the [`Development`].
    pub draft: development::Draft,
}

impl<Db, Ml, Rp> Command<UpdateDevelopment> for Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<Development>, development::Id>>,
            Ok = Option<Development>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Development>, development::Slug>>,
            Ok = Option<Development>,
            Err = Traced<database::Error>,
        > + Database<Update<Development>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Development;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateDevelopment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDevelopment { by, id, draft } = cmd;

        if !self.is_admin(&by) {
            return Err(tracerr::new!(E::Forbidden));
        }

        let current = self
            .database()
            .execute(Select(By::<Option<Development>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::DevelopmentNotExists(id)))?;

        if draft.slug != current.slug {
            let holder = self
                .database()
                .execute(Select(By::<Option<Development>, _>::new(
                    draft.slug.clone(),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if holder.is_some_and(|d| d.id != id) {
                return Err(tracerr::new!(E::SlugOccupied(draft.slug)));
            }
        }

        let development = draft.apply_to(current);
        self.database()
            .execute(Update(development.clone()))
            .await
            .map_err(|e| {
                // Concurrent update to the same slug.
                if e.as_ref().is_unique_violation(None) {
                    tracerr::new!(E::SlugOccupied(development.slug.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        Ok(development)
    }
}

/// Error of [`UpdateDevelopment`] [`Command`] execution.
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

    /// [`development::Slug`] is used by another [`Development`] already.
    #[display("`{_0}` slug is occupied")]
    SlugOccupied(#[error(not(source))] development::Slug),
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        command::{create_development::spec::draft, Command as _},
        domain::development,
        infra::Database as _,
        spec,
    };

    use super::{ExecutionError, UpdateDevelopment};

    #[tokio::test]
    async fn overwrites_content() {
        let svc = spec::service();
        let existing = draft("Torre Ámbar").into_development();
        svc.database().execute(Insert(existing.clone())).await.unwrap();

        let mut content = draft("Torre Ámbar");
        content.featured = true;
        content.tagline = development::Tagline::new("Vive arriba");
        let updated = svc
            .execute(UpdateDevelopment {
                by: spec::session(spec::ADMIN),
                id: existing.id,
                draft: content,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert!(updated.featured);
        let rows = svc.database().rows();
        assert_eq!(rows.developments.len(), 1);
        assert!(rows.developments[0].featured);
    }

    #[tokio::test]
    async fn rejects_slug_of_another() {
        let svc = spec::service();
        let first = draft("Torre Ámbar").into_development();
        let second = draft("Torre Coral").into_development();
        for d in [first.clone(), second.clone()] {
            svc.database().execute(Insert(d)).await.unwrap();
        }

        let err = svc
            .execute(UpdateDevelopment {
                by: spec::session(spec::ADMIN),
                id: second.id,
                draft: draft("Torre Ámbar"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::SlugOccupied(_)));
    }

    #[tokio::test]
    async fn reports_missing() {
        let svc = spec::service();

        let err = svc
            .execute(UpdateDevelopment {
                by: spec::session(spec::ADMIN),
                id: development::Id::new(),
                draft: draft("Torre Ámbar"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DevelopmentNotExists(_),
        ));
    }
}
