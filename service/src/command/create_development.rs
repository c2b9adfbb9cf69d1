//! [`Command`] for creating a new [`Development`] microsite.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{development, user, Development},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Development`] microsite.
///
/// Only administrators may execute it.
#[derive(Clone, Debug)]
pub struct CreateDevelopment {
    /// [`user::Session`] of the administrator.
    pub by: user::Session,

    /// Content of the new [`Development`].
    pub draft: development::Draft,
}

impl<Db, Ml, Rp> Command<CreateDevelopment> for Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<Development>, development::Slug>>,
            Ok = Option<Development>,
            Err = Traced<database::Error>,
        > + Database<Insert<Development>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Development;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateDevelopment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateDevelopment { by, draft } = cmd;

        if !self.is_admin(&by) {
            return Err(tracerr::new!(E::Forbidden));
        }

        let existing = self
            .database()
            .execute(Select(By::new(draft.slug.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::SlugOccupied(draft.slug)));
        }

        let development = draft.into_development();
        self.database()
            .execute(Insert(development.clone()))
            .await
            .map_err(|e| {
                // Concurrent creation with the same slug.
                if e.as_ref().is_unique_violation(None) {
                    tracerr::new!(E::SlugOccupied(development.slug.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        Ok(development)
    }
}

/// Error of [`CreateDevelopment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Session`] doesn't belong to an administrator.
    #[display("Only administrators may manage `Development`s")]
    Forbidden,

    /// [`development::Slug`] is used by another [`Development`] already.
    #[display("`{_0}` slug is occupied")]
    SlugOccupied(#[error(not(source))] development::Slug),
}

#[cfg(test)]
pub(crate) mod spec {
    use crate::{
        command::Command as _,
        domain::development::{self, Branding, Draft},
        spec,
    };

    use super::{CreateDevelopment, ExecutionError};

    /// Returns an active [`Draft`] named and slugged after the provided
    /// `name`.
    pub(crate) fn draft(name: &str) -> Draft {
        Draft {
            name: development::Name::new(name).unwrap(),
            slug: development::Slug::from_name(name).unwrap(),
            tagline: None,
            description: None,
            branding: Branding::default(),
            hero_image: None,
            gallery: vec![],
            location: development::Location::default(),
            amenities: vec![],
            contacts: development::Contacts::default(),
            seo: development::Seo::default(),
            is_active: true,
            featured: false,
        }
    }

    #[tokio::test]
    async fn creates_development() {
        let svc = spec::service();

        let created = svc
            .execute(CreateDevelopment {
                by: spec::session(spec::ADMIN),
                draft: draft("Torre Ámbar"),
            })
            .await
            .unwrap();

        assert_eq!(created.slug.to_string(), "torre-ambar");
        assert_eq!(svc.database().rows().developments.len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_slug() {
        let svc = spec::service();
        let by = spec::session(spec::ADMIN);
        _ = svc
            .execute(CreateDevelopment {
                by: by.clone(),
                draft: draft("Torre Ámbar"),
            })
            .await
            .unwrap();

        let err = svc
            .execute(CreateDevelopment {
                by,
                draft: draft("Torre Ambar"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::SlugOccupied(_)));
        assert_eq!(svc.database().rows().developments.len(), 1);
    }

    #[tokio::test]
    async fn requires_admin() {
        let svc = spec::service();

        let err = svc
            .execute(CreateDevelopment {
                by: spec::session("buyer@example.com"),
                draft: draft("Torre Ámbar"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Forbidden));
        assert_eq!(svc.database().rows().operations, 0);
    }
}
