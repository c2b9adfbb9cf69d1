//! [`Query`] collection related to the multiple [`Development`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, Development},
    infra::{database, Database},
    read::development::Visibility,
    Service,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries published [`Development`]s, featured first.
pub type Published = DatabaseQuery<By<Vec<Development>, Visibility>>;

/// Queries every [`Development`] on behalf of an administrator.
#[derive(Clone, Debug)]
pub struct All {
    /// [`user::Session`] of the administrator.
    pub by: user::Session,
}

impl<Db, Ml, Rp> super::Query<All> for Service<Db, Ml, Rp>
where
    Db: Database<
        Select<By<Vec<Development>, Visibility>>,
        Ok = Vec<Development>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Development>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, All { by }: All) -> Result<Self::Ok, Self::Err> {
        if !self.is_admin(&by) {
            return Err(tracerr::new!(ExecutionError::Forbidden));
        }
        self.database()
            .execute(Select(By::new(Visibility::All)))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Error of [`All`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Session`] doesn't belong to an administrator.
    #[display("Only administrators may list every `Development`")]
    Forbidden,
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        command::create_development::spec::draft,
        infra::Database as _,
        query::Query as _,
        read::development::Visibility,
        spec,
    };

    use super::{All, ExecutionError, Published};

    #[tokio::test]
    async fn lists_published_featured_first() {
        let svc = spec::service();
        let mut featured = draft("Zafiro").into_development();
        featured.featured = true;
        let plain = draft("Ámbar").into_development();
        let mut hidden = draft("Coral").into_development();
        hidden.is_active = false;
        for d in [plain, hidden, featured] {
            svc.database().execute(Insert(d)).await.unwrap();
        }

        let names = svc
            .execute(Published::by(Visibility::Published))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Zafiro", "Ámbar"]);

        let all = svc
            .execute(All {
                by: spec::session(spec::ADMIN),
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn all_requires_admin() {
        let svc = spec::service();

        let err = svc
            .execute(All {
                by: spec::session("buyer@example.com"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Forbidden));
    }
}
