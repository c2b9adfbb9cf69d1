//! [`Query`] collection related to a single [`Development`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{development, Development},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a published [`Development`] microsite by its
/// [`development::Slug`].
///
/// Inactive [`Development`]s are not found.
#[derive(Clone, Debug)]
pub struct BySlug(pub development::Slug);

impl<Db, Ml, Rp> super::Query<BySlug> for Service<Db, Ml, Rp>
where
    Db: Database<
        Select<By<Option<Development>, development::Slug>>,
        Ok = Option<Development>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        BySlug(slug): BySlug,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Select(By::new(slug)))
            .await
            .map_err(tracerr::wrap!())?
            .filter(|d| d.is_active))
    }
}

/// Queries any [`Development`] by its [`development::Id`].
pub type ById = DatabaseQuery<By<Option<Development>, development::Id>>;

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        command::create_development::spec::draft,
        infra::Database as _,
        query::Query as _,
        spec,
    };

    use super::BySlug;

    #[tokio::test]
    async fn hides_inactive() {
        let svc = spec::service();
        let published = draft("Torre Azul").into_development();
        let mut hidden = draft("Torre Roja").into_development();
        hidden.is_active = false;
        for d in [published.clone(), hidden.clone()] {
            svc.database().execute(Insert(d)).await.unwrap();
        }

        let found = svc.execute(BySlug(published.slug)).await.unwrap();
        assert_eq!(found.map(|d| d.id), Some(published.id));
        assert!(svc.execute(BySlug(hidden.slug)).await.unwrap().is_none());
    }
}
