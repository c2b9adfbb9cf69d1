//! [`Query`] collection related to a single [`Property`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::Query;

/// Queries a listed [`Property`] by its [`property::Id`].
///
/// Rows not eligible for public search results are not found.
#[derive(Clone, Copy, Debug)]
pub struct Listed(pub property::Id);

impl<Db, Ml, Rp> super::Query<Listed> for Service<Db, Ml, Rp>
where
    Db: Database<
        Select<By<Option<Property>, property::Id>>,
        Ok = Option<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Listed(id): Listed,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::wrap!())?
            .filter(Property::is_listed))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        domain::property::Status,
        infra::Database as _,
        query::Query as _,
        read::property::list::spec::listed,
        spec,
    };

    use super::Listed;

    #[tokio::test]
    async fn finds_only_listed() {
        let svc = spec::service();
        let active = listed("Casa", 1, 1);
        let mut pending = listed("Casa", 1, 1);
        pending.status = Status::Pending;
        for p in [active.clone(), pending.clone()] {
            svc.database().execute(Insert(p)).await.unwrap();
        }

        assert!(svc.execute(Listed(active.id)).await.unwrap().is_some());
        assert!(svc.execute(Listed(pending.id)).await.unwrap().is_none());
    }
}
