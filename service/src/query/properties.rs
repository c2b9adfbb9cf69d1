//! [`Query`] collection related to the search over multiple [`Property`]
//! rows.

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Property,
    infra::{database, Database},
    read::property::{
        list::{self, Criteria},
        map, Filter,
    },
    Service,
};
#[cfg(doc)]
use crate::Query;

/// Queries a [`list::Page`] of the [`Property`] rows matching a [`Filter`].
///
/// Never fails: a failed lookup is logged and results in an empty
/// [`list::Page`].
#[derive(Clone, Debug)]
pub struct Search(pub Filter);

impl<Db, Ml, Rp> super::Query<Search> for Service<Db, Ml, Rp>
where
    Db: Database<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<database::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Search(filter): Search,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = filter.selector();
        Ok(self
            .database()
            .execute(Select(By::new(selector.clone())))
            .await
            .unwrap_or_else(|e| {
                log::error!("`query::properties::Search` failed: {e}");
                selector.empty_page()
            }))
    }
}

/// Queries a [`map::View`] of the [`Property`] rows matching a [`Filter`].
///
/// Pagination of the [`Filter`] is ignored: every plottable row is returned.
/// Never fails: a failed lookup is logged and results in an empty
/// [`map::View`].
#[derive(Clone, Debug)]
pub struct Map(pub Filter);

impl<Db, Ml, Rp> super::Query<Map> for Service<Db, Ml, Rp>
where
    Db: Database<
        Select<By<Vec<Property>, Criteria>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = map::View;
    type Err = Infallible;

    async fn execute(&self, Map(filter): Map) -> Result<Self::Ok, Self::Err> {
        let rows = self
            .database()
            .execute(Select(By::new(filter.criteria().with_coordinates())))
            .await
            .unwrap_or_else(|e| {
                log::error!("`query::properties::Map` failed: {e}");
                vec![]
            });
        let rates = self.rates().await;
        Ok(map::View::new(rows, filter.currency(), &rates))
    }
}

#[cfg(test)]
mod spec {
    use common::{operations::Insert, pagination, Currency};

    use crate::{
        infra::Database as _,
        query::Query as _,
        read::property::{list::spec::listed, map::Viewport, Change, Filter},
        spec,
    };

    use super::{Map, Search};

    #[tokio::test]
    async fn searches_listed_rows() {
        let svc = spec::service();
        for (title, usd, age) in
            [("Casa Azul", 300_000, 3), ("Villa Sol", 800_000, 2)]
        {
            svc.database()
                .execute(Insert(listed(title, usd, age)))
                .await
                .unwrap();
        }
        let mut hidden = listed("Hidden", 400_000, 1);
        hidden.show_on_storefront = false;
        svc.database().execute(Insert(hidden)).await.unwrap();

        let page = svc.execute(Search(Filter::default())).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(
            page.items
                .iter()
                .map(|p| p.title.to_string())
                .collect::<Vec<_>>(),
            ["Villa Sol", "Casa Azul"],
        );

        let mut filter = Filter::default();
        filter
            .apply(Change::PriceRange(Some("250000-500000".parse().unwrap())))
            .unwrap();
        let page = svc.execute(Search(filter)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title.to_string(), "Casa Azul");
    }

    #[tokio::test]
    async fn pages_past_the_last_are_empty() {
        let svc = spec::service();
        for i in 0..45 {
            svc.database()
                .execute(Insert(listed(&format!("Casa {i}"), 100_000, i)))
                .await
                .unwrap();
        }
        let page_of = |n| {
            let mut filter = Filter::default();
            filter
                .apply(Change::Page(pagination::Number::new(n).unwrap()))
                .unwrap();
            Search(filter)
        };

        let third = svc.execute(page_of(3)).await.unwrap();
        assert_eq!(third.items.len(), 5);
        assert_eq!(third.total, 45);
        assert_eq!(third.total_pages(), 3);
        assert!(!third.has_next());

        let fourth = svc.execute(page_of(4)).await.unwrap();
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 45);
        assert_eq!(fourth.number.get(), 4);
    }

    #[tokio::test]
    async fn failed_search_is_empty() {
        let svc = spec::service();
        svc.database().execute(Insert(listed("Casa", 1, 1))).await.unwrap();
        svc.database().rows().unavailable = true;

        let mut filter = Filter::default();
        filter
            .apply(Change::Page(pagination::Number::new(2).unwrap()))
            .unwrap();
        let page = svc.execute(Search(filter)).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.number.get(), 2);
    }

    #[tokio::test]
    async fn failed_map_shows_country() {
        let svc = spec::service();
        svc.database().rows().unavailable = true;

        let view = svc.execute(Map(Filter::default())).await.unwrap();

        assert!(view.markers().is_empty());
        assert_eq!(view.viewport(), Viewport::COUNTRY);
    }

    #[tokio::test]
    async fn map_prices_in_display_currency() {
        let svc = spec::service();
        svc.database()
            .execute(Insert(listed("Casa", 100_000, 1)))
            .await
            .unwrap();

        let mut filter = Filter::default();
        filter.apply(Change::Currency(Currency::Mxn)).unwrap();
        let view = svc.execute(Map(filter)).await.unwrap();

        let [marker] = view.markers() else {
            panic!("expected single marker");
        };
        assert_eq!(marker.summary.price.currency, Currency::Mxn);
        assert!(matches!(view.viewport(), Viewport::Fit { .. }));
    }
}
