//! In-memory [`Database`] used in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        development, lead::Broker, property, user, Client, Development, Lead,
        Property,
    },
    infra::{database, Database},
    read::{
        development::Visibility,
        lead::{BrokerListing, PublicListing},
        property::list,
    },
};

/// Rows stored in a [`Memory`] database.
#[derive(Debug, Default)]
pub(crate) struct Rows {
    /// Stored [`Client`]s.
    pub(crate) clients: Vec<Client>,

    /// Stored [`Property`] rows.
    pub(crate) properties: Vec<Property>,

    /// Stored [`Lead`]s.
    pub(crate) leads: Vec<Lead>,

    /// Stored [`Development`]s.
    pub(crate) developments: Vec<Development>,

    /// Indicator whether every operation should fail.
    pub(crate) unavailable: bool,

    /// Number of operations executed so far.
    pub(crate) operations: usize,
}

/// In-memory [`Database`] sharing its [`Rows`] between clones.
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory(Arc<Mutex<Rows>>);

impl Memory {
    /// Locks the [`Rows`] of this [`Memory`] database.
    pub(crate) fn rows(&self) -> MutexGuard<'_, Rows> {
        self.0.lock().unwrap()
    }

    /// Locks the [`Rows`] for executing an operation, failing if the database
    /// is switched to be unavailable.
    fn op(&self) -> Result<MutexGuard<'_, Rows>, Traced<database::Error>> {
        let mut rows = self.rows();
        rows.operations += 1;
        if rows.unavailable {
            return Err(tracerr::new!(database::Error::Unavailable));
        }
        Ok(rows)
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for Memory {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let rows = self.op()?;

        let mut matched = rows
            .properties
            .iter()
            .filter(|p| selector.criteria.matches(p))
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| selector.sort.compare(a, b));

        Ok(list::Page {
            total: matched.len() as u64,
            items: selector
                .page
                .window(selector.size)
                .apply(matched)
                .collect(),
            number: selector.page,
            size: selector.size,
        })
    }
}

impl Database<Select<By<Vec<Property>, list::Criteria>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, list::Criteria>>,
    ) -> Result<Self::Ok, Self::Err> {
        let criteria = by.into_inner();
        let rows = self.op()?;

        let mut matched = rows
            .properties
            .iter()
            .filter(|p| criteria.matches(p))
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| list::Sort::Featured.compare(a, b));
        Ok(matched)
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.op()?.properties.iter().find(|p| p.id == id).cloned())
    }
}

impl Database<Select<By<Option<Property>, user::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();
        Ok(self
            .op()?
            .properties
            .iter()
            .find(|p| p.owner_id == Some(owner))
            .cloned())
    }
}

impl Database<Insert<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.op()?.properties.push(property);
        Ok(())
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut rows = self.op()?;
        if let Some(p) = rows.properties.iter_mut().find(|p| p.id == property.id)
        {
            *p = property;
        } else {
            rows.properties.push(property);
        }
        Ok(())
    }
}

impl Database<Select<By<Option<PublicListing>, property::Id>>> for Memory {
    type Ok = Option<PublicListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PublicListing>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .op()?
            .properties
            .iter()
            .find(|p| p.id == id && p.owner_id.is_some() && p.is_listed())
            .map(|p| PublicListing {
                id: p.id,
                title: p.title.clone(),
                contact: p.contact.clone(),
            }))
    }
}

impl Database<Select<By<Option<BrokerListing>, property::Id>>> for Memory {
    type Ok = Option<BrokerListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<BrokerListing>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let rows = self.op()?;
        Ok(rows
            .properties
            .iter()
            .find(|p| p.id == id && p.is_listed())
            .and_then(|p| Some((p, p.client_id?)))
            .map(|(p, client_id)| BrokerListing {
                id: p.id,
                title: p.title.clone(),
                broker: rows.clients.iter().find(|c| c.id == client_id).map(
                    |c| Broker {
                        id: c.id,
                        name: c.name.clone(),
                        email: c.email.clone(),
                    },
                ),
            }))
    }
}

impl Database<Insert<Lead>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        self.op()?.leads.push(lead);
        Ok(())
    }
}

impl Database<Select<By<Option<Development>, development::Id>>> for Memory {
    type Ok = Option<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Development>, development::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.op()?.developments.iter().find(|d| d.id == id).cloned())
    }
}

impl Database<Select<By<Option<Development>, development::Slug>>> for Memory {
    type Ok = Option<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Development>, development::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        Ok(self
            .op()?
            .developments
            .iter()
            .find(|d| d.slug == slug)
            .cloned())
    }
}

impl Database<Select<By<Vec<Development>, Visibility>>> for Memory {
    type Ok = Vec<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Development>, Visibility>>,
    ) -> Result<Self::Ok, Self::Err> {
        let visibility = by.into_inner();
        let mut found = self
            .op()?
            .developments
            .iter()
            .filter(|d| visibility == Visibility::All || d.is_active)
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| {
            b.featured.cmp(&a.featured).then_with(|| a.name.cmp(&b.name))
        });
        Ok(found)
    }
}

impl Database<Insert<Development>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(development): Insert<Development>,
    ) -> Result<Self::Ok, Self::Err> {
        self.op()?.developments.push(development);
        Ok(())
    }
}

impl Database<Update<Development>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(development): Update<Development>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut rows = self.op()?;
        if let Some(d) =
            rows.developments.iter_mut().find(|d| d.id == development.id)
        {
            *d = development;
        }
        Ok(())
    }
}

impl Database<Delete<By<Development, development::Id>>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Development, development::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut rows = self.op()?;
        let before = rows.developments.len();
        rows.developments.retain(|d| d.id != id);
        Ok(rows.developments.len() < before)
    }
}
