//! [`Command`] for submitting a new [`Lead`].

use askama::Template;
use common::{
    operations::{By, Deliver, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contact, lead, property, Lead},
    infra::{
        database,
        mailer::{self, Email},
        Database, Mailer,
    },
    read::lead::{BrokerListing, PublicListing},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`Lead`] about a listed property.
///
/// The [`Lead`] is routed depending on who owns the listing:
/// - a listing submitted by its owner produces a fulfilled [`Lead`] free of
///   charge, and its owner is notified with the administrator in copy;
/// - a listing managed by a broker produces a new [`Lead`] of the configured
///   nominal price, and only the administrator is notified.
///
/// Notification is best-effort: once the [`Lead`] is persisted, a delivery
/// failure is logged and doesn't fail the [`Command`].
#[derive(Clone, Debug)]
pub struct SubmitLead {
    /// ID of the inquired property.
    pub property_id: property::Id,

    /// Name of the buyer.
    pub name: contact::Name,

    /// Email of the buyer.
    pub email: contact::Email,

    /// Phone of the buyer, if provided.
    pub phone: Option<contact::Phone>,

    /// Message of the buyer.
    pub message: lead::Message,

    /// [`lead::Source`] of the inquiry, if not the default one.
    pub source: Option<lead::Source>,
}

impl<Db, Ml, Rp> Command<SubmitLead> for Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<PublicListing>, property::Id>>,
            Ok = Option<PublicListing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<BrokerListing>, property::Id>>,
            Ok = Option<BrokerListing>,
            Err = Traced<database::Error>,
        > + Database<Insert<Lead>, Ok = (), Err = Traced<database::Error>>,
    Ml: Mailer<Deliver<Email>, Ok = (), Err = Traced<mailer::Error>>,
{
    type Ok = Lead;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitLead) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitLead {
            property_id,
            name,
            email,
            phone,
            message,
            source,
        } = cmd;
        let admin = &self.config().admin_notification_email;

        let public = self
            .database()
            .execute(Select(By::<Option<PublicListing>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let (title, kind, status, price, broker, to, cc) =
            if let Some(listing) = public {
                let owner = listing.contact.and_then(|c| c.email);
                let cc = if owner.as_ref().is_some_and(|o| o != admin) {
                    vec![admin.clone()]
                } else {
                    vec![]
                };
                (
                    listing.title,
                    lead::Kind::Public,
                    lead::Status::Purchased,
                    Decimal::ZERO,
                    None,
                    owner.unwrap_or_else(|| admin.clone()),
                    cc,
                )
            } else {
                let listing = self
                    .database()
                    .execute(Select(By::<Option<BrokerListing>, _>::new(
                        property_id,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or_else(|| {
                        tracerr::new!(E::PropertyNotExists(property_id))
                    })?;
                if listing.broker.is_none() {
                    log::warn!(
                        "broker of `Property(id: {property_id})` cannot be \
                         resolved, `Lead` is stored without it",
                    );
                }
                (
                    listing.title,
                    lead::Kind::Broker,
                    lead::Status::New,
                    self.config().broker_lead_price,
                    listing.broker,
                    admin.clone(),
                    vec![],
                )
            };

        let lead = Lead {
            id: lead::Id::new(),
            property_id,
            property_title: title,
            name,
            email,
            phone,
            message,
            kind,
            status,
            source: source.unwrap_or_default(),
            base_price_usd: price,
            current_price_usd: price,
            broker,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(lead.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let delivered = match LeadNotification::of(&lead).render() {
            Ok(html) => self
                .mailer()
                .execute(Deliver(Email {
                    to,
                    cc,
                    subject: format!("New inquiry: {}", lead.property_title),
                    html,
                }))
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(format!("rendering failed: {e}")),
        };
        if let Err(e) = delivered {
            log::error!(
                "failed to notify about `Lead(id: {})`: {e}",
                lead.id,
            );
        }

        Ok(lead)
    }
}

/// HTML body of a [`Lead`] notification.
#[derive(Debug, Template)]
#[template(path = "lead_notification.html")]
struct LeadNotification<'a> {
    /// Notified [`Lead`].
    lead: &'a Lead,

    /// Broker of a [`lead::Kind::Broker`] [`Lead`], as displayed.
    broker: Option<String>,
}

impl<'a> LeadNotification<'a> {
    /// Creates a [`LeadNotification`] about the provided [`Lead`].
    fn of(lead: &'a Lead) -> Self {
        let broker = (lead.kind == lead::Kind::Broker).then(|| {
            lead.broker.as_ref().map_or_else(
                || "Unknown".to_owned(),
                |b| match (&b.name, &b.email) {
                    (Some(n), Some(e)) => format!("{n} <{e}>"),
                    (Some(n), None) => n.to_string(),
                    (None, Some(e)) => e.to_string(),
                    (None, None) => b.id.to_string(),
                },
            )
        });
        Self { lead, broker }
    }
}

/// Error of [`SubmitLead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Property with the provided ID is listed neither by its owner nor by a
    /// broker.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;
    use rust_decimal::Decimal;

    use crate::{
        command::Command as _,
        domain::{
            client, contact, lead, property, user, Client, Property,
        },
        infra::{mailer, Database as _},
        read::property::list::spec::listed,
        spec,
    };

    use super::{ExecutionError, SubmitLead};

    const OWNER: &str = "owner@example.com";

    fn inquiry(property_id: property::Id) -> SubmitLead {
        SubmitLead {
            property_id,
            name: contact::Name::new("Ana López").unwrap(),
            email: contact::Email::new("ana@example.com").unwrap(),
            phone: None,
            message: lead::Message::new("Is it <still> available?").unwrap(),
            source: None,
        }
    }

    fn self_listed(owner_email: Option<&str>) -> Property {
        let mut p = listed("Casa Azul", 300_000, 1);
        p.owner_id = Some(user::Id::new());
        p.contact = Some(property::Contact {
            name: None,
            email: owner_email.and_then(contact::Email::new),
            phone: None,
        });
        p
    }

    fn brokered(client_id: client::Id) -> Property {
        let mut p = listed("Villa Sol", 800_000, 1);
        p.client_id = Some(client_id);
        p
    }

    #[tokio::test]
    async fn public_lead_notifies_owner() {
        let svc = spec::service();
        let p = self_listed(Some(OWNER));
        svc.database().execute(Insert(p.clone())).await.unwrap();

        let lead = svc.execute(inquiry(p.id)).await.unwrap();

        assert_eq!(lead.kind, lead::Kind::Public);
        assert_eq!(lead.status, lead::Status::Purchased);
        assert_eq!(lead.base_price_usd, Decimal::ZERO);
        assert_eq!(lead.current_price_usd, Decimal::ZERO);
        assert_eq!(lead.source.to_string(), "website");
        assert_eq!(svc.database().rows().leads.len(), 1);

        let [email] = svc.mailer().sent().try_into().unwrap();
        assert_eq!(email.to.to_string(), OWNER);
        assert_eq!(
            email.cc.iter().map(ToString::to_string).collect::<Vec<_>>(),
            [spec::ADMIN],
        );
        assert_eq!(email.subject, "New inquiry: Casa Azul");
        assert!(email.html.contains("Is it &lt;still&gt; available?"));
        assert!(email.html.contains("<strong>Phone:</strong> Not provided"));
        assert!(!email.html.contains("Broker:"));
    }

    #[tokio::test]
    async fn public_lead_without_contact_goes_to_admin() {
        let svc = spec::service();
        let p = self_listed(None);
        svc.database().execute(Insert(p.clone())).await.unwrap();

        _ = svc.execute(inquiry(p.id)).await.unwrap();

        let [email] = svc.mailer().sent().try_into().unwrap();
        assert_eq!(email.to.to_string(), spec::ADMIN);
        assert!(email.cc.is_empty());
    }

    #[tokio::test]
    async fn broker_lead_is_priced_and_goes_to_admin() {
        let svc = spec::service();
        let client = Client {
            id: client::Id::new(),
            name: contact::Name::new("Bienes Raíces MX"),
            email: contact::Email::new("broker@example.com"),
        };
        let p = brokered(client.id);
        svc.database().rows().clients.push(client.clone());
        svc.database().execute(Insert(p.clone())).await.unwrap();

        let mut cmd = inquiry(p.id);
        cmd.source = lead::Source::new("landing-sma");
        let lead = svc.execute(cmd).await.unwrap();

        assert_eq!(lead.kind, lead::Kind::Broker);
        assert_eq!(lead.status, lead::Status::New);
        assert_eq!(lead.base_price_usd, Decimal::new(5000, 2));
        assert_eq!(lead.current_price_usd, Decimal::new(5000, 2));
        assert_eq!(lead.broker.map(|b| b.id), Some(client.id));
        assert_eq!(lead.source.to_string(), "landing-sma");

        let [email] = svc.mailer().sent().try_into().unwrap();
        assert_eq!(email.to.to_string(), spec::ADMIN);
        assert!(email.cc.is_empty());
        assert!(email
            .html
            .contains("Bienes Raíces MX &lt;broker@example.com&gt;"));
    }

    #[tokio::test]
    async fn unresolved_broker_is_tolerated() {
        let svc = spec::service();
        let p = brokered(client::Id::new());
        svc.database().execute(Insert(p.clone())).await.unwrap();

        let lead = svc.execute(inquiry(p.id)).await.unwrap();

        assert_eq!(lead.kind, lead::Kind::Broker);
        assert!(lead.broker.is_none());
        assert_eq!(svc.database().rows().leads.len(), 1);
    }

    #[tokio::test]
    async fn unknown_property_creates_nothing() {
        let svc = spec::service();
        let orphan = listed("Orphan", 1, 1);
        svc.database().execute(Insert(orphan.clone())).await.unwrap();

        let err = svc.execute(inquiry(orphan.id)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(id) if *id == orphan.id,
        ));
        assert!(svc.database().rows().leads.is_empty());
        assert!(svc.mailer().sent().is_empty());
    }

    #[tokio::test]
    async fn unlisted_property_creates_nothing() {
        let svc = spec::service();
        let mut draft = self_listed(Some(OWNER));
        draft.status = property::Status::Draft;
        let mut hidden = brokered(client::Id::new());
        hidden.show_on_storefront = false;
        for p in [&draft, &hidden] {
            svc.database().execute(Insert(p.clone())).await.unwrap();
        }

        for id in [draft.id, hidden.id] {
            let err = svc.execute(inquiry(id)).await.unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::PropertyNotExists(i) if *i == id,
            ));
        }
        assert!(svc.database().rows().leads.is_empty());
        assert!(svc.mailer().sent().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_is_not_fatal() {
        let svc = spec::with(mailer::memory::Memory::unavailable());
        let p = self_listed(Some(OWNER));
        svc.database().execute(Insert(p.clone())).await.unwrap();

        let lead = svc.execute(inquiry(p.id)).await.unwrap();

        let rows = svc.database().rows();
        assert_eq!(rows.leads.len(), 1);
        assert_eq!(rows.leads[0].id, lead.id);
    }

    #[tokio::test]
    async fn database_failure_sends_nothing() {
        let svc = spec::service();
        let p = self_listed(Some(OWNER));
        svc.database().execute(Insert(p.clone())).await.unwrap();
        svc.database().rows().unavailable = true;

        let err = svc.execute(inquiry(p.id)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
        assert!(svc.mailer().sent().is_empty());
    }
}
