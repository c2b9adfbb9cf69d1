//! [`Lead`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{
        lead::Broker,
        property::{self, Contact, Status},
        Lead,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::lead::{BrokerListing, PublicListing},
};

impl Database<Select<By<Option<PublicListing>, property::Id>>> for Postgres {
    type Ok = Option<PublicListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PublicListing>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, title, contact_name, contact_email, contact_phone \
            FROM properties \
            WHERE id = $1::UUID \
              AND owner_id IS NOT NULL \
              AND status = $2::TEXT AND show_on_mhf";
        Ok(self
            .query_opt(SQL, &[&id, &Status::Active])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| {
                let name = row.get::<_, Option<_>>("contact_name");
                let email = row.get::<_, Option<_>>("contact_email");
                let phone = row.get::<_, Option<_>>("contact_phone");
                PublicListing {
                    id: row.get("id"),
                    title: row.get("title"),
                    contact: (name.is_some()
                        || email.is_some()
                        || phone.is_some())
                    .then_some(Contact { name, email, phone }),
                }
            }))
    }
}

impl Database<Select<By<Option<BrokerListing>, property::Id>>> for Postgres {
    type Ok = Option<BrokerListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<BrokerListing>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // Broker account may be gone, while its listings are still shared.
        const SQL: &str = "\
            SELECT p.id, p.title, \
                   c.id AS client_id, \
                   c.name AS client_name, \
                   c.email AS client_email \
            FROM properties AS p \
            LEFT JOIN clients AS c ON c.id = p.client_id \
            WHERE p.id = $1::UUID \
              AND p.client_id IS NOT NULL \
              AND p.status = $2::TEXT AND p.show_on_mhf";
        Ok(self
            .query_opt(SQL, &[&id, &Status::Active])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| BrokerListing {
                id: row.get("id"),
                title: row.get("title"),
                broker: row.get::<_, Option<_>>("client_id").map(|id| Broker {
                    id,
                    name: row.get("client_name"),
                    email: row.get("client_email"),
                }),
            }))
    }
}

impl Database<Insert<Lead>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lead {
            id,
            property_id,
            property_title,
            name,
            email,
            phone,
            message,
            kind,
            status,
            source,
            base_price_usd,
            current_price_usd,
            broker,
            created_at,
        } = lead;
        let (client_id, client_name, client_email) = broker
            .map(|b| (Some(b.id), b.name, b.email))
            .unwrap_or_default();

        const SQL: &str = "\
            INSERT INTO leads (\
                id, property_id, property_title, \
                name, email, phone, message, \
                kind, status, source, \
                base_price_usd, current_price_usd, \
                client_id, client_name, client_email, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, $7::TEXT, \
                $8::TEXT, $9::TEXT, $10::VARCHAR, \
                $11::NUMERIC, $12::NUMERIC, \
                $13::UUID, $14::VARCHAR, $15::VARCHAR, \
                $16::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &property_title,
                &name,
                &email,
                &phone,
                &message,
                &kind,
                &status,
                &source,
                &base_price_usd,
                &current_price_usd,
                &client_id,
                &client_name,
                &client_email,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
