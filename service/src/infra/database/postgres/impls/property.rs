//! [`Property`]-related [`Database`] implementations.

use std::collections::BTreeSet;

use common::{
    operations::{By, Insert, Select, Update},
    pagination, Coordinates, Currency, Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Amenity, Contact, Features, Prices},
        user, Property,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::property::{
        list::{self, Criteria, Predicate},
        Sort,
    },
};

/// Columns of the `properties` table making up a [`Property`].
const COLUMNS: &str = "\
    id, title, description, listing_type, property_category, \
    state, municipality, neighborhood, address, \
    price, currency, price_usd, price_mxn, \
    bedrooms, bathrooms, sqft, lot_size, parking, year_built, \
    has_pool, has_ac, pets_allowed, has_gym, has_spa, has_jacuzzi, \
    has_security, has_elevator, has_bbq, has_event_room, has_storage, \
    has_laundry, has_covered_parking, \
    latitude, longitude, images, \
    status, show_on_mhf, featured, owner_id, client_id, \
    contact_name, contact_email, contact_phone, rejection_reason, \
    created_at, updated_at";

/// Owned parameters of a dynamically built SQL query.
type Params = Vec<Box<dyn ToSql + Send + Sync>>;

/// Renders the provided [`Criteria`] as an SQL `WHERE` condition, pushing
/// the bound values into the provided [`Params`].
fn condition(criteria: &Criteria, ps: &mut Params) -> String {
    criteria
        .predicates()
        .iter()
        .map(|p| {
            let mut bind = |v: Box<dyn ToSql + Send + Sync>| {
                ps.push(v);
                ps.len()
            };
            match p {
                Predicate::Status(s) => {
                    format!("status = ${}::TEXT", bind(Box::new(*s)))
                }
                Predicate::ShowOnStorefront => "show_on_mhf".into(),
                Predicate::State(s) => {
                    format!("state = ${}::VARCHAR", bind(Box::new(s.clone())))
                }
                Predicate::Municipality(m) => format!(
                    "municipality = ${}::VARCHAR",
                    bind(Box::new(m.clone())),
                ),
                Predicate::ListingType(t) => {
                    format!("listing_type = ${}::TEXT", bind(Box::new(*t)))
                }
                Predicate::Category(c) => format!(
                    "property_category = ${}::TEXT",
                    bind(Box::new(*c)),
                ),
                // Column names come from a closed set, never from input.
                Predicate::Amenity(a) => a.column().into(),
                Predicate::Featured => "featured".into(),
                Predicate::MinBedrooms(n) => format!(
                    "bedrooms >= ${}::INT4",
                    bind(Box::new(i32::from(*n))),
                ),
                Predicate::MinBathrooms(n) => {
                    format!("bathrooms >= ${}::NUMERIC", bind(Box::new(*n)))
                }
                Predicate::MinPrice(c, min) => format!(
                    "{} >= ${}::NUMERIC",
                    price_column(*c),
                    bind(Box::new(*min)),
                ),
                Predicate::MaxPrice(c, max) => format!(
                    "{} <= ${}::NUMERIC",
                    price_column(*c),
                    bind(Box::new(*max)),
                ),
                Predicate::HasCoordinates => {
                    "latitude IS NOT NULL AND longitude IS NOT NULL".into()
                }
            }
        })
        .join(" AND ")
}

/// Returns the precomputed price column of the provided currency.
const fn price_column(currency: Currency) -> &'static str {
    match currency {
        Currency::Usd => "price_usd",
        Currency::Mxn => "price_mxn",
    }
}

/// Renders the provided [`Sort`] as an SQL `ORDER BY` list.
const fn order(sort: Sort) -> &'static str {
    match sort {
        Sort::Featured => "featured DESC, created_at DESC, id ASC",
        Sort::Newest => "created_at DESC, id ASC",
        Sort::PriceAsc => "price ASC, id ASC",
        Sort::PriceDesc => "price DESC, id ASC",
    }
}

/// Reads a [`Property`] out of the provided [`Row`] of [`COLUMNS`].
fn from_row(row: &Row) -> Property {
    let amenities = Amenity::ALL
        .iter()
        .copied()
        .filter(|a| row.get::<_, bool>(a.column()))
        .collect::<BTreeSet<_>>();

    let name = row.get::<_, Option<_>>("contact_name");
    let email = row.get::<_, Option<_>>("contact_email");
    let phone = row.get::<_, Option<_>>("contact_phone");
    let contact = (name.is_some() || email.is_some() || phone.is_some())
        .then_some(Contact { name, email, phone });

    Property {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        listing_type: row.get("listing_type"),
        category: row.get("property_category"),
        state: row.get("state"),
        municipality: row.get("municipality"),
        neighborhood: row.get("neighborhood"),
        address: row.get("address"),
        prices: Prices {
            price: Money::new(row.get("price"), row.get("currency")),
            usd: row.get("price_usd"),
            mxn: row.get("price_mxn"),
        },
        features: Features {
            bedrooms: super::opt_u16(row, "bedrooms"),
            bathrooms: row.get("bathrooms"),
            sqft: row.get("sqft"),
            lot_size: row.get("lot_size"),
            parking: super::opt_u16(row, "parking"),
            year_built: super::opt_u16(row, "year_built"),
        },
        amenities,
        coordinates: Coordinates::from_parts(
            row.get("latitude"),
            row.get("longitude"),
        ),
        images: row.get("images"),
        status: row.get("status"),
        show_on_storefront: row.get("show_on_mhf"),
        featured: row.get("featured"),
        owner_id: row.get("owner_id"),
        client_id: row.get("client_id"),
        contact,
        rejection_reason: row.get("rejection_reason"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for Postgres {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector {
            criteria,
            sort,
            page,
            size,
        } = by.into_inner();

        let mut params = Params::new();
        let cond = condition(&criteria, &mut params);

        let ps = params
            .iter()
            .map(|p| -> &(dyn ToSql + Sync) { &**p })
            .collect::<Vec<_>>();
        let total = self
            .query_opt(
                format!(
                    "SELECT COUNT(*) AS total \
                     FROM properties \
                     WHERE {cond}"
                )
                .as_str(),
                &ps,
            )
            .await
            .map_err(tracerr::wrap!())?
            .map_or(0, |row| row.get::<_, i64>("total"));
        let total = u64::try_from(total).unwrap_or_default();

        let pagination::Window { offset, limit } = page.window(size);
        let (offset, limit) = (
            i64::try_from(offset).unwrap_or(i64::MAX),
            i64::try_from(limit).unwrap_or(i64::MAX),
        );
        let mut ps = ps;
        ps.push(&offset);
        let offset_n = ps.len();
        ps.push(&limit);
        let limit_n = ps.len();

        let items = self
            .query(
                format!(
                    "SELECT {COLUMNS} \
                     FROM properties \
                     WHERE {cond} \
                     ORDER BY {} \
                     OFFSET ${offset_n}::INT8 LIMIT ${limit_n}::INT8",
                    order(sort),
                )
                .as_str(),
                &ps,
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect();

        Ok(list::Page {
            items,
            total,
            number: page,
            size,
        })
    }
}

impl Database<Select<By<Vec<Property>, Criteria>>> for Postgres {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, Criteria>>,
    ) -> Result<Self::Ok, Self::Err> {
        let criteria = by.into_inner();

        let mut params = Params::new();
        let cond = condition(&criteria, &mut params);
        let ps = params
            .iter()
            .map(|p| -> &(dyn ToSql + Sync) { &**p })
            .collect::<Vec<_>>();

        Ok(self
            .query(
                format!(
                    "SELECT {COLUMNS} \
                     FROM properties \
                     WHERE {cond} \
                     ORDER BY {}",
                    order(Sort::Featured),
                )
                .as_str(),
                &ps,
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Postgres {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        Ok(self
            .query_opt(
                format!(
                    "SELECT {COLUMNS} \
                     FROM properties \
                     WHERE id = $1::UUID"
                )
                .as_str(),
                &[&id],
            )
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl Database<Select<By<Option<Property>, user::Id>>> for Postgres {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner_id = by.into_inner();

        Ok(self
            .query_opt(
                format!(
                    "SELECT {COLUMNS} \
                     FROM properties \
                     WHERE owner_id = $1::UUID \
                     LIMIT 1"
                )
                .as_str(),
                &[&owner_id],
            )
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl Database<Insert<Property>> for Postgres
where
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property)).await.map_err(tracerr::wrap!())
    }
}

impl Database<Update<Property>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            title,
            description,
            listing_type,
            category,
            state,
            municipality,
            neighborhood,
            address,
            prices,
            features,
            amenities,
            coordinates,
            images,
            status,
            show_on_storefront,
            featured,
            owner_id,
            client_id,
            contact,
            rejection_reason,
            created_at,
            updated_at,
        } = property;

        let bedrooms = features.bedrooms.map(i32::from);
        let parking = features.parking.map(i32::from);
        let year_built = features.year_built.map(i32::from);
        let [pool, ac, pets, gym, spa, jacuzzi, security, elevator, bbq, event_room, storage, laundry, covered_parking] =
            [
                Amenity::Pool,
                Amenity::AirConditioning,
                Amenity::PetsAllowed,
                Amenity::Gym,
                Amenity::Spa,
                Amenity::Jacuzzi,
                Amenity::Security,
                Amenity::Elevator,
                Amenity::Bbq,
                Amenity::EventRoom,
                Amenity::Storage,
                Amenity::Laundry,
                Amenity::CoveredParking,
            ]
            .map(|a| amenities.contains(&a));
        let latitude = coordinates.map(|c| c.latitude());
        let longitude = coordinates.map(|c| c.longitude());
        let Contact { name, email, phone } = contact.unwrap_or(Contact {
            name: None,
            email: None,
            phone: None,
        });

        const SQL: &str = "\
            INSERT INTO properties (\
                id, title, description, listing_type, property_category, \
                state, municipality, neighborhood, address, \
                price, currency, price_usd, price_mxn, \
                bedrooms, bathrooms, sqft, lot_size, parking, year_built, \
                has_pool, has_ac, pets_allowed, has_gym, has_spa, \
                has_jacuzzi, has_security, has_elevator, has_bbq, \
                has_event_room, has_storage, has_laundry, \
                has_covered_parking, \
                latitude, longitude, images, \
                status, show_on_mhf, featured, owner_id, client_id, \
                contact_name, contact_email, contact_phone, \
                rejection_reason, created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::TEXT, $4::TEXT, $5::TEXT, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
                $10::NUMERIC, $11::TEXT, $12::NUMERIC, $13::NUMERIC, \
                $14::INT4, $15::NUMERIC, $16::NUMERIC, $17::NUMERIC, \
                $18::INT4, $19::INT4, \
                $20::BOOL, $21::BOOL, $22::BOOL, $23::BOOL, $24::BOOL, \
                $25::BOOL, $26::BOOL, $27::BOOL, $28::BOOL, \
                $29::BOOL, $30::BOOL, $31::BOOL, \
                $32::BOOL, \
                $33::FLOAT8, $34::FLOAT8, $35::TEXT[], \
                $36::TEXT, $37::BOOL, $38::BOOL, $39::UUID, $40::UUID, \
                $41::VARCHAR, $42::VARCHAR, $43::VARCHAR, \
                $44::TEXT, $45::TIMESTAMPTZ, $46::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                listing_type = EXCLUDED.listing_type, \
                property_category = EXCLUDED.property_category, \
                state = EXCLUDED.state, \
                municipality = EXCLUDED.municipality, \
                neighborhood = EXCLUDED.neighborhood, \
                address = EXCLUDED.address, \
                price = EXCLUDED.price, \
                currency = EXCLUDED.currency, \
                price_usd = EXCLUDED.price_usd, \
                price_mxn = EXCLUDED.price_mxn, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                sqft = EXCLUDED.sqft, \
                lot_size = EXCLUDED.lot_size, \
                parking = EXCLUDED.parking, \
                year_built = EXCLUDED.year_built, \
                has_pool = EXCLUDED.has_pool, \
                has_ac = EXCLUDED.has_ac, \
                pets_allowed = EXCLUDED.pets_allowed, \
                has_gym = EXCLUDED.has_gym, \
                has_spa = EXCLUDED.has_spa, \
                has_jacuzzi = EXCLUDED.has_jacuzzi, \
                has_security = EXCLUDED.has_security, \
                has_elevator = EXCLUDED.has_elevator, \
                has_bbq = EXCLUDED.has_bbq, \
                has_event_room = EXCLUDED.has_event_room, \
                has_storage = EXCLUDED.has_storage, \
                has_laundry = EXCLUDED.has_laundry, \
                has_covered_parking = EXCLUDED.has_covered_parking, \
                latitude = EXCLUDED.latitude, \
                longitude = EXCLUDED.longitude, \
                images = EXCLUDED.images, \
                status = EXCLUDED.status, \
                show_on_mhf = EXCLUDED.show_on_mhf, \
                featured = EXCLUDED.featured, \
                owner_id = EXCLUDED.owner_id, \
                client_id = EXCLUDED.client_id, \
                contact_name = EXCLUDED.contact_name, \
                contact_email = EXCLUDED.contact_email, \
                contact_phone = EXCLUDED.contact_phone, \
                rejection_reason = EXCLUDED.rejection_reason, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &listing_type,
                &category,
                &state,
                &municipality,
                &neighborhood,
                &address,
                &prices.price.amount,
                &prices.price.currency,
                &prices.usd,
                &prices.mxn,
                &bedrooms,
                &features.bathrooms,
                &features.sqft,
                &features.lot_size,
                &parking,
                &year_built,
                &pool,
                &ac,
                &pets,
                &gym,
                &spa,
                &jacuzzi,
                &security,
                &elevator,
                &bbq,
                &event_room,
                &storage,
                &laundry,
                &covered_parking,
                &latitude,
                &longitude,
                &images,
                &status,
                &show_on_storefront,
                &featured,
                &owner_id,
                &client_id,
                &name,
                &email,
                &phone,
                &rejection_reason,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

#[cfg(test)]
mod spec {
    use crate::read::property::{list::Criteria, Filter, Sort};

    use super::{condition, order, Params};

    fn render(criteria: &Criteria) -> (String, Vec<String>) {
        let mut params = Params::new();
        let sql = condition(criteria, &mut params);
        (sql, params.iter().map(|p| format!("{p:?}")).collect())
    }

    #[test]
    fn scope_is_always_rendered() {
        let (sql, params) = render(&Filter::default().criteria());

        assert_eq!(sql, "status = $1::TEXT AND show_on_mhf");
        assert_eq!(params, ["Active"]);
    }

    #[test]
    fn renders_price_range_on_display_currency_column() {
        let filter = "state=Guanajuato\
                      &municipality=San+Miguel+de+Allende\
                      &listingType=sale\
                      &minPrice=250000&maxPrice=500000\
                      &sort=price-asc"
            .parse::<Filter>()
            .unwrap();

        let (sql, params) = render(&filter.criteria());

        assert_eq!(
            sql,
            "status = $1::TEXT AND show_on_mhf \
             AND state = $2::VARCHAR AND municipality = $3::VARCHAR \
             AND listing_type = $4::TEXT \
             AND price_usd >= $5::NUMERIC AND price_usd <= $6::NUMERIC",
        );
        assert_eq!(params[4..], ["250000", "500000"]);
        assert_eq!(order(filter.sort()), "price ASC, id ASC");
    }

    #[test]
    fn mxn_binds_peso_column() {
        let filter = "listingType=rent&displayCurrency=MXN&minPrice=15000\
                      &maxPrice=30000"
            .parse::<Filter>()
            .unwrap();

        let (sql, params) = render(&filter.criteria());

        assert!(sql.ends_with(
            "price_mxn >= $3::NUMERIC AND price_mxn <= $4::NUMERIC",
        ));
        assert!(!sql.contains("price_usd"));
        assert_eq!(params[2..], ["15000", "30000"]);
    }

    #[test]
    fn map_requires_coordinates() {
        let criteria = Filter::default().criteria().with_coordinates();

        let (sql, _) = render(&criteria);

        assert!(sql.ends_with(
            "AND latitude IS NOT NULL AND longitude IS NOT NULL",
        ));
    }

    #[test]
    fn orders_deterministically() {
        assert_eq!(
            order(Sort::Featured),
            "featured DESC, created_at DESC, id ASC",
        );
        assert_eq!(order(Sort::Newest), "created_at DESC, id ASC");
        assert_eq!(order(Sort::PriceDesc), "price DESC, id ASC");
    }
}
